use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timekeep_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

/// Unique identifier for a time entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeEntryId(Uuid);

impl TimeEntryId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TimeEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TimeEntryId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Lifecycle status of a time entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeEntryStatus {
    /// Logged but not yet submitted.
    NotReported,
    /// Waiting for approval.
    Submitted,
    /// Approved. Terminal.
    Approved,
    /// Sent back to the owner with a comment.
    Declined,
}

impl TimeEntryStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotReported => "not_reported",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Declined => "declined",
        }
    }
}

impl Display for TimeEntryStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One `(tag name, tag value)` pair assigned to a time entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeEntryTag {
    /// Tag name configured under the entry project.
    pub tag_name: String,
    /// Selected tag value.
    pub tag_value: String,
}

impl TimeEntryTag {
    /// Creates a tag assignment.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, tag_value: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            tag_value: tag_value.into(),
        }
    }
}

/// Standard and overtime hours, both non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeEntryHours {
    standard: Decimal,
    overtime: Decimal,
}

impl TimeEntryHours {
    /// Creates validated hours.
    pub fn new(standard: Decimal, overtime: Decimal) -> AppResult<Self> {
        if standard < Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "standard hours must not be negative, got {standard}"
            )));
        }

        if overtime < Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "overtime hours must not be negative, got {overtime}"
            )));
        }

        Ok(Self { standard, overtime })
    }

    /// Returns standard hours.
    #[must_use]
    pub fn standard(&self) -> Decimal {
        self.standard
    }

    /// Returns overtime hours.
    #[must_use]
    pub fn overtime(&self) -> Decimal {
        self.overtime
    }
}

/// Inclusive start and completion dates with `start <= completion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    completion: NaiveDate,
}

impl DateRange {
    /// Creates a validated date range.
    pub fn new(start: NaiveDate, completion: NaiveDate) -> AppResult<Self> {
        if start > completion {
            return Err(AppError::Validation(format!(
                "start date {start} must not be after completion date {completion}"
            )));
        }

        Ok(Self { start, completion })
    }

    /// Returns the start date.
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the completion date.
    #[must_use]
    pub fn completion(&self) -> NaiveDate {
        self.completion
    }
}

/// Validated values for a newly logged entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimeEntry {
    /// Owning user id.
    pub user_id: String,
    /// Project code.
    pub project_code: String,
    /// Task name under the project.
    pub task_name: String,
    /// Logged hours.
    pub hours: TimeEntryHours,
    /// Worked dates.
    pub dates: DateRange,
    /// Free-text description.
    pub description: Option<String>,
    /// External issue reference.
    pub issue_id: Option<String>,
    /// Tag assignments.
    pub tags: BTreeSet<TimeEntryTag>,
}

/// Time recorded by one user against a project task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeEntry {
    id: TimeEntryId,
    user_id: NonEmptyString,
    project_code: NonEmptyString,
    task_name: NonEmptyString,
    hours: TimeEntryHours,
    dates: DateRange,
    description: Option<String>,
    issue_id: Option<String>,
    tags: BTreeSet<TimeEntryTag>,
    decline_comment: Option<String>,
    status: TimeEntryStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TimeEntry {
    /// Creates an entry in `NotReported` status.
    pub fn new(input: NewTimeEntry, now: DateTime<Utc>) -> AppResult<Self> {
        let NewTimeEntry {
            user_id,
            project_code,
            task_name,
            hours,
            dates,
            description,
            issue_id,
            tags,
        } = input;

        Ok(Self {
            id: TimeEntryId::new(),
            user_id: NonEmptyString::new(user_id)?,
            project_code: NonEmptyString::new(project_code)?,
            task_name: NonEmptyString::new(task_name)?,
            hours,
            dates,
            description,
            issue_id,
            tags,
            decline_comment: None,
            status: TimeEntryStatus::NotReported,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns the entry id.
    #[must_use]
    pub fn id(&self) -> TimeEntryId {
        self.id
    }

    /// Returns the owning user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Returns the project code.
    #[must_use]
    pub fn project_code(&self) -> &NonEmptyString {
        &self.project_code
    }

    /// Returns the task name.
    #[must_use]
    pub fn task_name(&self) -> &NonEmptyString {
        &self.task_name
    }

    /// Returns logged hours.
    #[must_use]
    pub fn hours(&self) -> TimeEntryHours {
        self.hours
    }

    /// Returns worked dates.
    #[must_use]
    pub fn dates(&self) -> DateRange {
        self.dates
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the external issue id.
    #[must_use]
    pub fn issue_id(&self) -> Option<&str> {
        self.issue_id.as_deref()
    }

    /// Returns tag assignments.
    #[must_use]
    pub fn tags(&self) -> &BTreeSet<TimeEntryTag> {
        &self.tags
    }

    /// Returns the decline comment. Only present while `Declined`.
    #[must_use]
    pub fn decline_comment(&self) -> Option<&str> {
        self.decline_comment.as_deref()
    }

    /// Returns lifecycle status.
    #[must_use]
    pub fn status(&self) -> TimeEntryStatus {
        self.status
    }

    /// Returns creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns last update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the user owns this entry.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id.as_str() == user_id
    }

    /// Replaces the task within the current project.
    pub fn set_task(&mut self, task_name: impl Into<String>) -> AppResult<()> {
        self.task_name = NonEmptyString::new(task_name)?;
        Ok(())
    }

    /// Replaces logged hours.
    pub fn set_hours(&mut self, hours: TimeEntryHours) {
        self.hours = hours;
    }

    /// Replaces worked dates.
    pub fn set_dates(&mut self, dates: DateRange) {
        self.dates = dates;
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Replaces the external issue id.
    pub fn set_issue_id(&mut self, issue_id: Option<String>) {
        self.issue_id = issue_id;
    }

    /// Replaces the whole tag set.
    pub fn replace_tags(&mut self, tags: BTreeSet<TimeEntryTag>) {
        self.tags = tags;
    }

    /// Reassigns project and task. Moving to a different project clears the
    /// tag set. Returns whether tags were cleared.
    pub fn reassign(
        &mut self,
        project_code: impl Into<String>,
        task_name: impl Into<String>,
    ) -> AppResult<bool> {
        let project_code = NonEmptyString::new(project_code)?;
        let task_name = NonEmptyString::new(task_name)?;
        let project_changed = project_code != self.project_code;

        if project_changed {
            self.tags.clear();
        }
        self.project_code = project_code;
        self.task_name = task_name;

        Ok(project_changed)
    }

    /// Moves the entry to a lifecycle status. The decline comment is kept only
    /// when entering `Declined`.
    pub fn enter_status(&mut self, status: TimeEntryStatus, decline_comment: Option<String>) {
        self.decline_comment = match status {
            TimeEntryStatus::Declined => decline_comment,
            _ => None,
        };
        self.status = status;
    }

    /// Records a modification time.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    use super::{DateRange, NewTimeEntry, TimeEntry, TimeEntryHours, TimeEntryStatus, TimeEntryTag};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap_or(NaiveDate::MIN)
    }

    fn sample_entry() -> TimeEntry {
        let hours = TimeEntryHours::new(Decimal::new(8, 0), Decimal::ZERO);
        let dates = DateRange::new(date(2), date(2));
        let (Ok(hours), Ok(dates)) = (hours, dates) else {
            panic!("sample values should be valid");
        };

        let entry = TimeEntry::new(
            NewTimeEntry {
                user_id: "alice".to_owned(),
                project_code: "INTERNAL".to_owned(),
                task_name: "Development".to_owned(),
                hours,
                dates,
                description: None,
                issue_id: None,
                tags: BTreeSet::from([TimeEntryTag::new("Phase", "Build")]),
            },
            Utc::now(),
        );
        let Ok(entry) = entry else {
            panic!("sample entry should be valid");
        };
        entry
    }

    #[test]
    fn new_entry_starts_not_reported() {
        let entry = sample_entry();
        assert_eq!(entry.status(), TimeEntryStatus::NotReported);
        assert!(entry.decline_comment().is_none());
        assert_eq!(entry.created_at(), entry.updated_at());
    }

    #[test]
    fn negative_hours_are_rejected() {
        assert!(TimeEntryHours::new(Decimal::new(-1, 0), Decimal::ZERO).is_err());
        assert!(TimeEntryHours::new(Decimal::ZERO, Decimal::new(-25, 1)).is_err());
        assert!(TimeEntryHours::new(Decimal::ZERO, Decimal::ZERO).is_ok());
    }

    #[test]
    fn start_after_completion_is_rejected() {
        assert!(DateRange::new(date(3), date(2)).is_err());
        assert!(DateRange::new(date(2), date(3)).is_ok());
    }

    #[test]
    fn reassign_to_other_project_clears_tags() {
        let mut entry = sample_entry();
        let cleared = entry.reassign("CLIENT-A", "Bug Fixing");
        assert_eq!(cleared.ok(), Some(true));
        assert!(entry.tags().is_empty());
        assert_eq!(entry.project_code().as_str(), "CLIENT-A");
        assert_eq!(entry.task_name().as_str(), "Bug Fixing");
    }

    #[test]
    fn reassign_within_project_keeps_tags() {
        let mut entry = sample_entry();
        let cleared = entry.reassign("INTERNAL", "Support");
        assert_eq!(cleared.ok(), Some(false));
        assert_eq!(entry.tags().len(), 1);
    }

    #[test]
    fn decline_comment_only_survives_in_declined() {
        let mut entry = sample_entry();
        entry.enter_status(TimeEntryStatus::Declined, Some("needs detail".to_owned()));
        assert_eq!(entry.decline_comment(), Some("needs detail"));

        entry.enter_status(TimeEntryStatus::NotReported, None);
        assert!(entry.decline_comment().is_none());

        entry.enter_status(TimeEntryStatus::Submitted, Some("ignored".to_owned()));
        assert!(entry.decline_comment().is_none());
    }

    #[test]
    fn entry_serializes_for_export() {
        let mut entry = sample_entry();
        entry.enter_status(TimeEntryStatus::Declined, Some("needs detail".to_owned()));

        let value = serde_json::to_value(&entry).unwrap_or_default();
        assert_eq!(value["status"], "declined");
        assert_eq!(value["decline_comment"], "needs detail");
        assert_eq!(value["project_code"], "INTERNAL");
        assert_eq!(value["dates"]["start"], "2026-03-02");
        assert_eq!(value["tags"][0]["tag_name"], "Phase");
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let value = serde_json::to_string(&TimeEntryStatus::NotReported).unwrap_or_default();
        assert_eq!(value, "\"not_reported\"");
    }
}
