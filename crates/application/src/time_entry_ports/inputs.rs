use chrono::NaiveDate;
use rust_decimal::Decimal;
use timekeep_domain::{TimeEntry, TimeEntryStatus, TimeEntryTag};

/// Input payload for logging time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTimeInput {
    /// Project code.
    pub project_code: String,
    /// Task name under the project.
    pub task_name: String,
    /// Standard hours.
    pub standard_hours: Decimal,
    /// Overtime hours.
    pub overtime_hours: Decimal,
    /// First worked date.
    pub start_date: NaiveDate,
    /// Last worked date.
    pub completion_date: NaiveDate,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional external issue reference.
    pub issue_id: Option<String>,
    /// Tag assignments.
    pub tags: Vec<TimeEntryTag>,
}

/// Partial update of a time entry. `None` leaves a field unchanged.
///
/// `description` and `issue_id` are doubly optional: `Some(None)` clears the
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTimeEntryInput {
    /// New task name within the current project.
    pub task_name: Option<String>,
    /// New standard hours.
    pub standard_hours: Option<Decimal>,
    /// New overtime hours.
    pub overtime_hours: Option<Decimal>,
    /// New start date.
    pub start_date: Option<NaiveDate>,
    /// New completion date.
    pub completion_date: Option<NaiveDate>,
    /// New description, or `Some(None)` to clear it.
    pub description: Option<Option<String>>,
    /// New external issue reference, or `Some(None)` to clear it.
    pub issue_id: Option<Option<String>>,
    /// Replacement tag set.
    pub tags: Option<Vec<TimeEntryTag>>,
}

/// Query inputs for listing the caller's time entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntryListQuery {
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for offset pagination.
    pub offset: usize,
    /// Only entries of this project.
    pub project_code: Option<String>,
    /// Only entries in this status.
    pub status: Option<TimeEntryStatus>,
    /// Only entries starting on or after this date.
    pub start_from: Option<NaiveDate>,
    /// Only entries starting on or before this date.
    pub start_to: Option<NaiveDate>,
}

impl Default for TimeEntryListQuery {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
            project_code: None,
            status: None,
            start_from: None,
            start_to: None,
        }
    }
}

impl TimeEntryListQuery {
    /// Returns whether an entry passes every filter. Pagination is not applied.
    #[must_use]
    pub fn matches(&self, entry: &TimeEntry) -> bool {
        let start = entry.dates().start();

        self.project_code
            .as_deref()
            .is_none_or(|code| entry.project_code().as_str() == code)
            && self.status.is_none_or(|status| entry.status() == status)
            && self.start_from.is_none_or(|from| start >= from)
            && self.start_to.is_none_or(|to| start <= to)
    }
}
