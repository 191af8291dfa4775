use super::*;

use timekeep_domain::TimeEntryTag;

use crate::UpdateTimeEntryInput;

impl TimeEntryService {
    /// Updates fields of an entry that is `NotReported` or `Declined`.
    ///
    /// A `Declined` entry returns to `NotReported` and loses its decline comment.
    pub async fn update_time_entry(
        &self,
        principal: &Principal,
        id: TimeEntryId,
        input: UpdateTimeEntryInput,
    ) -> AppResult<TimeEntry> {
        let mut entry = self.load_entry(id).await?;
        let outcome =
            self.authorize_on_current_project(principal, TimeEntryAction::Update, &entry)?;
        let expected_status = entry.status();
        let project_code = entry.project_code().as_str().to_owned();

        if let Some(task_name) = input.task_name {
            let task = self
                .validator
                .validate_task(project_code.as_str(), task_name.as_str())
                .await?;
            entry.set_task(task.name().as_str())?;
        }

        if input.standard_hours.is_some() || input.overtime_hours.is_some() {
            let current = entry.hours();
            let hours = self.validator.validate_hours(
                input.standard_hours.unwrap_or(current.standard()),
                input.overtime_hours.unwrap_or(current.overtime()),
            )?;
            entry.set_hours(hours);
        }

        if input.start_date.is_some() || input.completion_date.is_some() {
            let current = entry.dates();
            let dates = self.validator.validate_date_range(
                input.start_date.unwrap_or(current.start()),
                input.completion_date.unwrap_or(current.completion()),
            )?;
            entry.set_dates(dates);
        }

        if let Some(description) = input.description {
            entry.set_description(description);
        }

        if let Some(issue_id) = input.issue_id {
            entry.set_issue_id(issue_id);
        }

        if let Some(tags) = input.tags {
            let tags = self
                .validator
                .validate_tags(project_code.as_str(), &tags)
                .await?;
            entry.replace_tags(tags);
        }

        self.commit_transition(
            principal,
            entry,
            expected_status,
            outcome,
            None,
            AuditAction::TimeEntryUpdated,
        )
        .await
    }

    /// Replaces the tag set of an entry, validated against its current project.
    pub async fn update_tags(
        &self,
        principal: &Principal,
        id: TimeEntryId,
        tags: Vec<TimeEntryTag>,
    ) -> AppResult<TimeEntry> {
        let mut entry = self.load_entry(id).await?;
        let outcome = self.authorize_on_current_project(principal, TimeEntryAction::Retag, &entry)?;
        let expected_status = entry.status();

        let tags = self
            .validator
            .validate_tags(entry.project_code().as_str(), &tags)
            .await?;
        entry.replace_tags(tags);

        self.commit_transition(
            principal,
            entry,
            expected_status,
            outcome,
            None,
            AuditAction::TimeEntryRetagged,
        )
        .await
    }

    /// Deletes an entry that is `NotReported` or `Declined` together with its tags.
    pub async fn delete_time_entry(&self, principal: &Principal, id: TimeEntryId) -> AppResult<bool> {
        let entry = self.load_entry(id).await?;
        let outcome =
            self.authorize_on_current_project(principal, TimeEntryAction::Delete, &entry)?;
        if outcome != TransitionOutcome::Remove {
            return Err(AppError::Internal(
                "delete transition must remove the entry".to_owned(),
            ));
        }

        let deleted = self
            .repository
            .delete_time_entry(entry.id(), entry.status())
            .await?;

        if deleted {
            info!(
                time_entry_id = %entry.id(),
                subject = %principal.user_id(),
                "time entry deleted"
            );

            self.append_audit_event(
                principal,
                &entry,
                AuditAction::TimeEntryDeleted,
                format!("deleted time entry in status '{}'", entry.status()),
            )
            .await;
        }

        Ok(deleted)
    }
}
