use super::*;

impl TimeEntryService {
    /// Submits the caller's own entry for approval.
    pub async fn submit_time_entry(
        &self,
        principal: &Principal,
        id: TimeEntryId,
    ) -> AppResult<TimeEntry> {
        let entry = self.load_entry(id).await?;
        let outcome =
            self.authorize_on_current_project(principal, TimeEntryAction::Submit, &entry)?;
        let expected_status = entry.status();

        self.commit_transition(
            principal,
            entry,
            expected_status,
            outcome,
            None,
            AuditAction::TimeEntrySubmitted,
        )
        .await
    }

    /// Approves a submitted entry. Approved entries are terminal.
    pub async fn approve_time_entry(
        &self,
        principal: &Principal,
        id: TimeEntryId,
    ) -> AppResult<TimeEntry> {
        let entry = self.load_entry(id).await?;
        let outcome =
            self.authorize_on_current_project(principal, TimeEntryAction::Approve, &entry)?;
        let expected_status = entry.status();

        self.commit_transition(
            principal,
            entry,
            expected_status,
            outcome,
            None,
            AuditAction::TimeEntryApproved,
        )
        .await
    }

    /// Declines a submitted entry with a non-empty comment for the owner.
    pub async fn decline_time_entry(
        &self,
        principal: &Principal,
        id: TimeEntryId,
        comment: &str,
    ) -> AppResult<TimeEntry> {
        let entry = self.load_entry(id).await?;
        let outcome =
            self.authorize_on_current_project(principal, TimeEntryAction::Decline, &entry)?;
        let expected_status = entry.status();

        let comment = comment.trim();
        if comment.is_empty() {
            return Err(AppError::Validation(
                "declining a time entry requires a comment".to_owned(),
            ));
        }

        self.commit_transition(
            principal,
            entry,
            expected_status,
            outcome,
            Some(comment.to_owned()),
            AuditAction::TimeEntryDeclined,
        )
        .await
    }
}
