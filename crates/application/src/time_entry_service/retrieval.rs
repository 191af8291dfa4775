use super::*;

use tracing::debug;

use crate::TimeEntryListQuery;

impl TimeEntryService {
    /// Returns one of the caller's own entries.
    ///
    /// Reads are scoped by ownership only; ACL grants are not consulted. An
    /// entry owned by someone else is reported as missing.
    pub async fn find_time_entry(
        &self,
        principal: &Principal,
        id: TimeEntryId,
    ) -> AppResult<TimeEntry> {
        let entry = self
            .repository
            .find_time_entry(id)
            .await?
            .filter(|entry| self.authorization_service.is_owner(principal, entry));

        debug!(
            time_entry_id = %id,
            subject = %principal.user_id(),
            found = entry.is_some(),
            "time entry lookup"
        );

        entry.ok_or_else(|| AppError::NotFound(format!("time entry '{id}' does not exist")))
    }

    /// Lists the caller's own entries.
    // TODO: revisit once product decides whether Manage or Approve holders get a
    // project-wide read path; approvers currently cannot list what they review.
    pub async fn list_time_entries(
        &self,
        principal: &Principal,
        query: TimeEntryListQuery,
    ) -> AppResult<Vec<TimeEntry>> {
        let entries = self
            .repository
            .list_time_entries_for_user(principal.user_id(), &query)
            .await?;

        debug!(
            subject = %principal.user_id(),
            count = entries.len(),
            limit = query.limit,
            offset = query.offset,
            "listed time entries"
        );

        Ok(entries)
    }
}
