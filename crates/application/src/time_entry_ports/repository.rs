use async_trait::async_trait;
use timekeep_core::AppResult;
use timekeep_domain::{TimeEntry, TimeEntryId, TimeEntryStatus};

use super::TimeEntryListQuery;

/// Repository port for time entries and their tag links.
///
/// Every write lands atomically together with the entry's tag set.
#[async_trait]
pub trait TimeEntryRepository: Send + Sync {
    /// Returns one entry by id.
    async fn find_time_entry(&self, id: TimeEntryId) -> AppResult<Option<TimeEntry>>;

    /// Lists entries owned by one user, sorted by start date then creation time.
    async fn list_time_entries_for_user(
        &self,
        user_id: &str,
        query: &TimeEntryListQuery,
    ) -> AppResult<Vec<TimeEntry>>;

    /// Persists a new entry.
    async fn create_time_entry(&self, entry: TimeEntry) -> AppResult<()>;

    /// Replaces a stored entry. Fails with `Conflict` when the stored status is
    /// no longer `expected_status`.
    async fn update_time_entry(
        &self,
        entry: TimeEntry,
        expected_status: TimeEntryStatus,
    ) -> AppResult<()>;

    /// Removes an entry. Fails with `Conflict` when the stored status is no
    /// longer `expected_status`. Returns whether a row was removed.
    async fn delete_time_entry(
        &self,
        id: TimeEntryId,
        expected_status: TimeEntryStatus,
    ) -> AppResult<bool>;
}
