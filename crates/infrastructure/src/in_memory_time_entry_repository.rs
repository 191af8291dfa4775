use std::collections::HashMap;

use async_trait::async_trait;
use timekeep_application::{TimeEntryListQuery, TimeEntryRepository};
use timekeep_core::{AppError, AppResult};
use timekeep_domain::{TimeEntry, TimeEntryId, TimeEntryStatus};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory time entry repository.
///
/// The tag set lives inside [`TimeEntry`], so every write replaces the entry
/// and its tags together under one lock.
#[derive(Debug, Default)]
pub struct InMemoryTimeEntryRepository {
    entries: RwLock<HashMap<TimeEntryId, TimeEntry>>,
}

impl InMemoryTimeEntryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn stale_status(id: TimeEntryId, expected: TimeEntryStatus, actual: TimeEntryStatus) -> AppError {
    AppError::Conflict(format!(
        "time entry '{id}' is '{actual}' but '{expected}' was expected"
    ))
}

#[async_trait]
impl TimeEntryRepository for InMemoryTimeEntryRepository {
    async fn find_time_entry(&self, id: TimeEntryId) -> AppResult<Option<TimeEntry>> {
        Ok(self.entries.read().await.get(&id).cloned())
    }

    async fn list_time_entries_for_user(
        &self,
        user_id: &str,
        query: &TimeEntryListQuery,
    ) -> AppResult<Vec<TimeEntry>> {
        let entries = self.entries.read().await;

        let mut values: Vec<TimeEntry> = entries
            .values()
            .filter(|entry| entry.is_owned_by(user_id) && query.matches(entry))
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            left.dates()
                .start()
                .cmp(&right.dates().start())
                .then_with(|| left.created_at().cmp(&right.created_at()))
        });

        Ok(values
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }

    async fn create_time_entry(&self, entry: TimeEntry) -> AppResult<()> {
        let mut entries = self.entries.write().await;

        if entries.contains_key(&entry.id()) {
            return Err(AppError::Conflict(format!(
                "time entry '{}' already exists",
                entry.id()
            )));
        }

        debug!(time_entry_id = %entry.id(), "time entry stored");
        entries.insert(entry.id(), entry);
        Ok(())
    }

    async fn update_time_entry(
        &self,
        entry: TimeEntry,
        expected_status: TimeEntryStatus,
    ) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        let Some(stored) = entries.get_mut(&entry.id()) else {
            return Err(AppError::NotFound(format!(
                "time entry '{}' does not exist",
                entry.id()
            )));
        };

        if stored.status() != expected_status {
            return Err(stale_status(entry.id(), expected_status, stored.status()));
        }

        *stored = entry;
        Ok(())
    }

    async fn delete_time_entry(
        &self,
        id: TimeEntryId,
        expected_status: TimeEntryStatus,
    ) -> AppResult<bool> {
        let mut entries = self.entries.write().await;

        match entries.get(&id).map(TimeEntry::status) {
            None => Ok(false),
            Some(actual) if actual != expected_status => {
                Err(stale_status(id, expected_status, actual))
            }
            Some(_) => Ok(entries.remove(&id).is_some()),
        }
    }
}
