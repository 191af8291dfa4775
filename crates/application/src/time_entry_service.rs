use std::sync::Arc;

use chrono::Utc;
use timekeep_core::{AppError, AppResult};
use timekeep_domain::{
    AuditAction, Principal, ResourcePath, TimeEntry, TimeEntryAction, TimeEntryId,
    TimeEntryStatus, TransitionOutcome,
};
use tracing::{info, warn};

use crate::{
    AuditEvent, AuditRepository, AuthorizationService, ProjectCatalog, RecordValidator,
    TimeEntryRepository,
};

mod editing;
mod log_time;
mod moving;
mod retrieval;
mod review;

/// Time entry workflow: the seven lifecycle mutations plus owner-scoped reads.
///
/// Every mutation loads, gates, validates and persists in one pass. Nothing is
/// written unless every check succeeds.
#[derive(Clone)]
pub struct TimeEntryService {
    authorization_service: AuthorizationService,
    validator: RecordValidator,
    repository: Arc<dyn TimeEntryRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl TimeEntryService {
    /// Creates a time entry service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        catalog: Arc<dyn ProjectCatalog>,
        repository: Arc<dyn TimeEntryRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            validator: RecordValidator::new(catalog),
            repository,
            audit_repository,
        }
    }

    async fn load_entry(&self, id: TimeEntryId) -> AppResult<TimeEntry> {
        self.repository
            .find_time_entry(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("time entry '{id}' does not exist")))
    }

    fn authorize_on_current_project(
        &self,
        principal: &Principal,
        action: TimeEntryAction,
        entry: &TimeEntry,
    ) -> AppResult<TransitionOutcome> {
        self.authorization_service.authorize_transition(
            principal,
            action,
            Some(entry),
            &[ResourcePath::for_project(entry.project_code().as_str())],
        )
    }

    /// Applies the outcome of an authorized transition and persists the entry.
    async fn commit_transition(
        &self,
        principal: &Principal,
        mut entry: TimeEntry,
        expected_status: TimeEntryStatus,
        outcome: TransitionOutcome,
        decline_comment: Option<String>,
        audit_action: AuditAction,
    ) -> AppResult<TimeEntry> {
        let TransitionOutcome::Enter(status) = outcome else {
            return Err(AppError::Internal(format!(
                "transition for '{}' does not keep the entry",
                audit_action.as_str()
            )));
        };

        entry.enter_status(status, decline_comment);
        entry.touch(Utc::now());

        self.repository
            .update_time_entry(entry.clone(), expected_status)
            .await?;

        info!(
            time_entry_id = %entry.id(),
            subject = %principal.user_id(),
            from = %expected_status,
            to = %entry.status(),
            action = audit_action.as_str(),
            "time entry transitioned"
        );

        self.append_audit_event(
            principal,
            &entry,
            audit_action,
            format!(
                "status changed from '{}' to '{}'",
                expected_status,
                entry.status()
            ),
        )
        .await;

        Ok(entry)
    }

    /// Records an audit event for an entry that is already persisted.
    ///
    /// The entry write has committed by the time this runs, so an audit store
    /// failure is logged and does not fail the operation.
    async fn append_audit_event(
        &self,
        principal: &Principal,
        entry: &TimeEntry,
        action: AuditAction,
        detail: String,
    ) {
        let result = self
            .audit_repository
            .append_event(AuditEvent {
                subject: principal.user_id().to_owned(),
                action,
                resource_type: "time_entry".to_owned(),
                resource_id: entry.id().to_string(),
                detail: Some(detail),
            })
            .await;

        if let Err(error) = result {
            warn!(
                time_entry_id = %entry.id(),
                subject = %principal.user_id(),
                action = action.as_str(),
                %error,
                "failed to append audit event for committed time entry"
            );
        }
    }
}
