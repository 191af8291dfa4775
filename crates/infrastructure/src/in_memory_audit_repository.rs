use async_trait::async_trait;
use timekeep_application::{AuditEvent, AuditRepository};
use timekeep_core::AppResult;
use tokio::sync::RwLock;
use tracing::info;

/// Append-only audit log kept in memory.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all events in append order.
    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.read().await.clone()
    }

    /// Returns the events recorded for one resource id in append order.
    pub async fn events_for_resource(&self, resource_id: &str) -> Vec<AuditEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| event.resource_id == resource_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        info!(
            subject = %event.subject,
            action = event.action.as_str(),
            resource_type = %event.resource_type,
            resource_id = %event.resource_id,
            detail = event.detail.as_deref().unwrap_or_default(),
            "audit event recorded"
        );

        self.events.write().await.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use timekeep_application::{AuditEvent, AuditRepository};
    use timekeep_domain::AuditAction;

    use super::InMemoryAuditRepository;

    fn event(resource_id: &str, action: AuditAction) -> AuditEvent {
        AuditEvent {
            subject: "alice".to_owned(),
            action,
            resource_type: "time_entry".to_owned(),
            resource_id: resource_id.to_owned(),
            detail: None,
        }
    }

    #[tokio::test]
    async fn events_are_kept_in_append_order() {
        let repository = InMemoryAuditRepository::new();

        for (resource_id, action) in [
            ("one", AuditAction::TimeEntryLogged),
            ("two", AuditAction::TimeEntryLogged),
            ("one", AuditAction::TimeEntrySubmitted),
        ] {
            assert!(repository.append_event(event(resource_id, action)).await.is_ok());
        }

        assert_eq!(repository.events().await.len(), 3);
        let actions: Vec<AuditAction> = repository
            .events_for_resource("one")
            .await
            .into_iter()
            .map(|event| event.action)
            .collect();
        assert_eq!(
            actions,
            vec![AuditAction::TimeEntryLogged, AuditAction::TimeEntrySubmitted]
        );
    }
}
