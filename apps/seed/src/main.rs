//! Timekeep seed runtime.
//!
//! Wires the in-memory adapters, seeds a small project catalog and walks one
//! time entry through its whole lifecycle.

#![forbid(unsafe_code)]

mod seed_catalog;
mod seed_config;
mod walkthrough;

use std::sync::Arc;

use timekeep_application::{AuthorizationService, TimeEntryService};
use timekeep_core::AppError;
use timekeep_infrastructure::{
    InMemoryAuditRepository, InMemoryProjectCatalog, InMemoryTimeEntryRepository,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::seed_config::SeedConfig;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = SeedConfig::load()?;
    info!(
        acl_parse_mode = config.acl_parse_mode.as_str(),
        owner = %config.owner_subject,
        reviewer = %config.reviewer_subject,
        "starting timekeep seed"
    );

    let catalog = Arc::new(InMemoryProjectCatalog::new());
    seed_catalog::seed(catalog.as_ref()).await?;

    let authorization_service = AuthorizationService::new(config.acl_parse_mode);
    let audit_repository = Arc::new(InMemoryAuditRepository::new());
    let service = TimeEntryService::new(
        authorization_service,
        catalog,
        Arc::new(InMemoryTimeEntryRepository::new()),
        audit_repository.clone(),
    );

    let entry = walkthrough::run(&config, authorization_service, &service).await?;

    let audit_trail = audit_repository
        .events_for_resource(entry.id().to_string().as_str())
        .await;
    info!(
        time_entry_id = %entry.id(),
        status = %entry.status(),
        audit_events = audit_trail.len(),
        "walkthrough finished"
    );

    let rendered = serde_json::to_string_pretty(&entry)
        .map_err(|error| AppError::Internal(format!("failed to render time entry: {error}")))?;
    info!("final time entry:\n{rendered}");

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
