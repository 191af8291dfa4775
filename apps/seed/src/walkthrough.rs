use chrono::{Days, Utc};
use rust_decimal::Decimal;
use timekeep_application::{
    AuthorizationService, LogTimeInput, TimeEntryListQuery, TimeEntryService,
    UpdateTimeEntryInput,
};
use timekeep_core::{AppError, AppResult, IdentityClaims};
use timekeep_domain::{Principal, TimeEntry, TimeEntryTag};
use tracing::{info, warn};

use crate::seed_catalog::{CLIENT_PROJECT, CLIENT_TASK, INTERNAL_PROJECT, INTERNAL_TASK, PHASE_TAG};
use crate::seed_config::SeedConfig;

fn owner_claims(subject: &str) -> IdentityClaims {
    IdentityClaims::new(
        subject,
        "Seed Owner",
        Some(format!("{subject}@timekeep.local")),
        vec![
            format!("Project/{INTERNAL_PROJECT}=V,T,E"),
            format!("Project/{CLIENT_PROJECT}=V,T,E"),
        ],
    )
}

fn reviewer_claims(subject: &str) -> IdentityClaims {
    IdentityClaims::new(
        subject,
        "Seed Reviewer",
        None,
        vec![
            format!("Project/{INTERNAL_PROJECT}=V,A"),
            format!("Project/{CLIENT_PROJECT}=V,A"),
        ],
    )
}

/// Logs, declines, reworks, moves and finally approves one entry.
pub async fn run(
    config: &SeedConfig,
    authorization_service: AuthorizationService,
    service: &TimeEntryService,
) -> AppResult<TimeEntry> {
    let owner = authorization_service.resolve_principal(&owner_claims(&config.owner_subject))?;
    let reviewer =
        authorization_service.resolve_principal(&reviewer_claims(&config.reviewer_subject))?;

    let yesterday = Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(1))
        .ok_or_else(|| AppError::Internal("calendar underflow".to_owned()))?;

    let entry = service
        .log_time(
            &owner,
            LogTimeInput {
                project_code: INTERNAL_PROJECT.to_owned(),
                task_name: INTERNAL_TASK.to_owned(),
                standard_hours: Decimal::new(75, 1),
                overtime_hours: Decimal::new(5, 1),
                start_date: yesterday,
                completion_date: yesterday,
                description: None,
                issue_id: Some("OPS-101".to_owned()),
                tags: vec![TimeEntryTag::new(PHASE_TAG, "Build")],
            },
        )
        .await?;

    let entry = service.submit_time_entry(&owner, entry.id()).await?;
    let entry = service
        .decline_time_entry(&reviewer, entry.id(), "please describe the work")
        .await?;

    let entry = service
        .update_time_entry(
            &owner,
            entry.id(),
            UpdateTimeEntryInput {
                description: Some(Some("fixed import pipeline for client data".to_owned())),
                ..UpdateTimeEntryInput::default()
            },
        )
        .await?;

    let entry = service
        .move_task_to_project(&owner, entry.id(), CLIENT_PROJECT, CLIENT_TASK)
        .await?;
    let entry = service.submit_time_entry(&owner, entry.id()).await?;
    let entry = service.approve_time_entry(&reviewer, entry.id()).await?;

    expect_locked(service, &owner, &entry).await?;

    let listed = service
        .list_time_entries(&owner, TimeEntryListQuery::default())
        .await?;
    info!(owner = %owner.user_id(), entries = listed.len(), "owner time entries listed");

    Ok(entry)
}

async fn expect_locked(
    service: &TimeEntryService,
    owner: &Principal,
    entry: &TimeEntry,
) -> AppResult<()> {
    match service
        .update_time_entry(owner, entry.id(), UpdateTimeEntryInput::default())
        .await
    {
        Err(AppError::BusinessRule(message)) => {
            warn!(time_entry_id = %entry.id(), %message, "approved entry stayed locked");
            Ok(())
        }
        Err(error) => Err(error),
        Ok(_) => Err(AppError::Internal(format!(
            "approved time entry '{}' accepted an update",
            entry.id()
        ))),
    }
}
