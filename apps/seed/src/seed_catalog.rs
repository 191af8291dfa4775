use timekeep_core::AppResult;
use timekeep_domain::{Project, ProjectTag, ProjectTask, TagValue};
use timekeep_infrastructure::InMemoryProjectCatalog;
use tracing::info;

pub const INTERNAL_PROJECT: &str = "INTERNAL";
pub const CLIENT_PROJECT: &str = "CLIENT-A";
pub const INTERNAL_TASK: &str = "Development";
pub const CLIENT_TASK: &str = "Bug Fixing";
pub const PHASE_TAG: &str = "Phase";

/// Seeds two active projects, one archived project and their tasks and tags.
pub async fn seed(catalog: &InMemoryProjectCatalog) -> AppResult<()> {
    catalog
        .register_project(Project::new(INTERNAL_PROJECT, "Internal tooling", true)?)
        .await?;
    catalog
        .register_project(Project::new(CLIENT_PROJECT, "Client A retainer", true)?)
        .await?;
    catalog
        .register_project(Project::new("ARCHIVE-2024", "Archived engagement", false)?)
        .await?;

    for task_name in [INTERNAL_TASK, "Support"] {
        catalog
            .register_task(ProjectTask::new(INTERNAL_PROJECT, task_name, true)?)
            .await?;
    }
    catalog
        .register_task(ProjectTask::new(CLIENT_PROJECT, CLIENT_TASK, true)?)
        .await?;

    for project_code in [INTERNAL_PROJECT, CLIENT_PROJECT] {
        catalog
            .register_tag(ProjectTag::new(
                project_code,
                PHASE_TAG,
                true,
                false,
                vec![
                    TagValue::active("Design"),
                    TagValue::active("Build"),
                    TagValue {
                        value: "Legacy".to_owned(),
                        is_active: false,
                    },
                ],
            )?)
            .await?;
    }

    info!("project catalog seeded");
    Ok(())
}
