use async_trait::async_trait;
use timekeep_core::AppResult;
use timekeep_domain::{Project, ProjectTag, ProjectTask};

/// Read-only port onto the project catalog.
///
/// Implementations may cache, but every call is treated as a fresh lookup.
#[async_trait]
pub trait ProjectCatalog: Send + Sync {
    /// Looks up a project by code.
    async fn find_project(&self, project_code: &str) -> AppResult<Option<Project>>;

    /// Looks up a task by name under a project.
    async fn find_task(
        &self,
        project_code: &str,
        task_name: &str,
    ) -> AppResult<Option<ProjectTask>>;

    /// Lists tag configurations of a project.
    async fn list_tags(&self, project_code: &str) -> AppResult<Vec<ProjectTag>>;
}
