use std::collections::HashMap;

use async_trait::async_trait;
use timekeep_application::ProjectCatalog;
use timekeep_core::{AppError, AppResult};
use timekeep_domain::{Project, ProjectTag, ProjectTask};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory project catalog used by seeding and tests.
#[derive(Debug, Default)]
pub struct InMemoryProjectCatalog {
    projects: RwLock<HashMap<String, Project>>,
    tasks: RwLock<HashMap<(String, String), ProjectTask>>,
    tags: RwLock<HashMap<(String, String), ProjectTag>>,
}

impl InMemoryProjectCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a project. Project codes are unique.
    pub async fn register_project(&self, project: Project) -> AppResult<()> {
        let code = project.code().as_str().to_owned();
        let mut projects = self.projects.write().await;

        if projects.contains_key(&code) {
            return Err(AppError::Conflict(format!(
                "project '{code}' already exists"
            )));
        }

        debug!(project_code = %code, is_active = project.is_active(), "project registered");
        projects.insert(code, project);
        Ok(())
    }

    /// Registers a task under an existing project.
    pub async fn register_task(&self, task: ProjectTask) -> AppResult<()> {
        let key = (
            task.project_code().as_str().to_owned(),
            task.name().as_str().to_owned(),
        );
        self.require_project(key.0.as_str()).await?;

        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "task '{}' already exists in project '{}'",
                key.1, key.0
            )));
        }

        debug!(project_code = %key.0, task_name = %key.1, "task registered");
        tasks.insert(key, task);
        Ok(())
    }

    /// Registers a tag configuration under an existing project.
    pub async fn register_tag(&self, tag: ProjectTag) -> AppResult<()> {
        let key = (
            tag.project_code().as_str().to_owned(),
            tag.name().as_str().to_owned(),
        );
        self.require_project(key.0.as_str()).await?;

        let mut tags = self.tags.write().await;
        if tags.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "tag '{}' already exists in project '{}'",
                key.1, key.0
            )));
        }

        debug!(
            project_code = %key.0,
            tag_name = %key.1,
            is_required = tag.is_required(),
            "tag registered"
        );
        tags.insert(key, tag);
        Ok(())
    }

    async fn require_project(&self, project_code: &str) -> AppResult<()> {
        if self.projects.read().await.contains_key(project_code) {
            return Ok(());
        }

        Err(AppError::NotFound(format!(
            "project '{project_code}' does not exist"
        )))
    }
}

#[async_trait]
impl ProjectCatalog for InMemoryProjectCatalog {
    async fn find_project(&self, project_code: &str) -> AppResult<Option<Project>> {
        Ok(self.projects.read().await.get(project_code).cloned())
    }

    async fn find_task(
        &self,
        project_code: &str,
        task_name: &str,
    ) -> AppResult<Option<ProjectTask>> {
        Ok(self
            .tasks
            .read()
            .await
            .get(&(project_code.to_owned(), task_name.to_owned()))
            .cloned())
    }

    async fn list_tags(&self, project_code: &str) -> AppResult<Vec<ProjectTag>> {
        let tags = self.tags.read().await;

        let mut values: Vec<ProjectTag> = tags
            .iter()
            .filter_map(|((stored_code, _), tag)| (stored_code == project_code).then_some(tag.clone()))
            .collect();
        values.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(values)
    }
}
