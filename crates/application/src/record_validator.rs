use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use timekeep_core::{AppError, AppResult};
use timekeep_domain::{DateRange, Project, ProjectTask, TimeEntryHours, TimeEntryTag};

use crate::ProjectCatalog;

/// Structural and catalog checks for proposed time entry values.
///
/// Nothing is cached between calls; every check asks the catalog again.
#[derive(Clone)]
pub struct RecordValidator {
    catalog: Arc<dyn ProjectCatalog>,
}

impl RecordValidator {
    /// Creates a validator over a catalog port.
    #[must_use]
    pub fn new(catalog: Arc<dyn ProjectCatalog>) -> Self {
        Self { catalog }
    }

    /// Ensures the project exists.
    pub async fn validate_project(&self, project_code: &str) -> AppResult<Project> {
        self.catalog
            .find_project(project_code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("project '{project_code}' does not exist")))
    }

    /// Ensures the project exists and accepts new time.
    pub async fn validate_active_project(&self, project_code: &str) -> AppResult<Project> {
        let project = self.validate_project(project_code).await?;
        if !project.is_active() {
            return Err(AppError::Validation(format!(
                "project '{project_code}' is inactive"
            )));
        }

        Ok(project)
    }

    /// Ensures the task exists under the project and is active.
    pub async fn validate_task(&self, project_code: &str, task_name: &str) -> AppResult<ProjectTask> {
        self.catalog
            .find_task(project_code, task_name)
            .await?
            .filter(ProjectTask::is_active)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "task '{task_name}' does not exist in project '{project_code}'"
                ))
            })
    }

    /// Checks tag assignments against the project's tag configuration.
    ///
    /// Each tag name may appear once, must be an active tag of the project and
    /// carry an allowed value. Every required tag must be present.
    pub async fn validate_tags(
        &self,
        project_code: &str,
        tags: &[TimeEntryTag],
    ) -> AppResult<BTreeSet<TimeEntryTag>> {
        let configured = self.catalog.list_tags(project_code).await?;
        let configured_by_name: BTreeMap<&str, _> = configured
            .iter()
            .map(|tag| (tag.name().as_str(), tag))
            .collect();

        let mut assigned = BTreeSet::new();
        let mut seen_names = BTreeSet::new();
        for tag in tags {
            if !seen_names.insert(tag.tag_name.as_str()) {
                return Err(AppError::Validation(format!(
                    "tag '{}' is assigned more than once",
                    tag.tag_name
                )));
            }

            let Some(configuration) = configured_by_name
                .get(tag.tag_name.as_str())
                .filter(|configuration| configuration.is_active())
            else {
                return Err(AppError::Validation(format!(
                    "tag '{}' is not configured for project '{project_code}'",
                    tag.tag_name
                )));
            };

            if !configuration.allows_value(tag.tag_value.as_str()) {
                return Err(AppError::Validation(format!(
                    "value '{}' is not allowed for tag '{}' in project '{project_code}'",
                    tag.tag_value, tag.tag_name
                )));
            }

            assigned.insert(tag.clone());
        }

        if let Some(missing) = configured.iter().find(|configuration| {
            configuration.is_active()
                && configuration.is_required()
                && !seen_names.contains(configuration.name().as_str())
        }) {
            return Err(AppError::Validation(format!(
                "tag '{}' is required for project '{project_code}'",
                missing.name()
            )));
        }

        Ok(assigned)
    }

    /// Ensures `start <= completion`.
    pub fn validate_date_range(&self, start: NaiveDate, completion: NaiveDate) -> AppResult<DateRange> {
        DateRange::new(start, completion)
    }

    /// Ensures neither hour value is negative.
    pub fn validate_hours(&self, standard: Decimal, overtime: Decimal) -> AppResult<TimeEntryHours> {
        TimeEntryHours::new(standard, overtime)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use timekeep_core::{AppError, AppResult};
    use timekeep_domain::{Project, ProjectTag, ProjectTask, TagValue, TimeEntryTag};

    use crate::ProjectCatalog;
    use crate::test_support::day;

    use super::RecordValidator;

    #[derive(Default)]
    struct FakeCatalog {
        projects: HashMap<String, Project>,
        tasks: HashMap<(String, String), ProjectTask>,
        tags: HashMap<String, Vec<ProjectTag>>,
    }

    #[async_trait]
    impl ProjectCatalog for FakeCatalog {
        async fn find_project(&self, project_code: &str) -> AppResult<Option<Project>> {
            Ok(self.projects.get(project_code).cloned())
        }

        async fn find_task(
            &self,
            project_code: &str,
            task_name: &str,
        ) -> AppResult<Option<ProjectTask>> {
            Ok(self
                .tasks
                .get(&(project_code.to_owned(), task_name.to_owned()))
                .cloned())
        }

        async fn list_tags(&self, project_code: &str) -> AppResult<Vec<ProjectTag>> {
            Ok(self.tags.get(project_code).cloned().unwrap_or_default())
        }
    }

    fn validator() -> AppResult<RecordValidator> {
        let mut catalog = FakeCatalog::default();
        catalog.projects.insert(
            "INTERNAL".to_owned(),
            Project::new("INTERNAL", "Internal", true)?,
        );
        catalog.projects.insert(
            "ARCHIVE".to_owned(),
            Project::new("ARCHIVE", "Archive", false)?,
        );
        for (name, active) in [("Development", true), ("Legacy", false)] {
            catalog.tasks.insert(
                ("INTERNAL".to_owned(), name.to_owned()),
                ProjectTask::new("INTERNAL", name, active)?,
            );
        }
        catalog.tags.insert(
            "INTERNAL".to_owned(),
            vec![
                ProjectTag::new(
                    "INTERNAL",
                    "Phase",
                    true,
                    true,
                    vec![TagValue::active("Design"), TagValue::active("Build")],
                )?,
                ProjectTag::new("INTERNAL", "Billable", true, false, vec![TagValue::active("Yes")])?,
                ProjectTag::new("INTERNAL", "Retired", false, false, vec![TagValue::active("Any")])?,
            ],
        );

        Ok(RecordValidator::new(Arc::new(catalog)))
    }

    #[tokio::test]
    async fn unknown_and_inactive_projects() {
        let Ok(validator) = validator() else {
            panic!("catalog should build");
        };

        assert!(matches!(
            validator.validate_project("MISSING").await,
            Err(AppError::NotFound(_))
        ));
        assert!(validator.validate_project("ARCHIVE").await.is_ok());
        assert!(matches!(
            validator.validate_active_project("ARCHIVE").await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn inactive_or_foreign_tasks_are_not_found() {
        let Ok(validator) = validator() else {
            panic!("catalog should build");
        };

        assert!(validator.validate_task("INTERNAL", "Development").await.is_ok());
        assert!(matches!(
            validator.validate_task("INTERNAL", "Legacy").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            validator.validate_task("ARCHIVE", "Development").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn tags_must_match_active_configuration() {
        let Ok(validator) = validator() else {
            panic!("catalog should build");
        };

        let valid = validator
            .validate_tags(
                "INTERNAL",
                &[
                    TimeEntryTag::new("Phase", "Build"),
                    TimeEntryTag::new("Billable", "Yes"),
                ],
            )
            .await;
        assert_eq!(valid.map(|tags| tags.len()).ok(), Some(2));

        for tags in [
            vec![TimeEntryTag::new("Phase", "Deploy")],
            vec![
                TimeEntryTag::new("Phase", "Build"),
                TimeEntryTag::new("Retired", "Any"),
            ],
            vec![
                TimeEntryTag::new("Phase", "Build"),
                TimeEntryTag::new("Unknown", "x"),
            ],
            vec![
                TimeEntryTag::new("Phase", "Build"),
                TimeEntryTag::new("Phase", "Design"),
            ],
        ] {
            assert!(matches!(
                validator.validate_tags("INTERNAL", &tags).await,
                Err(AppError::Validation(_))
            ));
        }
    }

    #[tokio::test]
    async fn required_tag_must_be_present() {
        let Ok(validator) = validator() else {
            panic!("catalog should build");
        };

        let result = validator
            .validate_tags("INTERNAL", &[TimeEntryTag::new("Billable", "Yes")])
            .await;
        match result {
            Err(AppError::Validation(message)) => assert!(message.contains("'Phase'")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn dates_and_hours_are_checked() {
        let Ok(validator) = validator() else {
            panic!("catalog should build");
        };

        assert!(validator.validate_date_range(day(5), day(4)).is_err());
        assert!(validator.validate_date_range(day(4), day(4)).is_ok());
        assert!(
            validator
                .validate_hours(Decimal::new(-5, 1), Decimal::ZERO)
                .is_err()
        );
        assert!(
            validator
                .validate_hours(Decimal::new(75, 1), Decimal::new(1, 0))
                .is_ok()
        );
    }
}
