use super::*;

use timekeep_domain::NewTimeEntry;

use crate::LogTimeInput;

impl TimeEntryService {
    /// Logs time against a project task. The caller becomes the owner and the
    /// entry starts in `NotReported`.
    pub async fn log_time(&self, principal: &Principal, input: LogTimeInput) -> AppResult<TimeEntry> {
        let project_path = ResourcePath::for_project(input.project_code.as_str());
        self.authorization_service.authorize_transition(
            principal,
            TimeEntryAction::Create,
            None,
            &[project_path],
        )?;

        let project = self
            .validator
            .validate_active_project(input.project_code.as_str())
            .await?;
        let task = self
            .validator
            .validate_task(project.code().as_str(), input.task_name.as_str())
            .await?;
        let tags = self
            .validator
            .validate_tags(project.code().as_str(), &input.tags)
            .await?;
        let dates = self
            .validator
            .validate_date_range(input.start_date, input.completion_date)?;
        let hours = self
            .validator
            .validate_hours(input.standard_hours, input.overtime_hours)?;

        let entry = TimeEntry::new(
            NewTimeEntry {
                user_id: principal.user_id().to_owned(),
                project_code: project.code().as_str().to_owned(),
                task_name: task.name().as_str().to_owned(),
                hours,
                dates,
                description: input.description,
                issue_id: input.issue_id,
                tags,
            },
            Utc::now(),
        )?;

        self.repository.create_time_entry(entry.clone()).await?;

        info!(
            time_entry_id = %entry.id(),
            subject = %principal.user_id(),
            project_code = %entry.project_code(),
            task_name = %entry.task_name(),
            "time entry logged"
        );

        self.append_audit_event(
            principal,
            &entry,
            AuditAction::TimeEntryLogged,
            format!(
                "logged time on '{}/{}'",
                entry.project_code(),
                entry.task_name()
            ),
        )
        .await;

        Ok(entry)
    }
}
