use super::*;

impl TimeEntryService {
    /// Moves an entry to another project and task.
    ///
    /// Requires edit rights on both projects. Moving to a different project
    /// clears the tag set because tags are project-scoped.
    pub async fn move_task_to_project(
        &self,
        principal: &Principal,
        id: TimeEntryId,
        new_project_code: &str,
        new_task_name: &str,
    ) -> AppResult<TimeEntry> {
        let mut entry = self.load_entry(id).await?;
        let outcome = self.authorization_service.authorize_transition(
            principal,
            TimeEntryAction::Move,
            Some(&entry),
            &[
                ResourcePath::for_project(entry.project_code().as_str()),
                ResourcePath::for_project(new_project_code),
            ],
        )?;
        let expected_status = entry.status();

        // Only a different target project has to accept new time.
        let project = if entry.project_code().as_str() == new_project_code {
            self.validator.validate_project(new_project_code).await?
        } else {
            self.validator
                .validate_active_project(new_project_code)
                .await?
        };
        let task = self
            .validator
            .validate_task(project.code().as_str(), new_task_name)
            .await?;

        let previous_project = entry.project_code().clone();
        let tags_cleared = entry.reassign(project.code().as_str(), task.name().as_str())?;
        if tags_cleared {
            info!(
                time_entry_id = %entry.id(),
                from_project = %previous_project,
                to_project = %project.code(),
                "cleared project-scoped tags on move"
            );
        }

        self.commit_transition(
            principal,
            entry,
            expected_status,
            outcome,
            None,
            AuditAction::TimeEntryMoved,
        )
        .await
    }
}
