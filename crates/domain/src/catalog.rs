//! Read-only project catalog data used to validate time entries.

use serde::{Deserialize, Serialize};
use timekeep_core::{AppResult, NonEmptyString};

/// Project that time can be logged against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    code: NonEmptyString,
    name: NonEmptyString,
    is_active: bool,
}

impl Project {
    /// Creates a validated project.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        is_active: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            code: NonEmptyString::new(code)?,
            name: NonEmptyString::new(name)?,
            is_active,
        })
    }

    /// Returns the project code used in resource paths.
    #[must_use]
    pub fn code(&self) -> &NonEmptyString {
        &self.code
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns active flag.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Task configured under one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTask {
    project_code: NonEmptyString,
    name: NonEmptyString,
    is_active: bool,
}

impl ProjectTask {
    /// Creates a validated project task.
    pub fn new(
        project_code: impl Into<String>,
        name: impl Into<String>,
        is_active: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            project_code: NonEmptyString::new(project_code)?,
            name: NonEmptyString::new(name)?,
            is_active,
        })
    }

    /// Returns owning project code.
    #[must_use]
    pub fn project_code(&self) -> &NonEmptyString {
        &self.project_code
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns active flag.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Allowed value of a project tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagValue {
    /// Value label stored on time entries.
    pub value: String,
    /// Inactive values are rejected for new assignments.
    pub is_active: bool,
}

impl TagValue {
    /// Creates an active tag value.
    #[must_use]
    pub fn active(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_active: true,
        }
    }
}

/// Tag configuration under one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTag {
    project_code: NonEmptyString,
    name: NonEmptyString,
    is_active: bool,
    is_required: bool,
    values: Vec<TagValue>,
}

impl ProjectTag {
    /// Creates a validated tag configuration.
    pub fn new(
        project_code: impl Into<String>,
        name: impl Into<String>,
        is_active: bool,
        is_required: bool,
        values: Vec<TagValue>,
    ) -> AppResult<Self> {
        Ok(Self {
            project_code: NonEmptyString::new(project_code)?,
            name: NonEmptyString::new(name)?,
            is_active,
            is_required,
            values,
        })
    }

    /// Returns owning project code.
    #[must_use]
    pub fn project_code(&self) -> &NonEmptyString {
        &self.project_code
    }

    /// Returns the tag name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns active flag.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns whether every entry of the project must carry this tag.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Returns configured values.
    #[must_use]
    pub fn values(&self) -> &[TagValue] {
        &self.values
    }

    /// Returns whether the value is configured and active.
    #[must_use]
    pub fn allows_value(&self, value: &str) -> bool {
        self.values
            .iter()
            .any(|candidate| candidate.is_active && candidate.value == value)
    }
}
