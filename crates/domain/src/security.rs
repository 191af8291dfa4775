use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use timekeep_core::AppError;

/// Permissions granted on a resource through ACL claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows reading time records of a project.
    View,
    /// Allows editing, moving, retagging and deleting time records.
    Edit,
    /// Allows logging and submitting time records.
    Track,
    /// Allows approving and declining submitted time records.
    Approve,
    /// Allows acting on time records owned by other users.
    Manage,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Track => "track",
            Self::Approve => "approve",
            Self::Manage => "manage",
        }
    }

    /// Returns the single-letter code used in ACL claims.
    #[must_use]
    pub fn letter(&self) -> char {
        match self {
            Self::View => 'V',
            Self::Edit => 'E',
            Self::Track => 'T',
            Self::Approve => 'A',
            Self::Manage => 'M',
        }
    }

    /// Resolves an ACL claim letter.
    #[must_use]
    pub fn from_letter(value: &str) -> Option<Self> {
        match value {
            "V" => Some(Self::View),
            "E" => Some(Self::Edit),
            "T" => Some(Self::Track),
            "A" => Some(Self::Approve),
            "M" => Some(Self::Manage),
            _ => None,
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::View,
            Permission::Edit,
            Permission::Track,
            Permission::Approve,
            Permission::Manage,
        ];

        ALL
    }
}

impl Display for Permission {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            "track" => Ok(Self::Track),
            "approve" => Ok(Self::Approve),
            "manage" => Ok(Self::Manage),
            _ => Err(AppError::Validation(format!(
                "unknown permission value '{value}'"
            ))),
        }
    }
}

/// Set of permissions granted on one resource path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// Creates an empty permission set.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns whether the permission is part of the set.
    #[must_use]
    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    /// Adds one permission.
    pub fn insert(&mut self, permission: Permission) {
        self.0.insert(permission);
    }

    /// Adds every permission of another set.
    pub fn merge(&mut self, other: &PermissionSet) {
        self.0.extend(other.0.iter().copied());
    }

    /// Returns whether the set grants nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates granted permissions in stable order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Stable audit actions emitted by time entry use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when time is logged.
    TimeEntryLogged,
    /// Emitted when entry fields are updated.
    TimeEntryUpdated,
    /// Emitted when an entry is moved to another project or task.
    TimeEntryMoved,
    /// Emitted when the tag set of an entry is replaced.
    TimeEntryRetagged,
    /// Emitted when an entry is deleted.
    TimeEntryDeleted,
    /// Emitted when an entry is submitted for approval.
    TimeEntrySubmitted,
    /// Emitted when an entry is approved.
    TimeEntryApproved,
    /// Emitted when an entry is declined.
    TimeEntryDeclined,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TimeEntryLogged => "time_entry.logged",
            Self::TimeEntryUpdated => "time_entry.updated",
            Self::TimeEntryMoved => "time_entry.moved",
            Self::TimeEntryRetagged => "time_entry.retagged",
            Self::TimeEntryDeleted => "time_entry.deleted",
            Self::TimeEntrySubmitted => "time_entry.submitted",
            Self::TimeEntryApproved => "time_entry.approved",
            Self::TimeEntryDeclined => "time_entry.declined",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{Permission, PermissionSet};

    #[test]
    fn permission_roundtrip_storage_value() {
        for permission in Permission::all() {
            let restored = Permission::from_str(permission.as_str());
            assert!(restored.is_ok());
            assert_eq!(restored.unwrap_or(Permission::View), *permission);
        }
    }

    #[test]
    fn permission_letters_resolve_back() {
        for permission in Permission::all() {
            let letter = permission.letter().to_string();
            assert_eq!(Permission::from_letter(letter.as_str()), Some(*permission));
        }
        assert_eq!(Permission::from_letter("X"), None);
        assert_eq!(Permission::from_letter("v"), None);
    }

    #[test]
    fn unknown_permission_is_rejected() {
        let parsed = Permission::from_str("delete");
        assert!(parsed.is_err());
    }

    #[test]
    fn permission_set_merge_is_a_union() {
        let mut left: PermissionSet = [Permission::View].into_iter().collect();
        let right: PermissionSet = [Permission::Edit, Permission::View].into_iter().collect();
        left.merge(&right);

        assert_eq!(
            left.iter().collect::<Vec<_>>(),
            vec![Permission::View, Permission::Edit]
        );
    }
}
