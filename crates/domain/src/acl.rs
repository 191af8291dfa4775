//! Access-control lists carried in identity claims.
//!
//! Claims use the flat grammar `<resource>=<letter>,<letter>,...` where each
//! letter is one of `V`, `E`, `T`, `A` or `M`. Resource paths are compared by
//! exact string equality; there is no wildcard or hierarchical matching.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use timekeep_core::{AppError, AppResult};

use crate::{Permission, PermissionSet};

const PROJECT_RESOURCE_PREFIX: &str = "Project/";

/// Key identifying a protected resource, for example `Project/INTERNAL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// Creates a resource path from its raw claim form.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "resource path must not be empty".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the resource path protecting one project.
    #[must_use]
    pub fn for_project(project_code: &str) -> Self {
        Self(format!("{PROJECT_RESOURCE_PREFIX}{project_code}"))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ResourcePath {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// One parsed `(resource path, permission set)` grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclEntry {
    resource_path: ResourcePath,
    permissions: PermissionSet,
}

impl AclEntry {
    /// Creates a grant from already typed values.
    #[must_use]
    pub fn new(resource_path: ResourcePath, permissions: PermissionSet) -> Self {
        Self {
            resource_path,
            permissions,
        }
    }

    /// Parses one raw claim string.
    pub fn parse(claim: &str) -> Result<Self, MalformedAclClaim> {
        let malformed = |reason: &str| MalformedAclClaim {
            claim: claim.to_owned(),
            reason: reason.to_owned(),
        };

        let Some((resource, letters)) = claim.split_once('=') else {
            return Err(malformed("missing '=' separator"));
        };

        let resource = resource.trim();
        if resource.is_empty() {
            return Err(malformed("missing resource path"));
        }

        if letters.trim().is_empty() {
            return Err(malformed("missing permission letters"));
        }

        let mut permissions = PermissionSet::new();
        for letter in letters.split(',') {
            let letter = letter.trim();
            let Some(permission) = Permission::from_letter(letter) else {
                return Err(malformed(
                    format!("unknown permission letter '{letter}'").as_str(),
                ));
            };
            permissions.insert(permission);
        }

        Ok(Self {
            resource_path: ResourcePath(resource.to_owned()),
            permissions,
        })
    }

    /// Returns the protected resource path.
    #[must_use]
    pub fn resource_path(&self) -> &ResourcePath {
        &self.resource_path
    }

    /// Returns granted permissions.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }
}

/// ACL claim that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedAclClaim {
    /// Raw claim value.
    pub claim: String,
    /// Parse failure reason.
    pub reason: String,
}

/// How malformed claims are treated while building an ACL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AclParseMode {
    /// Drops malformed claims and keeps every valid grant.
    #[default]
    Lenient,
    /// Rejects the whole claim set when any claim is malformed.
    Strict,
}

impl AclParseMode {
    /// Returns a stable configuration value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }

    /// Parses a configuration value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(AppError::Validation(format!(
                "acl parse mode must be either 'lenient' or 'strict', got '{other}'"
            ))),
        }
    }
}

/// Result of parsing a claim set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAcl {
    /// Effective access-control list.
    pub acl: AccessControlList,
    /// Claims dropped by lenient parsing.
    pub dropped: Vec<MalformedAclClaim>,
}

/// Lookup of resource path to granted permissions for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessControlList {
    grants: BTreeMap<ResourcePath, PermissionSet>,
}

impl AccessControlList {
    /// Parses raw claim strings. Grants for the same resource path are merged.
    pub fn parse<S: AsRef<str>>(claims: &[S], mode: AclParseMode) -> AppResult<ParsedAcl> {
        let mut acl = Self::default();
        let mut dropped = Vec::new();

        for claim in claims {
            match AclEntry::parse(claim.as_ref()) {
                Ok(entry) => acl.grant(entry),
                Err(malformed) if mode == AclParseMode::Strict => {
                    return Err(AppError::Validation(format!(
                        "malformed acl claim '{}': {}",
                        malformed.claim, malformed.reason
                    )));
                }
                Err(malformed) => dropped.push(malformed),
            }
        }

        Ok(ParsedAcl { acl, dropped })
    }

    /// Adds one grant, merging with existing grants on the same resource path.
    pub fn grant(&mut self, entry: AclEntry) {
        self.grants
            .entry(entry.resource_path)
            .or_default()
            .merge(&entry.permissions);
    }

    /// Returns granted permissions for an exact resource path.
    #[must_use]
    pub fn permissions_for(&self, resource_path: &ResourcePath) -> Option<&PermissionSet> {
        self.grants.get(resource_path)
    }

    /// Returns whether the permission is granted on the exact resource path.
    #[must_use]
    pub fn allows(&self, resource_path: &ResourcePath, permission: Permission) -> bool {
        self.permissions_for(resource_path)
            .is_some_and(|permissions| permissions.contains(permission))
    }

    /// Returns the number of resource paths with grants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Returns whether no grants are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{AccessControlList, AclEntry, AclParseMode, ResourcePath};
    use crate::Permission;

    #[test]
    fn parses_single_and_multiple_letters() {
        let parsed = AccessControlList::parse(
            &["Project/INTERNAL=T", "Project/CLIENT-A=V, E,A"],
            AclParseMode::Lenient,
        );
        assert!(parsed.is_ok());
        let Ok(parsed) = parsed else { return };

        assert!(parsed.dropped.is_empty());
        let internal = ResourcePath::for_project("INTERNAL");
        let client = ResourcePath::for_project("CLIENT-A");
        assert!(parsed.acl.allows(&internal, Permission::Track));
        assert!(!parsed.acl.allows(&internal, Permission::Edit));
        assert!(parsed.acl.allows(&client, Permission::View));
        assert!(parsed.acl.allows(&client, Permission::Edit));
        assert!(parsed.acl.allows(&client, Permission::Approve));
        assert!(!parsed.acl.allows(&client, Permission::Manage));
    }

    #[test]
    fn lenient_mode_drops_malformed_claims() {
        let parsed = AccessControlList::parse(
            &[
                "Project/INTERNAL=T",
                "Project/BROKEN",
                "Project/ODD=V,X",
                "=V",
                "Project/EMPTY=",
            ],
            AclParseMode::Lenient,
        );
        assert!(parsed.is_ok());
        let Ok(parsed) = parsed else { return };

        assert_eq!(parsed.acl.len(), 1);
        assert_eq!(parsed.dropped.len(), 4);
        assert!(
            parsed
                .acl
                .allows(&ResourcePath::for_project("INTERNAL"), Permission::Track)
        );
        assert!(
            parsed
                .acl
                .permissions_for(&ResourcePath::for_project("ODD"))
                .is_none()
        );
    }

    #[test]
    fn strict_mode_rejects_whole_claim_set() {
        let parsed = AccessControlList::parse(
            &["Project/INTERNAL=T", "Project/ODD=Q"],
            AclParseMode::Strict,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn duplicate_resource_claims_are_merged() {
        let parsed = AccessControlList::parse(
            &["Project/INTERNAL=T", "Project/INTERNAL=A"],
            AclParseMode::Lenient,
        );
        let Ok(parsed) = parsed else {
            panic!("claims should parse");
        };
        let internal = ResourcePath::for_project("INTERNAL");
        assert!(parsed.acl.allows(&internal, Permission::Track));
        assert!(parsed.acl.allows(&internal, Permission::Approve));
    }

    #[test]
    fn resource_paths_match_exactly() {
        let parsed = AccessControlList::parse(&["Project/INTERNAL=E"], AclParseMode::Lenient);
        let Ok(parsed) = parsed else {
            panic!("claims should parse");
        };
        assert!(
            !parsed
                .acl
                .allows(&ResourcePath::for_project("internal"), Permission::Edit)
        );
        assert!(
            !parsed
                .acl
                .allows(&ResourcePath::for_project("INTERNAL/SUB"), Permission::Edit)
        );
    }

    #[test]
    fn missing_separator_reports_reason() {
        let result = AclEntry::parse("Project/INTERNAL");
        assert!(result.is_err());
        let reason = result.err().map(|error| error.reason).unwrap_or_default();
        assert_eq!(reason, "missing '=' separator");
    }

    #[test]
    fn parse_mode_reads_configuration_values() {
        assert_eq!(
            AclParseMode::parse(" Strict ").ok(),
            Some(AclParseMode::Strict)
        );
        assert_eq!(
            AclParseMode::parse("lenient").ok(),
            Some(AclParseMode::Lenient)
        );
        assert!(AclParseMode::parse("permissive").is_err());
    }

    fn valid_letters() -> impl Strategy<Value = Vec<&'static str>> {
        prop::collection::vec(prop::sample::select(vec!["V", "E", "T", "A", "M"]), 1..5)
    }

    proptest! {
        #[test]
        fn unknown_letter_drops_only_its_claim(
            good_codes in prop::collection::btree_set("[A-Z]{2,8}", 1..6),
            letters in valid_letters(),
            bad_letter in "[BCDFGHIJKLNOPQRSUWXYZ]",
        ) {
            let mut claims: Vec<String> = good_codes
                .iter()
                .map(|code| format!("Project/{code}={}", letters.join(",")))
                .collect();
            claims.insert(claims.len() / 2, format!("Project/zz-bad={},{bad_letter}", letters.join(",")));

            let parsed = AccessControlList::parse(&claims, AclParseMode::Lenient);
            prop_assert!(parsed.is_ok());
            let Ok(parsed) = parsed else { return Ok(()) };

            prop_assert_eq!(parsed.dropped.len(), 1);
            prop_assert_eq!(parsed.acl.len(), good_codes.len());
            prop_assert!(parsed.acl.permissions_for(&ResourcePath::for_project("zz-bad")).is_none());
            for code in &good_codes {
                let path = ResourcePath::for_project(code);
                for letter in &letters {
                    let permission = Permission::from_letter(letter);
                    prop_assert!(permission.is_some_and(|permission| parsed.acl.allows(&path, permission)));
                }
            }
        }
    }
}
