use timekeep_core::{AppError, AppResult, IdentityClaims};

use crate::{AccessControlList, AclParseMode, MalformedAclClaim, Permission, ResourcePath};

/// Authenticated caller for one request, with its ACL parsed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: String,
    display_name: String,
    email: Option<String>,
    acl: AccessControlList,
    dropped_claims: Vec<MalformedAclClaim>,
}

impl Principal {
    /// Creates a principal from typed values.
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        email: Option<String>,
        acl: AccessControlList,
    ) -> AppResult<Self> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(AppError::Unauthorized(
                "identity is missing a subject".to_owned(),
            ));
        }

        Ok(Self {
            user_id,
            display_name: display_name.into(),
            email,
            acl,
            dropped_claims: Vec::new(),
        })
    }

    /// Builds a principal from raw identity claims. This is the only place ACL
    /// strings are parsed.
    pub fn from_claims(claims: &IdentityClaims, mode: AclParseMode) -> AppResult<Self> {
        let parsed = AccessControlList::parse(claims.acl(), mode)?;
        let mut principal = Self::new(
            claims.subject(),
            claims.display_name(),
            claims.email().map(ToOwned::to_owned),
            parsed.acl,
        )?;
        principal.dropped_claims = parsed.dropped;

        Ok(principal)
    }

    /// Returns the stable user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the parsed access-control list.
    #[must_use]
    pub fn acl(&self) -> &AccessControlList {
        &self.acl
    }

    /// Returns claims dropped while parsing in lenient mode.
    #[must_use]
    pub fn dropped_claims(&self) -> &[MalformedAclClaim] {
        &self.dropped_claims
    }

    /// Returns whether the ACL grants the permission on the resource path.
    #[must_use]
    pub fn is_granted(&self, resource_path: &ResourcePath, permission: Permission) -> bool {
        self.acl.allows(resource_path, permission)
    }
}
