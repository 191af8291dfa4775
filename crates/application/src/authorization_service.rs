use timekeep_core::{AppError, AppResult, IdentityClaims};
use timekeep_domain::{
    AclParseMode, OwnershipRule, Permission, Principal, ResourcePath, TimeEntry, TimeEntryAction,
    TransitionOutcome, lifecycle,
};
use tracing::warn;

/// Stateless permission checker over the caller's parsed ACL.
///
/// Every time entry mutation goes through [`AuthorizationService::authorize_transition`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationService {
    acl_parse_mode: AclParseMode,
}

impl AuthorizationService {
    /// Creates an authorization service.
    #[must_use]
    pub fn new(acl_parse_mode: AclParseMode) -> Self {
        Self { acl_parse_mode }
    }

    /// Returns the configured ACL parse mode.
    #[must_use]
    pub fn acl_parse_mode(&self) -> AclParseMode {
        self.acl_parse_mode
    }

    /// Builds the request principal from raw identity claims.
    pub fn resolve_principal(&self, claims: &IdentityClaims) -> AppResult<Principal> {
        let principal = Principal::from_claims(claims, self.acl_parse_mode)?;

        for dropped in principal.dropped_claims() {
            warn!(
                subject = %principal.user_id(),
                claim = %dropped.claim,
                reason = %dropped.reason,
                "dropped malformed acl claim"
            );
        }

        Ok(principal)
    }

    /// Returns whether the principal holds the permission on the resource path.
    #[must_use]
    pub fn has_permission(
        &self,
        principal: &Principal,
        resource_path: &ResourcePath,
        permission: Permission,
    ) -> bool {
        principal.is_granted(resource_path, permission)
    }

    /// Returns whether the principal owns the entry.
    #[must_use]
    pub fn is_owner(&self, principal: &Principal, entry: &TimeEntry) -> bool {
        entry.is_owned_by(principal.user_id())
    }

    /// Returns whether the principal may act on records owned by others.
    #[must_use]
    pub fn can_act_on_others_record(
        &self,
        principal: &Principal,
        resource_path: &ResourcePath,
    ) -> bool {
        self.has_permission(principal, resource_path, Permission::Manage)
    }

    /// Ensures the principal holds the permission on the resource path.
    pub fn require_permission(
        &self,
        principal: &Principal,
        resource_path: &ResourcePath,
        permission: Permission,
    ) -> AppResult<()> {
        if self.has_permission(principal, resource_path, permission) {
            return Ok(());
        }

        Err(self.deny(principal, resource_path, permission.as_str(), None))
    }

    /// Authorizes one lifecycle action.
    ///
    /// Checks run in order: status gate, permission on every resource path,
    /// then ownership against the first resource path (the entry's current
    /// project). `entry` is `None` only for [`TimeEntryAction::Create`].
    pub fn authorize_transition(
        &self,
        principal: &Principal,
        action: TimeEntryAction,
        entry: Option<&TimeEntry>,
        resource_paths: &[ResourcePath],
    ) -> AppResult<TransitionOutcome> {
        let rule = lifecycle::rule_for(action);
        let outcome = rule.transition(entry.map(TimeEntry::status))?;

        let Some(primary_path) = resource_paths.first() else {
            return Err(AppError::Internal(format!(
                "action '{action}' was authorized without a resource path"
            )));
        };

        for resource_path in resource_paths {
            let granted = rule
                .required_any
                .iter()
                .any(|permission| self.has_permission(principal, resource_path, *permission));
            if !granted {
                return Err(self.deny(
                    principal,
                    resource_path,
                    rule.requirement_label().as_str(),
                    Some(action),
                ));
            }
        }

        let owns_entry = entry.is_some_and(|entry| self.is_owner(principal, entry));
        match rule.ownership {
            OwnershipRule::CallerBecomesOwner | OwnershipRule::AnyHolder => {}
            OwnershipRule::OwnerOnly if !owns_entry => {
                return Err(self.deny(principal, primary_path, "owner", Some(action)));
            }
            OwnershipRule::OwnerOrManager
                if !owns_entry && !self.can_act_on_others_record(principal, primary_path) =>
            {
                return Err(self.deny(principal, primary_path, "owner or manage", Some(action)));
            }
            OwnershipRule::OwnerOnly | OwnershipRule::OwnerOrManager => {}
        }

        Ok(outcome)
    }

    fn deny(
        &self,
        principal: &Principal,
        resource_path: &ResourcePath,
        requirement: &str,
        action: Option<TimeEntryAction>,
    ) -> AppError {
        warn!(
            subject = %principal.user_id(),
            resource_path = %resource_path,
            requirement,
            action = action.map(|action| action.as_str()).unwrap_or("none"),
            "authorization denied"
        );

        AppError::authorization(resource_path.as_str(), requirement)
    }
}
