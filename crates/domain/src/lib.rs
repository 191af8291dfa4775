//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod acl;
mod catalog;
pub mod lifecycle;
mod principal;
mod security;
mod time_entry;

pub use acl::{AccessControlList, AclEntry, AclParseMode, MalformedAclClaim, ParsedAcl, ResourcePath};
pub use catalog::{Project, ProjectTag, ProjectTask, TagValue};
pub use lifecycle::{OwnershipRule, TimeEntryAction, TransitionOutcome, TransitionRule};
pub use principal::Principal;
pub use security::{AuditAction, Permission, PermissionSet};
pub use time_entry::{
    DateRange, NewTimeEntry, TimeEntry, TimeEntryHours, TimeEntryId, TimeEntryStatus, TimeEntryTag,
};
