//! Time entry lifecycle as an explicit transition table.
//!
//! Each action maps to one [`TransitionRule`]: the statuses it may start
//! from, the permissions that satisfy it, who may perform it, and where the
//! entry ends up. Handlers consult the table instead of branching on status.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use timekeep_core::{AppError, AppResult};

use crate::{Permission, TimeEntryStatus};

/// Mutating action on a time entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeEntryAction {
    /// Logs a new entry.
    Create,
    /// Updates entry fields.
    Update,
    /// Replaces the tag set.
    Retag,
    /// Moves the entry to another project or task.
    Move,
    /// Deletes the entry.
    Delete,
    /// Submits the entry for approval.
    Submit,
    /// Approves a submitted entry.
    Approve,
    /// Declines a submitted entry.
    Decline,
}

impl TimeEntryAction {
    /// Returns a stable action value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Retag => "retag",
            Self::Move => "move",
            Self::Delete => "delete",
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Decline => "decline",
        }
    }
}

impl Display for TimeEntryAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Who may perform an action on an existing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipRule {
    /// No prior entry; the caller becomes the owner.
    CallerBecomesOwner,
    /// The owner, or a holder of `Manage` on the project.
    OwnerOrManager,
    /// Only the owner. `Manage` does not override.
    OwnerOnly,
    /// Any holder of the required permission.
    AnyHolder,
}

/// Status an entry ends up in after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Entry is persisted in the given status.
    Enter(TimeEntryStatus),
    /// Entry is removed.
    Remove,
}

/// One row of the lifecycle table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    /// Action the rule applies to.
    pub action: TimeEntryAction,
    /// Statuses the action may start from. Empty means "no entry yet".
    pub allowed_from: &'static [TimeEntryStatus],
    /// Any one of these permissions on every involved project satisfies the rule.
    pub required_any: &'static [Permission],
    /// Ownership requirement.
    pub ownership: OwnershipRule,
    /// Resulting state.
    pub outcome: TransitionOutcome,
}

const MUTABLE: &[TimeEntryStatus] = &[TimeEntryStatus::NotReported, TimeEntryStatus::Declined];
const SUBMITTED: &[TimeEntryStatus] = &[TimeEntryStatus::Submitted];

const RULES: &[TransitionRule] = &[
    TransitionRule {
        action: TimeEntryAction::Create,
        allowed_from: &[],
        required_any: &[Permission::Track],
        ownership: OwnershipRule::CallerBecomesOwner,
        outcome: TransitionOutcome::Enter(TimeEntryStatus::NotReported),
    },
    TransitionRule {
        action: TimeEntryAction::Update,
        allowed_from: MUTABLE,
        required_any: &[Permission::Edit],
        ownership: OwnershipRule::OwnerOrManager,
        outcome: TransitionOutcome::Enter(TimeEntryStatus::NotReported),
    },
    TransitionRule {
        action: TimeEntryAction::Retag,
        allowed_from: MUTABLE,
        required_any: &[Permission::Edit],
        ownership: OwnershipRule::OwnerOrManager,
        outcome: TransitionOutcome::Enter(TimeEntryStatus::NotReported),
    },
    TransitionRule {
        action: TimeEntryAction::Move,
        allowed_from: MUTABLE,
        required_any: &[Permission::Edit],
        ownership: OwnershipRule::OwnerOrManager,
        outcome: TransitionOutcome::Enter(TimeEntryStatus::NotReported),
    },
    TransitionRule {
        action: TimeEntryAction::Delete,
        allowed_from: MUTABLE,
        required_any: &[Permission::Edit],
        ownership: OwnershipRule::OwnerOrManager,
        outcome: TransitionOutcome::Remove,
    },
    TransitionRule {
        action: TimeEntryAction::Submit,
        allowed_from: MUTABLE,
        required_any: &[Permission::Track, Permission::Edit],
        ownership: OwnershipRule::OwnerOnly,
        outcome: TransitionOutcome::Enter(TimeEntryStatus::Submitted),
    },
    TransitionRule {
        action: TimeEntryAction::Approve,
        allowed_from: SUBMITTED,
        required_any: &[Permission::Approve],
        ownership: OwnershipRule::AnyHolder,
        outcome: TransitionOutcome::Enter(TimeEntryStatus::Approved),
    },
    TransitionRule {
        action: TimeEntryAction::Decline,
        allowed_from: SUBMITTED,
        required_any: &[Permission::Approve],
        ownership: OwnershipRule::AnyHolder,
        outcome: TransitionOutcome::Enter(TimeEntryStatus::Declined),
    },
];

/// Returns the full lifecycle table.
#[must_use]
pub fn rules() -> &'static [TransitionRule] {
    RULES
}

/// Returns the rule governing one action.
#[must_use]
pub fn rule_for(action: TimeEntryAction) -> &'static TransitionRule {
    match action {
        TimeEntryAction::Create => &RULES[0],
        TimeEntryAction::Update => &RULES[1],
        TimeEntryAction::Retag => &RULES[2],
        TimeEntryAction::Move => &RULES[3],
        TimeEntryAction::Delete => &RULES[4],
        TimeEntryAction::Submit => &RULES[5],
        TimeEntryAction::Approve => &RULES[6],
        TimeEntryAction::Decline => &RULES[7],
    }
}

impl TransitionRule {
    /// Checks the current status against the rule and returns the outcome.
    /// `current` is `None` when no entry exists yet.
    pub fn transition(&self, current: Option<TimeEntryStatus>) -> AppResult<TransitionOutcome> {
        match current {
            None if self.allowed_from.is_empty() => Ok(self.outcome),
            None => Err(AppError::BusinessRule(format!(
                "action '{}' requires an existing time entry",
                self.action
            ))),
            Some(status) if self.allowed_from.contains(&status) => Ok(self.outcome),
            Some(status) => Err(AppError::BusinessRule(format!(
                "action '{}' is not allowed for a time entry in status '{}'",
                self.action, status
            ))),
        }
    }

    /// Returns a readable label of the permission requirement.
    #[must_use]
    pub fn requirement_label(&self) -> String {
        self.required_any
            .iter()
            .map(Permission::as_str)
            .collect::<Vec<_>>()
            .join(" or ")
    }
}
