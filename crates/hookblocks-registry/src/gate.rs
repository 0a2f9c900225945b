//! Publish gate: a record cannot become active without a hook name.

use serde::Serialize;
use tracing::warn;

use hookblocks_entity::record::{ContentRecord, RecordStatus};

/// Message shown when a publish is rejected.
pub const MISSING_HOOK_REASON: &str = "A hook name is required before this block can be published.";

/// Result of a publish attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum GateDecision {
    /// The transition may proceed.
    Allow,
    /// The transition is refused; the record stays a draft.
    Reject {
        /// User-facing reason.
        reason: String,
    },
}

impl GateDecision {
    /// Whether the transition was allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Checks transitions into `published`.
///
/// The check runs on the transition edge only. Saving a record that is
/// already published is never re-checked, so a published record whose hook
/// was later cleared stays published (and inactive) until it is unpublished.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationGate;

impl ValidationGate {
    /// Creates the gate.
    pub fn new() -> Self {
        Self
    }

    /// Whether a status change is a transition the gate inspects.
    pub fn applies(from: RecordStatus, to: RecordStatus) -> bool {
        to.is_published() && !from.is_published()
    }

    /// Decides a publish attempt for a record.
    pub fn on_publish_attempt(&self, record: &ContentRecord) -> GateDecision {
        if record.has_hook() {
            GateDecision::Allow
        } else {
            GateDecision::Reject {
                reason: MISSING_HOOK_REASON.to_string(),
            }
        }
    }

    /// Applies the gate to a record that was moved from `previous` into its
    /// current status. A rejected record is reverted to draft.
    pub fn enforce(&self, record: &mut ContentRecord, previous: RecordStatus) -> GateDecision {
        if !Self::applies(previous, record.status) {
            return GateDecision::Allow;
        }

        let decision = self.on_publish_attempt(record);
        if let GateDecision::Reject { reason } = &decision {
            warn!(record_id = %record.id, reason = %reason, "Publish rejected");
            record.status = RecordStatus::Draft;
        }
        decision
    }
}
