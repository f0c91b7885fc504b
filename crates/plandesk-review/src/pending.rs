//! Pending changes

use chrono::{DateTime, Utc};
use plandesk_patch::MemberPatch;
use plandesk_roles::RoleId;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a proposal
///
/// Only `Submitted` is ever stored; the terminal states exist on
/// [`crate::ReviewOutcome`] records after the pending entry is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    Submitted,
    Approved,
    PartiallyApproved,
    Rejected,
}

/// One outstanding proposal for a representative
///
/// A representative has at most one of these at a time; a new submission
/// replaces the entry (the facade pre-merges so nothing is lost).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChange {
    /// Always [`ChangeStatus::Submitted`] while stored
    pub status: ChangeStatus,
    /// The proposed edits
    pub proposed: MemberPatch,
    /// Role that submitted the proposal, when known
    pub submitted_by: Option<RoleId>,
    /// Submission time
    pub submitted_at: DateTime<Utc>,
}

impl PendingChange {
    /// Create a freshly submitted change
    #[must_use]
    pub fn submitted(proposed: MemberPatch, submitted_by: Option<RoleId>) -> Self {
        Self {
            status: ChangeStatus::Submitted,
            proposed,
            submitted_by,
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_change_carries_submitter() {
        let change = PendingChange::submitted(
            MemberPatch::default(),
            Some(RoleId::from("admin-assistant")),
        );
        assert_eq!(change.status, ChangeStatus::Submitted);
        assert_eq!(change.submitted_by, Some(RoleId::from("admin-assistant")));
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&ChangeStatus::PartiallyApproved).unwrap();
        assert_eq!(json, "\"partially_approved\"");
    }
}
