//! The pending-change store
//!
//! Holds the per-representative pending map and the applied-edits overlay.
//! State machine per representative id:
//!
//! ```text
//! None -> Submitted -> (Approved | PartiallyApproved | Rejected) -> None
//! ```
//!
//! Pending entries are consumed by approval or rejection; applied edits
//! only ever grow. All methods are authorization-free by design (see the
//! crate docs).

use indexmap::IndexMap;
use plandesk_patch::{MemberPatch, MemberRecord, PatchError};
use plandesk_roles::RoleId;
use tracing::debug;

use crate::outcome::ReviewOutcome;
use crate::pending::PendingChange;

/// In-memory pending-change store
#[derive(Debug, Clone, Default)]
pub struct ReviewStore {
    /// Outstanding proposal per representative id
    pending: IndexMap<String, PendingChange>,
    /// Accumulated approved or directly applied edits, never deleted
    applied: IndexMap<String, MemberPatch>,
    /// Most recent review outcome per representative id
    outcomes: IndexMap<String, ReviewOutcome>,
}

impl ReviewStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a proposal, replacing any outstanding one
    ///
    /// The store does not merge with a prior proposal; callers that want
    /// cumulative submissions pre-merge before calling.
    pub fn submit(&mut self, rep_id: &str, proposed: MemberPatch, submitted_by: Option<RoleId>) {
        debug!(rep_id, submitted_by = ?submitted_by, "change submitted");
        self.pending
            .insert(rep_id.to_string(), PendingChange::submitted(proposed, submitted_by));
    }

    /// Approve the full outstanding proposal
    ///
    /// Merges the whole proposal into the applied overlay, consumes the
    /// pending entry, and records an all-accepted outcome. `None` when no
    /// proposal is outstanding (missing-entity no-op).
    pub fn approve(&mut self, rep_id: &str) -> Option<MemberPatch> {
        let change = self.pending.shift_remove(rep_id)?;
        debug!(rep_id, "change approved");
        self.merge_into_applied(rep_id, &change.proposed);
        self.outcomes.insert(
            rep_id.to_string(),
            ReviewOutcome::approved(change.proposed.field_paths()),
        );
        Some(change.proposed)
    }

    /// Approve only part of the outstanding proposal
    ///
    /// `approved` must be the caller-filtered subset of the proposal;
    /// fields the reviewer rejected are silently dropped, never applied.
    /// The whole pending entry is consumed either way. `None` when no
    /// proposal is outstanding.
    pub fn approve_partial(
        &mut self,
        rep_id: &str,
        approved: MemberPatch,
        outcome: ReviewOutcome,
    ) -> Option<MemberPatch> {
        self.pending.shift_remove(rep_id)?;
        debug!(rep_id, status = ?outcome.status, "change partially approved");
        if !approved.is_empty() {
            self.merge_into_applied(rep_id, &approved);
        }
        self.outcomes.insert(rep_id.to_string(), outcome);
        Some(approved)
    }

    /// Reject the outstanding proposal outright
    ///
    /// The proposal is discarded; applied edits are untouched. The comment
    /// is kept on the recorded outcome for display. `None` when no
    /// proposal is outstanding.
    pub fn reject(&mut self, rep_id: &str, comment: &str) -> Option<PendingChange> {
        let change = self.pending.shift_remove(rep_id)?;
        debug!(rep_id, comment, "change rejected");
        self.outcomes.insert(
            rep_id.to_string(),
            ReviewOutcome::rejected(change.proposed.field_paths(), comment),
        );
        Some(change)
    }

    /// Apply edits directly, bypassing review
    ///
    /// Merges into the applied overlay without touching the pending map;
    /// the unconditional-authority path.
    pub fn apply_direct(&mut self, rep_id: &str, patch: &MemberPatch) {
        debug!(rep_id, "edits applied directly");
        self.merge_into_applied(rep_id, patch);
    }

    /// Effective details: base record with applied edits merged on top
    ///
    /// Returns the base unchanged when no edits were ever applied.
    ///
    /// # Errors
    /// Returns [`PatchError`] if the merge round-trip fails.
    pub fn effective_details(&self, base: &MemberRecord) -> Result<MemberRecord, PatchError> {
        match self.applied.get(&base.id) {
            Some(patch) => patch.apply_to(base),
            None => Ok(base.clone()),
        }
    }

    /// Outstanding proposal for a representative
    #[inline]
    #[must_use]
    pub fn pending_for(&self, rep_id: &str) -> Option<&PendingChange> {
        self.pending.get(rep_id)
    }

    /// Accumulated applied edits for a representative
    #[inline]
    #[must_use]
    pub fn applied_for(&self, rep_id: &str) -> Option<&MemberPatch> {
        self.applied.get(rep_id)
    }

    /// Most recent review outcome for a representative
    #[inline]
    #[must_use]
    pub fn outcome_for(&self, rep_id: &str) -> Option<&ReviewOutcome> {
        self.outcomes.get(rep_id)
    }

    /// All outstanding proposals, in submission order
    pub fn pending(&self) -> impl Iterator<Item = (&str, &PendingChange)> {
        self.pending.iter().map(|(id, change)| (id.as_str(), change))
    }

    /// Number of outstanding proposals
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn merge_into_applied(&mut self, rep_id: &str, patch: &MemberPatch) {
        let merged = match self.applied.get(rep_id) {
            Some(existing) => existing.merge(patch),
            None => patch.clone(),
        };
        self.applied.insert(rep_id.to_string(), merged);
    }
}
