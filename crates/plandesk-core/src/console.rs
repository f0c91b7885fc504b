//! The admin console facade
//!
//! One `AdminConsole` is constructed at process start and shared by
//! reference with every consumer; readers and the single logical writer go
//! through the internal locks. This is where authorization happens — the
//! review store underneath trusts its callers completely.

use indexmap::IndexMap;
use parking_lot::RwLock;
use plandesk_patch::{FieldPath, MemberPatch, MemberRecord};
use plandesk_review::{FieldDecision, PendingChange, ReviewOutcome, ReviewStore};
use plandesk_roles::{Capability, CapabilitySet, Role, RoleId, RolePermissions, RoleRegistry};
use plandesk_store::{registry, KvStore};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::directory::MemberDirectory;
use crate::error::ConsoleError;

/// The console service object
///
/// Owns all mutable workflow state. The role registry is persisted to the
/// key-value store after every successful mutation; everything else is
/// in-memory only.
pub struct AdminConsole {
    kv: Arc<dyn KvStore>,
    directory: Arc<dyn MemberDirectory>,
    registry: RwLock<RoleRegistry>,
    review: RwLock<ReviewStore>,
}

impl AdminConsole {
    /// Construct the console, restoring the role registry from storage
    ///
    /// A missing or corrupt registry blob restores the default roles.
    ///
    /// # Errors
    /// Returns [`ConsoleError::Store`] only on storage I/O failure.
    pub fn new(
        kv: Arc<dyn KvStore>,
        directory: Arc<dyn MemberDirectory>,
    ) -> Result<Self, ConsoleError> {
        let restored = registry::load_registry(kv.as_ref())?;
        Ok(Self {
            kv,
            directory,
            registry: RwLock::new(restored),
            review: RwLock::new(ReviewStore::new()),
        })
    }

    // ---- roles ----------------------------------------------------------

    /// All roles, ascending by rank
    #[must_use]
    pub fn roles(&self) -> Vec<Role> {
        self.registry.read().roles().to_vec()
    }

    /// Derived permission view for a role (all-false for unknown ids)
    #[must_use]
    pub fn permissions(&self, role_id: &RoleId) -> RolePermissions {
        self.registry.read().permissions(role_id)
    }

    /// Roles strictly below the given role, ascending by rank
    #[must_use]
    pub fn roles_below(&self, role_id: &RoleId) -> Vec<Role> {
        self.registry
            .read()
            .roles_below(role_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Add a role at the bottom of the order
    ///
    /// # Errors
    /// [`ConsoleError::NotAuthorized`] without [`Capability::ManageAdmins`];
    /// otherwise the underlying [`plandesk_roles::RoleError`] or a storage
    /// failure while persisting.
    #[instrument(skip(self))]
    pub fn add_role(&self, actor: &RoleId, name: &str) -> Result<Role, ConsoleError> {
        self.require(actor, Capability::ManageAdmins)?;
        let mut reg = self.registry.write();
        let role = reg.add_role(name)?;
        registry::save_registry(self.kv.as_ref(), &reg)?;
        info!(actor = %actor, role = %role.id, "role added");
        Ok(role)
    }

    /// Rename a role
    ///
    /// # Errors
    /// As [`AdminConsole::add_role`], plus the registry's protected-role
    /// and unknown-role errors.
    #[instrument(skip(self))]
    pub fn rename_role(&self, actor: &RoleId, id: &RoleId, name: &str) -> Result<(), ConsoleError> {
        self.require(actor, Capability::ManageAdmins)?;
        let mut reg = self.registry.write();
        reg.rename_role(id, name)?;
        registry::save_registry(self.kv.as_ref(), &reg)?;
        info!(actor = %actor, role = %id, "role renamed");
        Ok(())
    }

    /// Remove a role
    ///
    /// # Errors
    /// As [`AdminConsole::rename_role`].
    #[instrument(skip(self))]
    pub fn remove_role(&self, actor: &RoleId, id: &RoleId) -> Result<Role, ConsoleError> {
        self.require(actor, Capability::ManageAdmins)?;
        let mut reg = self.registry.write();
        let removed = reg.remove_role(id)?;
        registry::save_registry(self.kv.as_ref(), &reg)?;
        info!(actor = %actor, role = %id, "role removed");
        Ok(removed)
    }

    /// Move a role to a new position
    ///
    /// # Errors
    /// As [`AdminConsole::rename_role`].
    #[instrument(skip(self))]
    pub fn move_role(&self, actor: &RoleId, id: &RoleId, new_rank: u32) -> Result<(), ConsoleError> {
        self.require(actor, Capability::ManageAdmins)?;
        let mut reg = self.registry.write();
        reg.move_role(id, new_rank)?;
        registry::save_registry(self.kv.as_ref(), &reg)?;
        info!(actor = %actor, role = %id, new_rank, "role moved");
        Ok(())
    }

    /// Replace a role's capability set
    ///
    /// # Errors
    /// As [`AdminConsole::rename_role`].
    #[instrument(skip(self, set))]
    pub fn set_capabilities(
        &self,
        actor: &RoleId,
        id: &RoleId,
        set: CapabilitySet,
    ) -> Result<(), ConsoleError> {
        self.require(actor, Capability::ManageAdmins)?;
        let mut reg = self.registry.write();
        reg.set_capabilities(id, set)?;
        registry::save_registry(self.kv.as_ref(), &reg)?;
        info!(actor = %actor, role = %id, "capabilities replaced");
        Ok(())
    }

    // ---- pending changes ------------------------------------------------

    /// Submit proposed edits for review
    ///
    /// An outstanding proposal for the same representative is folded into
    /// the new one before submission, so earlier unreviewed edits are not
    /// lost.
    ///
    /// # Errors
    /// [`ConsoleError::NotAuthorized`] without [`Capability::ManageUsers`];
    /// [`ConsoleError::UnknownMember`] for an id the directory does not
    /// know.
    #[instrument(skip(self, patch))]
    pub fn submit_change(
        &self,
        actor: &RoleId,
        rep_id: &str,
        patch: MemberPatch,
    ) -> Result<(), ConsoleError> {
        self.require(actor, Capability::ManageUsers)?;
        if self.directory.member(rep_id).is_none() {
            return Err(ConsoleError::UnknownMember(rep_id.to_string()));
        }
        let mut review = self.review.write();
        let proposed = match review.pending_for(rep_id) {
            Some(outstanding) => outstanding.proposed.merge(&patch),
            None => patch,
        };
        review.submit(rep_id, proposed, Some(actor.clone()));
        info!(actor = %actor, rep_id, "change submitted");
        Ok(())
    }

    /// Approve the full outstanding proposal
    ///
    /// Returns the applied patch, or `None` when nothing was pending.
    ///
    /// # Errors
    /// [`ConsoleError::NotAuthorized`] without [`Capability::ApproveChanges`]
    /// or when the submitter outranks the actor (see
    /// [`AdminConsole::can_review`]).
    #[instrument(skip(self))]
    pub fn approve_change(
        &self,
        actor: &RoleId,
        rep_id: &str,
    ) -> Result<Option<MemberPatch>, ConsoleError> {
        self.require(actor, Capability::ApproveChanges)?;
        let mut review = self.review.write();
        let Some(pending) = review.pending_for(rep_id) else {
            return Ok(None);
        };
        self.authorize_review(actor, pending)?;
        let applied = review.approve(rep_id);
        info!(actor = %actor, rep_id, "change approved");
        Ok(applied)
    }

    /// Review the outstanding proposal field by field
    ///
    /// Accepted fields are applied; rejected fields are dropped with their
    /// reasons recorded. Proposed fields without a decision are dropped as
    /// well — the whole pending entry is consumed either way. Returns the
    /// applied subset, or `None` when nothing was pending.
    ///
    /// # Errors
    /// As [`AdminConsole::approve_change`].
    #[instrument(skip(self, decisions))]
    pub fn review_change(
        &self,
        actor: &RoleId,
        rep_id: &str,
        decisions: IndexMap<FieldPath, FieldDecision>,
    ) -> Result<Option<MemberPatch>, ConsoleError> {
        self.require(actor, Capability::ApproveChanges)?;
        let mut review = self.review.write();
        let Some(pending) = review.pending_for(rep_id) else {
            return Ok(None);
        };
        self.authorize_review(actor, pending)?;

        let accepted: Vec<FieldPath> = decisions
            .iter()
            .filter(|(_, decision)| decision.is_accepted())
            .map(|(path, _)| path.clone())
            .collect();
        let approved = pending.proposed.retain(&accepted);
        let outcome = ReviewOutcome::partial(decisions);
        let applied = review.approve_partial(rep_id, approved, outcome);
        info!(actor = %actor, rep_id, accepted = accepted.len(), "change reviewed");
        Ok(applied)
    }

    /// Reject the outstanding proposal outright
    ///
    /// Returns the discarded change, or `None` when nothing was pending.
    ///
    /// # Errors
    /// As [`AdminConsole::approve_change`].
    #[instrument(skip(self))]
    pub fn reject_change(
        &self,
        actor: &RoleId,
        rep_id: &str,
        comment: &str,
    ) -> Result<Option<PendingChange>, ConsoleError> {
        self.require(actor, Capability::ApproveChanges)?;
        let mut review = self.review.write();
        let Some(pending) = review.pending_for(rep_id) else {
            return Ok(None);
        };
        self.authorize_review(actor, pending)?;
        let rejected = review.reject(rep_id, comment);
        info!(actor = %actor, rep_id, "change rejected");
        Ok(rejected)
    }

    /// Apply edits directly, bypassing review
    ///
    /// The unconditional-authority path: super-admin only.
    ///
    /// # Errors
    /// [`ConsoleError::NotAuthorized`] for any other role;
    /// [`ConsoleError::UnknownMember`] for an unknown id.
    #[instrument(skip(self, patch))]
    pub fn edit_directly(
        &self,
        actor: &RoleId,
        rep_id: &str,
        patch: MemberPatch,
    ) -> Result<(), ConsoleError> {
        if !self.permissions(actor).is_super_admin {
            return Err(ConsoleError::NotAuthorized {
                actor: actor.clone(),
                required: Capability::ManageUsers,
            });
        }
        if self.directory.member(rep_id).is_none() {
            return Err(ConsoleError::UnknownMember(rep_id.to_string()));
        }
        self.review.write().apply_direct(rep_id, &patch);
        info!(actor = %actor, rep_id, "edits applied directly");
        Ok(())
    }

    // ---- derived views --------------------------------------------------

    /// Effective details: directory base with applied edits on top
    ///
    /// # Errors
    /// [`ConsoleError::UnknownMember`] for an id the directory does not
    /// know.
    pub fn member_details(&self, rep_id: &str) -> Result<MemberRecord, ConsoleError> {
        let base = self
            .directory
            .member(rep_id)
            .ok_or_else(|| ConsoleError::UnknownMember(rep_id.to_string()))?;
        Ok(self.review.read().effective_details(&base)?)
    }

    /// Effective details for every directory member
    ///
    /// # Errors
    /// Propagates patch failures from the merge round-trip.
    pub fn all_member_details(&self) -> Result<Vec<MemberRecord>, ConsoleError> {
        let review = self.review.read();
        self.directory
            .members()
            .iter()
            .map(|base| review.effective_details(base).map_err(ConsoleError::from))
            .collect()
    }

    /// Outstanding proposal for a representative
    #[must_use]
    pub fn pending_change(&self, rep_id: &str) -> Option<PendingChange> {
        self.review.read().pending_for(rep_id).cloned()
    }

    /// All outstanding proposals, in submission order
    #[must_use]
    pub fn pending_changes(&self) -> Vec<(String, PendingChange)> {
        self.review
            .read()
            .pending()
            .map(|(id, change)| (id.to_string(), change.clone()))
            .collect()
    }

    /// Most recent review outcome for a representative
    #[must_use]
    pub fn review_outcome(&self, rep_id: &str) -> Option<ReviewOutcome> {
        self.review.read().outcome_for(rep_id).cloned()
    }

    /// Accumulated applied edits for a representative
    #[must_use]
    pub fn applied_edits(&self, rep_id: &str) -> Option<MemberPatch> {
        self.review.read().applied_for(rep_id).cloned()
    }

    // ---- authorization --------------------------------------------------

    fn require(&self, actor: &RoleId, capability: Capability) -> Result<(), ConsoleError> {
        if self.permissions(actor).can(capability) {
            return Ok(());
        }
        Err(ConsoleError::NotAuthorized {
            actor: actor.clone(),
            required: capability,
        })
    }

    /// The review authority rule, on top of [`Capability::ApproveChanges`]:
    /// super-admin reviews anything; any other role only reviews proposals
    /// submitted by a role strictly below its own rank. A proposal with no
    /// recorded submitter takes super-admin.
    fn authorize_review(
        &self,
        actor: &RoleId,
        pending: &PendingChange,
    ) -> Result<(), ConsoleError> {
        let reg = self.registry.read();
        if reg.permissions(actor).is_super_admin {
            return Ok(());
        }
        let allowed = match (&pending.submitted_by, reg.rank(actor)) {
            (Some(submitter), Some(actor_rank)) => {
                reg.rank(submitter).map_or(false, |submitter_rank| submitter_rank > actor_rank)
            }
            _ => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(ConsoleError::NotAuthorized {
                actor: actor.clone(),
                required: Capability::ApproveChanges,
            })
        }
    }
}

impl std::fmt::Debug for AdminConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConsole")
            .field("roles", &self.registry.read().len())
            .field("pending", &self.review.read().pending_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StaticDirectory;
    use plandesk_store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn console() -> AdminConsole {
        let directory = StaticDirectory::seeded([
            MemberRecord::new("R1", "Janet", "Doe"),
            MemberRecord::new("R2", "Sam", "Lee"),
        ]);
        AdminConsole::new(Arc::new(MemoryStore::new()), Arc::new(directory)).unwrap()
    }

    fn jane_patch() -> MemberPatch {
        MemberPatch {
            first_name: Some("Jane".to_string()),
            ..MemberPatch::default()
        }
    }

    #[test]
    fn starts_with_default_roles() {
        let console = console();
        let names: Vec<String> = console.roles().into_iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "Super Administrator",
                "Administrator",
                "Administrator Assistant"
            ]
        );
    }

    #[test]
    fn submit_requires_manage_users() {
        let console = console();
        // Administrator (rank 1) defaults have no ManageUsers.
        let err = console
            .submit_change(&RoleId::from("admin"), "R1", jane_patch())
            .unwrap_err();
        assert!(err.is_authorization());

        // Assistant (rank 2) defaults do.
        console
            .submit_change(&RoleId::from("admin-assistant"), "R1", jane_patch())
            .unwrap();
        assert!(console.pending_change("R1").is_some());
    }

    #[test]
    fn submit_for_unknown_member_fails() {
        let console = console();
        let err = console
            .submit_change(&RoleId::super_admin(), "R9", jane_patch())
            .unwrap_err();
        assert!(matches!(err, ConsoleError::UnknownMember(_)));
    }

    #[test]
    fn resubmit_merges_with_outstanding_proposal() {
        let console = console();
        let assistant = RoleId::from("admin-assistant");
        console.submit_change(&assistant, "R1", jane_patch()).unwrap();
        console
            .submit_change(
                &assistant,
                "R1",
                MemberPatch {
                    email: Some("jane@example.com".to_string()),
                    ..MemberPatch::default()
                },
            )
            .unwrap();

        let pending = console.pending_change("R1").unwrap();
        assert_eq!(pending.proposed.first_name.as_deref(), Some("Jane"));
        assert_eq!(pending.proposed.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn super_admin_approves_anything() {
        let console = console();
        console
            .submit_change(&RoleId::from("admin-assistant"), "R1", jane_patch())
            .unwrap();
        let applied = console
            .approve_change(&RoleId::super_admin(), "R1")
            .unwrap()
            .unwrap();
        assert_eq!(applied, jane_patch());
        assert_eq!(console.member_details("R1").unwrap().first_name, "Jane");
    }

    #[test]
    fn approve_without_pending_is_noop() {
        let console = console();
        assert!(console
            .approve_change(&RoleId::super_admin(), "R1")
            .unwrap()
            .is_none());
    }

    #[test]
    fn rank_rule_blocks_approving_peers_and_superiors() {
        let console = console();
        let root = RoleId::super_admin();
        let admin = RoleId::from("admin");

        // Give the admin approval capability for this test; the rank rule
        // still applies on top.
        let mut set = CapabilitySet::defaults_for_rank(1);
        set.grant(Capability::ApproveChanges);
        set.grant(Capability::ManageUsers);
        console.set_capabilities(&root, &admin, set).unwrap();

        // Submitted by the admin itself: equal rank, not reviewable.
        console.submit_change(&admin, "R1", jane_patch()).unwrap();
        let err = console.approve_change(&admin, "R1").unwrap_err();
        assert!(err.is_authorization());

        // Submitted by the assistant below: reviewable.
        console
            .submit_change(&RoleId::from("admin-assistant"), "R2", jane_patch())
            .unwrap();
        assert!(console.approve_change(&admin, "R2").unwrap().is_some());
    }

    #[test]
    fn assistant_cannot_approve_despite_capability_without_lower_submitter() {
        let console = console();
        let assistant = RoleId::from("admin-assistant");
        console.submit_change(&assistant, "R1", jane_patch()).unwrap();
        // Assistant holds ApproveChanges by default, but nothing ranks
        // below it here.
        let err = console.approve_change(&assistant, "R1").unwrap_err();
        assert!(err.is_authorization());
    }

    #[test]
    fn edit_directly_is_super_admin_only() {
        let console = console();
        let err = console
            .edit_directly(&RoleId::from("admin-assistant"), "R1", jane_patch())
            .unwrap_err();
        assert!(err.is_authorization());

        console
            .edit_directly(&RoleId::super_admin(), "R1", jane_patch())
            .unwrap();
        assert_eq!(console.member_details("R1").unwrap().first_name, "Jane");
        assert!(console.pending_change("R1").is_none());
    }

    #[test]
    fn role_mutations_require_manage_admins() {
        let console = console();
        let err = console
            .add_role(&RoleId::from("admin"), "Auditor")
            .unwrap_err();
        assert!(err.is_authorization());

        let role = console.add_role(&RoleId::super_admin(), "Auditor").unwrap();
        assert_eq!(role.rank, 3);
    }

    #[test]
    fn registry_mutations_are_persisted() {
        let kv = Arc::new(MemoryStore::new());
        let directory = Arc::new(StaticDirectory::new());
        let console = AdminConsole::new(kv.clone(), directory.clone()).unwrap();
        let auditor = console.add_role(&RoleId::super_admin(), "Auditor").unwrap();
        drop(console);

        // A fresh console over the same store sees the mutation.
        let console = AdminConsole::new(kv, directory).unwrap();
        assert_eq!(console.roles().len(), 4);
        assert!(console.permissions(&auditor.id).is_admin_assistant);
    }

    #[test]
    fn review_change_applies_only_accepted_fields() {
        let console = console();
        let assistant = RoleId::from("admin-assistant");
        console
            .submit_change(
                &assistant,
                "R1",
                MemberPatch {
                    first_name: Some("Jane".to_string()),
                    email: Some("bad@nowhere".to_string()),
                    ..MemberPatch::default()
                },
            )
            .unwrap();

        let mut decisions = IndexMap::new();
        decisions.insert(FieldPath::from("first_name"), FieldDecision::Accepted);
        decisions.insert(
            FieldPath::from("email"),
            FieldDecision::Rejected {
                reason: "unreachable domain".to_string(),
            },
        );
        let applied = console
            .review_change(&RoleId::super_admin(), "R1", decisions)
            .unwrap()
            .unwrap();
        assert_eq!(applied.first_name.as_deref(), Some("Jane"));
        assert!(applied.email.is_none());

        let details = console.member_details("R1").unwrap();
        assert_eq!(details.first_name, "Jane");
        assert_ne!(details.email, "bad@nowhere");

        let outcome = console.review_outcome("R1").unwrap();
        assert_eq!(outcome.accepted_paths(), vec![FieldPath::from("first_name")]);
    }

    #[test]
    fn reject_keeps_applied_edits_and_records_comment() {
        let console = console();
        let root = RoleId::super_admin();
        console.edit_directly(&root, "R1", jane_patch()).unwrap();

        console
            .submit_change(
                &RoleId::from("admin-assistant"),
                "R1",
                MemberPatch {
                    phone: Some("555-0100".to_string()),
                    ..MemberPatch::default()
                },
            )
            .unwrap();
        console.reject_change(&root, "R1", "wrong member").unwrap();

        assert!(console.pending_change("R1").is_none());
        assert_eq!(console.applied_edits("R1").unwrap(), jane_patch());
        assert_eq!(
            console.review_outcome("R1").unwrap().comment.as_deref(),
            Some("wrong member")
        );
    }

    #[test]
    fn unknown_actor_is_denied_everywhere() {
        let console = console();
        let ghost = RoleId::from("ghost");
        assert!(console.submit_change(&ghost, "R1", jane_patch()).unwrap_err().is_authorization());
        assert!(console.add_role(&ghost, "X").unwrap_err().is_authorization());
        assert!(console
            .edit_directly(&ghost, "R1", jane_patch())
            .unwrap_err()
            .is_authorization());
    }
}
