//! Capabilities and derived permissions
//!
//! Capabilities are assigned explicitly per role. The rank table below only
//! seeds defaults when a role is created or when a snapshot carries no
//! override; afterwards a role's powers come from its own set, so a custom
//! role reordered between Administrator and the bottom keeps exactly the
//! capabilities it was given.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named administrative capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Create and edit member/representative records
    ManageUsers,
    /// View the users-access page
    ViewUsersAccess,
    /// Change console configuration
    Configure,
    /// Approve or reject pending changes
    ApproveChanges,
    /// Manage the role registry itself
    ManageAdmins,
}

impl Capability {
    /// All capabilities, in declaration order
    pub const ALL: [Capability; 5] = [
        Capability::ManageUsers,
        Capability::ViewUsersAccess,
        Capability::Configure,
        Capability::ApproveChanges,
        Capability::ManageAdmins,
    ];
}

/// Set of capabilities held by one role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// Empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set holding every capability
    #[must_use]
    pub fn all() -> Self {
        Self(Capability::ALL.into_iter().collect())
    }

    /// Default capabilities for a role at the given rank
    ///
    /// Rank 0 (root) holds everything; rank 1 (Administrator) only views
    /// users-access; every deeper rank gets the assistant set. New and
    /// snapshot-restored roles without an explicit set start here.
    #[must_use]
    pub fn defaults_for_rank(rank: u32) -> Self {
        match rank {
            0 => Self::all(),
            1 => Self::from_iter([Capability::ViewUsersAccess]),
            _ => Self::from_iter([
                Capability::ManageUsers,
                Capability::Configure,
                Capability::ApproveChanges,
            ]),
        }
    }

    /// Whether the capability is held
    #[inline]
    #[must_use]
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Grant a capability
    pub fn grant(&mut self, capability: Capability) {
        self.0.insert(capability);
    }

    /// Revoke a capability, returning whether it was held
    pub fn revoke(&mut self, capability: Capability) -> bool {
        self.0.remove(&capability)
    }

    /// Number of capabilities held
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no capability is held
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over held capabilities
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Flattened permission view for one role
///
/// Derived from the role's rank and capability set; unknown role ids
/// derive [`RolePermissions::none`]. Presentation layers read this instead
/// of touching the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissions {
    pub is_super_admin: bool,
    pub is_admin: bool,
    pub is_admin_assistant: bool,
    capabilities: CapabilitySet,
}

impl RolePermissions {
    /// Derive the view from a rank and explicit capability set
    #[must_use]
    pub fn derive(rank: u32, capabilities: CapabilitySet) -> Self {
        Self {
            is_super_admin: rank == 0,
            is_admin: rank == 1,
            is_admin_assistant: rank >= 2,
            capabilities,
        }
    }

    /// View for an unknown role: no kind, no capabilities
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the role holds a capability
    #[inline]
    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }

    #[inline]
    #[must_use]
    pub fn can_manage_users(&self) -> bool {
        self.can(Capability::ManageUsers)
    }

    #[inline]
    #[must_use]
    pub fn can_view_users_access(&self) -> bool {
        self.can(Capability::ViewUsersAccess)
    }

    #[inline]
    #[must_use]
    pub fn can_configure(&self) -> bool {
        self.can(Capability::Configure)
    }

    #[inline]
    #[must_use]
    pub fn can_approve_changes(&self) -> bool {
        self.can(Capability::ApproveChanges)
    }

    #[inline]
    #[must_use]
    pub fn can_manage_admins(&self) -> bool {
        self.can(Capability::ManageAdmins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_rank_zero_holds_everything() {
        let set = CapabilitySet::defaults_for_rank(0);
        for capability in Capability::ALL {
            assert!(set.contains(capability), "missing {capability:?}");
        }
    }

    #[test]
    fn defaults_rank_one_is_view_only() {
        let set = CapabilitySet::defaults_for_rank(1);
        assert!(set.contains(Capability::ViewUsersAccess));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn defaults_deep_ranks_get_assistant_set() {
        for rank in [2, 3, 17] {
            let set = CapabilitySet::defaults_for_rank(rank);
            assert!(set.contains(Capability::ManageUsers));
            assert!(set.contains(Capability::Configure));
            assert!(set.contains(Capability::ApproveChanges));
            assert!(!set.contains(Capability::ViewUsersAccess));
            assert!(!set.contains(Capability::ManageAdmins));
        }
    }

    #[test]
    fn grant_and_revoke() {
        let mut set = CapabilitySet::new();
        set.grant(Capability::Configure);
        assert!(set.contains(Capability::Configure));
        assert!(set.revoke(Capability::Configure));
        assert!(!set.revoke(Capability::Configure));
        assert!(set.is_empty());
    }

    #[test]
    fn derive_maps_rank_to_kind_flags() {
        let root = RolePermissions::derive(0, CapabilitySet::all());
        assert!(root.is_super_admin && !root.is_admin && !root.is_admin_assistant);

        let admin = RolePermissions::derive(1, CapabilitySet::defaults_for_rank(1));
        assert!(!admin.is_super_admin && admin.is_admin && !admin.is_admin_assistant);

        let assistant = RolePermissions::derive(5, CapabilitySet::defaults_for_rank(5));
        assert!(assistant.is_admin_assistant);
    }

    #[test]
    fn default_sets_expose_expected_flags() {
        let root = RolePermissions::derive(0, CapabilitySet::defaults_for_rank(0));
        assert!(root.can_manage_users());
        assert!(root.can_view_users_access());
        assert!(root.can_configure());
        assert!(root.can_approve_changes());
        assert!(root.can_manage_admins());

        let admin = RolePermissions::derive(1, CapabilitySet::defaults_for_rank(1));
        assert!(!admin.can_manage_users());
        assert!(admin.can_view_users_access());
        assert!(!admin.can_configure());
        assert!(!admin.can_approve_changes());
        assert!(!admin.can_manage_admins());

        let assistant = RolePermissions::derive(2, CapabilitySet::defaults_for_rank(2));
        assert!(assistant.can_manage_users());
        assert!(!assistant.can_view_users_access());
        assert!(assistant.can_configure());
        assert!(assistant.can_approve_changes());
        assert!(!assistant.can_manage_admins());
    }

    #[test]
    fn none_view_denies_everything() {
        let none = RolePermissions::none();
        assert!(!none.is_super_admin);
        for capability in Capability::ALL {
            assert!(!none.can(capability));
        }
    }

    #[test]
    fn custom_set_survives_rank_semantics() {
        // A demoted role keeps exactly what it was granted.
        let mut set = CapabilitySet::defaults_for_rank(1);
        set.grant(Capability::ApproveChanges);
        let view = RolePermissions::derive(4, set);
        assert!(view.is_admin_assistant);
        assert!(view.can_approve_changes());
        assert!(!view.can_manage_users());
    }
}
