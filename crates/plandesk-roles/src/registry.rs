//! Role registry
//!
//! Ordered list of roles with a protected root. The registry owns the
//! per-role capability sets; rank only decides the defaults a role is
//! seeded with, never its powers afterwards.

use crate::capability::{CapabilitySet, RolePermissions};
use crate::error::RoleError;
use crate::role::{Role, RoleId};
use std::collections::HashMap;

/// Ordered role registry
///
/// # Invariants
/// - The `super-admin` role is always present at rank 0.
/// - Ranks are strictly increasing in list order; after an add or move they
///   are contiguous `0..len`, while a remove leaves a gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRegistry {
    /// Roles sorted by rank, ascending
    roles: Vec<Role>,
    /// Explicit capability set per role id
    capabilities: HashMap<RoleId, CapabilitySet>,
}

impl RoleRegistry {
    /// The three built-in roles: Super Administrator, Administrator,
    /// Administrator Assistant.
    #[must_use]
    pub fn with_defaults() -> Self {
        let roles = vec![
            Role {
                id: RoleId::super_admin(),
                name: "Super Administrator".to_string(),
                rank: 0,
            },
            Role {
                id: RoleId::from("admin"),
                name: "Administrator".to_string(),
                rank: 1,
            },
            Role {
                id: RoleId::from("admin-assistant"),
                name: "Administrator Assistant".to_string(),
                rank: 2,
            },
        ];
        let capabilities = roles
            .iter()
            .map(|role| (role.id.clone(), CapabilitySet::defaults_for_rank(role.rank)))
            .collect();
        Self {
            roles,
            capabilities,
        }
    }

    /// Rebuild from parts, used by snapshot decoding. Roles must already be
    /// rank-sorted; missing capability entries are seeded from rank
    /// defaults.
    pub(crate) fn from_parts(
        roles: Vec<Role>,
        mut capabilities: HashMap<RoleId, CapabilitySet>,
    ) -> Self {
        for role in &roles {
            capabilities
                .entry(role.id.clone())
                .or_insert_with(|| CapabilitySet::defaults_for_rank(role.rank));
        }
        capabilities.retain(|id, _| roles.iter().any(|role| &role.id == id));
        Self {
            roles,
            capabilities,
        }
    }

    /// Add a role at the bottom of the order
    ///
    /// The new rank is one past the current maximum; capabilities are
    /// seeded from the rank defaults.
    ///
    /// # Errors
    /// [`RoleError::EmptyName`] if `name` trims to empty.
    pub fn add_role(&mut self, name: &str) -> Result<Role, RoleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RoleError::EmptyName);
        }
        let rank = self.roles.iter().map(|role| role.rank).max().map_or(0, |r| r + 1);
        let role = Role::new(name, rank);
        self.capabilities
            .insert(role.id.clone(), CapabilitySet::defaults_for_rank(rank));
        self.roles.push(role.clone());
        Ok(role)
    }

    /// Rename a role
    ///
    /// # Errors
    /// [`RoleError::ProtectedRole`] for `super-admin`,
    /// [`RoleError::EmptyName`] for a blank name,
    /// [`RoleError::UnknownRole`] if `id` does not exist.
    pub fn rename_role(&mut self, id: &RoleId, name: &str) -> Result<(), RoleError> {
        if id.is_super_admin() {
            return Err(RoleError::ProtectedRole(id.clone()));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(RoleError::EmptyName);
        }
        let role = self
            .roles
            .iter_mut()
            .find(|role| &role.id == id)
            .ok_or_else(|| RoleError::UnknownRole(id.clone()))?;
        role.name = name.to_string();
        Ok(())
    }

    /// Remove a role, leaving a gap in the rank sequence
    ///
    /// # Errors
    /// [`RoleError::ProtectedRole`] for `super-admin`,
    /// [`RoleError::UnknownRole`] if `id` does not exist.
    pub fn remove_role(&mut self, id: &RoleId) -> Result<Role, RoleError> {
        if id.is_super_admin() {
            return Err(RoleError::ProtectedRole(id.clone()));
        }
        let index = self
            .roles
            .iter()
            .position(|role| &role.id == id)
            .ok_or_else(|| RoleError::UnknownRole(id.clone()))?;
        self.capabilities.remove(id);
        Ok(self.roles.remove(index))
    }

    /// Move a role to a new position and renumber
    ///
    /// The target position is clamped into `[1, len - 1]`, so nothing can
    /// displace the root. Afterwards every role's rank equals its list
    /// index, restoring contiguity even if removals had left gaps.
    ///
    /// # Errors
    /// [`RoleError::ProtectedRole`] for `super-admin`,
    /// [`RoleError::UnknownRole`] if `id` does not exist.
    pub fn move_role(&mut self, id: &RoleId, new_rank: u32) -> Result<(), RoleError> {
        if id.is_super_admin() {
            return Err(RoleError::ProtectedRole(id.clone()));
        }
        let from = self
            .roles
            .iter()
            .position(|role| &role.id == id)
            .ok_or_else(|| RoleError::UnknownRole(id.clone()))?;

        let last = self.roles.len().saturating_sub(1);
        let target = (new_rank as usize).clamp(1, last.max(1));

        let role = self.roles.remove(from);
        self.roles.insert(target, role);
        self.renumber();
        Ok(())
    }

    fn renumber(&mut self) {
        for (index, role) in self.roles.iter_mut().enumerate() {
            role.rank = u32::try_from(index).unwrap_or(u32::MAX);
        }
    }

    /// Look up a role by id
    #[inline]
    #[must_use]
    pub fn role(&self, id: &RoleId) -> Option<&Role> {
        self.roles.iter().find(|role| &role.id == id)
    }

    /// Rank of a role, `None` for unknown ids
    #[inline]
    #[must_use]
    pub fn rank(&self, id: &RoleId) -> Option<u32> {
        self.role(id).map(|role| role.rank)
    }

    /// Roles strictly below the given role, ascending by rank
    ///
    /// Unknown ids have nothing below them.
    #[must_use]
    pub fn roles_below(&self, id: &RoleId) -> Vec<&Role> {
        let Some(rank) = self.rank(id) else {
            return Vec::new();
        };
        self.roles.iter().filter(|role| role.rank > rank).collect()
    }

    /// All roles, ascending by rank
    #[inline]
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Number of roles
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the registry holds no roles (never true after construction)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Replace a role's capability set
    ///
    /// # Errors
    /// [`RoleError::UnknownRole`] if `id` does not exist.
    pub fn set_capabilities(&mut self, id: &RoleId, set: CapabilitySet) -> Result<(), RoleError> {
        if self.role(id).is_none() {
            return Err(RoleError::UnknownRole(id.clone()));
        }
        self.capabilities.insert(id.clone(), set);
        Ok(())
    }

    /// A role's explicit capability set, `None` for unknown ids
    #[inline]
    #[must_use]
    pub fn capabilities(&self, id: &RoleId) -> Option<&CapabilitySet> {
        self.capabilities.get(id)
    }

    /// Derived permission view for a role
    ///
    /// Unknown ids derive the all-false view.
    #[must_use]
    pub fn permissions(&self, id: &RoleId) -> RolePermissions {
        match (self.rank(id), self.capabilities.get(id)) {
            (Some(rank), Some(set)) => RolePermissions::derive(rank, set.clone()),
            _ => RolePermissions::none(),
        }
    }

    pub(crate) fn capability_map(&self) -> &HashMap<RoleId, CapabilitySet> {
        &self.capabilities
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
