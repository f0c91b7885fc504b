//! Registry snapshots
//!
//! The durable form of the role registry: the full role list plus the
//! explicit capability set per role. Persistence itself (where the blob
//! lives, fallback on corruption) belongs to the store layer; this module
//! only defines the shape and its validation.

use crate::capability::CapabilitySet;
use crate::registry::RoleRegistry;
use crate::role::{Role, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serialized registry state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// All roles; any order, re-sorted by rank on restore
    pub roles: Vec<Role>,
    /// Explicit capability sets; roles absent here get rank defaults
    #[serde(default)]
    pub capabilities: HashMap<RoleId, CapabilitySet>,
}

/// Snapshot validation failures
///
/// A failed restore is not an error to the caller of the store layer; it
/// falls back to the default registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// Snapshot holds no roles at all
    #[error("snapshot contains no roles")]
    Empty,

    /// Snapshot lacks the protected root role
    #[error("snapshot is missing the super-admin role")]
    MissingRoot,

    /// Root role is not at rank 0
    #[error("super-admin role is not at rank 0 (found rank {0})")]
    RootDisplaced(u32),
}

impl RegistrySnapshot {
    /// Capture the current registry state
    #[must_use]
    pub fn capture(registry: &RoleRegistry) -> Self {
        Self {
            roles: registry.roles().to_vec(),
            capabilities: registry.capability_map().clone(),
        }
    }

    /// Validate and restore a registry
    ///
    /// # Errors
    /// Returns a [`SnapshotError`] when the snapshot is empty, lacks the
    /// root role, or has the root displaced from rank 0. Callers fall back
    /// to [`RoleRegistry::with_defaults`] on any error.
    pub fn restore(self) -> Result<RoleRegistry, SnapshotError> {
        if self.roles.is_empty() {
            return Err(SnapshotError::Empty);
        }
        let root = self
            .roles
            .iter()
            .find(|role| role.id.is_super_admin())
            .ok_or(SnapshotError::MissingRoot)?;
        if root.rank != 0 {
            return Err(SnapshotError::RootDisplaced(root.rank));
        }

        let mut roles = self.roles;
        roles.sort_by_key(|role| role.rank);
        Ok(RoleRegistry::from_parts(roles, self.capabilities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capability;
    use pretty_assertions::assert_eq;

    #[test]
    fn capture_restore_roundtrip() {
        let mut registry = RoleRegistry::with_defaults();
        registry.add_role("Auditor").unwrap();
        let restored = RegistrySnapshot::capture(&registry).restore().unwrap();
        assert_eq!(restored, registry);
    }

    #[test]
    fn roundtrips_through_json() {
        let registry = RoleRegistry::with_defaults();
        let snapshot = RegistrySnapshot::capture(&registry);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: RegistrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.restore().unwrap(), registry);
    }

    #[test]
    fn empty_snapshot_is_rejected() {
        let snapshot = RegistrySnapshot {
            roles: Vec::new(),
            capabilities: HashMap::new(),
        };
        assert_eq!(snapshot.restore(), Err(SnapshotError::Empty));
    }

    #[test]
    fn snapshot_without_root_is_rejected() {
        let snapshot = RegistrySnapshot {
            roles: vec![Role {
                id: RoleId::from("admin"),
                name: "Administrator".to_string(),
                rank: 0,
            }],
            capabilities: HashMap::new(),
        };
        assert_eq!(snapshot.restore(), Err(SnapshotError::MissingRoot));
    }

    #[test]
    fn displaced_root_is_rejected() {
        let snapshot = RegistrySnapshot {
            roles: vec![
                Role {
                    id: RoleId::from("admin"),
                    name: "Administrator".to_string(),
                    rank: 0,
                },
                Role {
                    id: RoleId::super_admin(),
                    name: "Super Administrator".to_string(),
                    rank: 1,
                },
            ],
            capabilities: HashMap::new(),
        };
        assert_eq!(snapshot.restore(), Err(SnapshotError::RootDisplaced(1)));
    }

    #[test]
    fn restore_sorts_by_rank_and_seeds_missing_capabilities() {
        let snapshot = RegistrySnapshot {
            roles: vec![
                Role {
                    id: RoleId::from("admin"),
                    name: "Administrator".to_string(),
                    rank: 1,
                },
                Role {
                    id: RoleId::super_admin(),
                    name: "Super Administrator".to_string(),
                    rank: 0,
                },
            ],
            capabilities: HashMap::new(),
        };
        let registry = snapshot.restore().unwrap();
        assert_eq!(registry.roles()[0].id.as_str(), "super-admin");
        // Seeded from rank defaults.
        assert!(registry
            .permissions(&RoleId::from("admin"))
            .can(Capability::ViewUsersAccess));
    }
}
