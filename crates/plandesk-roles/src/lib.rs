//! Plandesk Roles
//!
//! Ranked role registry with explicit per-role capability sets.
//!
//! # Core Concepts
//!
//! - [`Role`]: `{ id, name, rank }` where rank 0 is the protected
//!   `super-admin` root role.
//! - [`RoleRegistry`]: ordered role list with add/rename/remove/move and
//!   snapshot (de)serialization with corrupt-input fallback.
//! - [`Capability`] / [`CapabilitySet`]: named capabilities assigned
//!   explicitly per role. Rank only seeds the defaults for new roles; it
//!   never silently grants powers afterwards.
//! - [`RolePermissions`]: flattened boolean view derived for one role,
//!   consumed by presentation layers.
//!
//! # Example
//!
//! ```rust
//! use plandesk_roles::{Capability, RoleRegistry};
//!
//! let mut registry = RoleRegistry::with_defaults();
//! let auditor = registry.add_role("Auditor").unwrap();
//!
//! assert_eq!(registry.rank(&auditor.id), Some(3));
//! assert!(registry
//!     .permissions(&auditor.id)
//!     .can(Capability::ApproveChanges));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod capability;
mod error;
mod registry;
mod role;
mod snapshot;

// Re-exports
pub use capability::{Capability, CapabilitySet, RolePermissions};
pub use error::RoleError;
pub use registry::RoleRegistry;
pub use role::{Role, RoleId, SUPER_ADMIN_ROLE_ID};
pub use snapshot::{RegistrySnapshot, SnapshotError};
