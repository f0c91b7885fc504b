//! Error types for the console facade

use plandesk_patch::PatchError;
use plandesk_roles::{Capability, RoleError, RoleId};
use plandesk_store::StoreError;

/// Main console error type
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Role registry rejected the operation
    #[error("role operation failed: {0}")]
    Role(#[from] RoleError),

    /// Durable storage failed
    #[error("storage failed: {0}")]
    Store(#[from] StoreError),

    /// Patch application failed
    #[error("patch failed: {0}")]
    Patch(#[from] PatchError),

    /// Acting role lacks the required capability or authority
    #[error("role '{actor}' is not authorized ({required:?} required)")]
    NotAuthorized {
        /// The acting role
        actor: RoleId,
        /// The capability the operation needs
        required: Capability,
    },

    /// Representative id is not in the directory
    #[error("unknown member '{0}'")]
    UnknownMember(String),
}

impl ConsoleError {
    /// Whether this is an authorization failure
    #[inline]
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotAuthorized { .. })
    }
}
