//! Error types for the role registry

use crate::role::RoleId;

/// Role registry errors
///
/// All of these are programming-logic-level (bad input); nothing here is
/// transient or retryable. Callers that want the legacy silent-no-op
/// behavior can discard the `Err` case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleError {
    /// Role name trims to the empty string
    #[error("role name must not be empty")]
    EmptyName,

    /// Attempt to rename, remove, or reorder the protected root role
    #[error("role '{0}' is protected and cannot be modified")]
    ProtectedRole(RoleId),

    /// No role with the given id exists
    #[error("unknown role '{0}'")]
    UnknownRole(RoleId),
}
