//! Role identity and model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id of the protected root role. Always present, always rank 0.
pub const SUPER_ADMIN_ROLE_ID: &str = "super-admin";

/// Opaque role identifier
///
/// The three built-in roles use well-known string ids; freshly added roles
/// get a UUID v4 string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    /// Generate a fresh opaque id
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The protected root role id
    #[inline]
    #[must_use]
    pub fn super_admin() -> Self {
        Self(SUPER_ADMIN_ROLE_ID.to_string())
    }

    /// Whether this is the protected root role
    #[inline]
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.0 == SUPER_ADMIN_ROLE_ID
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RoleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One role in the registry
///
/// `rank` is a dense order: 0 is the root role; after an add or move the
/// registry keeps ranks contiguous, while a remove leaves a gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub rank: u32,
}

impl Role {
    /// Create a role with a fresh id
    #[must_use]
    pub fn new(name: impl Into<String>, rank: u32) -> Self {
        Self {
            id: RoleId::generate(),
            name: name.into(),
            rank,
        }
    }
}
