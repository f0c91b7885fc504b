//! Role-registry snapshot codec
//!
//! The registry is the only durable state: the full role list plus
//! capability sets, serialized as one JSON blob under a fixed namespace
//! key. Loading is forgiving — a missing, malformed, root-less, or
//! otherwise invalid blob restores the three default roles and logs a
//! warning, never an error.

use crate::error::StoreError;
use crate::kv::KvStore;
use plandesk_roles::{RegistrySnapshot, RoleRegistry};
use tracing::{debug, warn};

/// Namespace key the registry blob lives under
pub const REGISTRY_KEY: &str = "plandesk.roles";

/// Load the registry, falling back to defaults on any bad blob
///
/// # Errors
/// Returns [`StoreError`] only for storage failures (I/O); corrupt content
/// is handled by the fallback.
pub fn load_registry(store: &dyn KvStore) -> Result<RoleRegistry, StoreError> {
    let Some(blob) = store.get(REGISTRY_KEY)? else {
        debug!("no persisted registry, using defaults");
        return Ok(RoleRegistry::with_defaults());
    };

    let snapshot: RegistrySnapshot = match serde_json::from_str(&blob) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "persisted registry is malformed, using defaults");
            return Ok(RoleRegistry::with_defaults());
        }
    };

    match snapshot.restore() {
        Ok(registry) => Ok(registry),
        Err(e) => {
            warn!(error = %e, "persisted registry is invalid, using defaults");
            Ok(RoleRegistry::with_defaults())
        }
    }
}

/// Persist the full registry state
///
/// Called after every successful registry mutation.
///
/// # Errors
/// Returns [`StoreError`] on encoding or storage failure.
pub fn save_registry(store: &dyn KvStore, registry: &RoleRegistry) -> Result<(), StoreError> {
    let blob = serde_json::to_string(&RegistrySnapshot::capture(registry))?;
    store.put(REGISTRY_KEY, &blob)
}
