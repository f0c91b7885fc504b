//! The key-value seam
//!
//! Durable state is written as opaque string blobs under fixed namespace
//! keys, mirroring a browser's local storage. Implementations must make
//! `put` all-or-nothing per key; there is no cross-key transaction.

use crate::error::StoreError;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Key-value storage for durable console state
pub trait KvStore: Send + Sync {
    /// Read the blob stored under `key`, if any
    ///
    /// # Errors
    /// Returns [`StoreError`] on storage failure; a missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous blob
    ///
    /// # Errors
    /// Returns [`StoreError`] on storage failure.
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the blob under `key`; deleting a missing key is fine
    ///
    /// # Errors
    /// Returns [`StoreError`] on storage failure.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and default wiring
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().remove(key);
        Ok(())
    }
}
