//! Plandesk Store
//!
//! Local key-value persistence for durable console state.
//!
//! # Core Concepts
//!
//! - [`KvStore`]: the storage seam — opaque string blobs under namespaced
//!   keys. The rest of the workspace never touches the filesystem
//!   directly.
//! - [`FileStore`]: one JSON file per key in a local directory, written
//!   via temp-file-and-rename.
//! - [`MemoryStore`]: in-process map for tests and default wiring.
//! - [`registry`]: the role-registry snapshot codec with corrupt-state
//!   fallback — a malformed or root-less blob restores the default roles
//!   instead of propagating an error.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod error;
mod file;
mod kv;
pub mod registry;

// Re-exports
pub use error::StoreError;
pub use file::FileStore;
pub use kv::{KvStore, MemoryStore};
