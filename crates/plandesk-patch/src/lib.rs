//! Plandesk Patch System
//!
//! Typed member patches with JSON deep-merge semantics.
//!
//! # Core Concepts
//!
//! - [`deep_merge`]: Recursive combination of two JSON values. Objects merge
//!   field-by-field; every other value (arrays included) is replaced
//!   wholesale by the patch side.
//! - [`MemberPatch`]: All-optional projection of a [`MemberRecord`] — the
//!   fields someone wants to change.
//! - [`FieldPath`]: Dotted path naming one patch field, used for per-field
//!   review decisions.
//!
//! # Example
//!
//! ```rust
//! use plandesk_patch::{MemberPatch, MemberRecord};
//!
//! let base = MemberRecord::new("R1", "Janet", "Doe");
//! let patch = MemberPatch {
//!     first_name: Some("Jane".to_string()),
//!     ..MemberPatch::default()
//! };
//!
//! let effective = patch.apply_to(&base).unwrap();
//! assert_eq!(effective.first_name, "Jane");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod error;
mod member;
mod merge;

// Re-exports
pub use error::PatchError;
pub use member::{
    Address, AddressPatch, ContactPatch, EmergencyContact, FieldPath, MemberPatch, MemberRecord,
};
pub use merge::deep_merge;
