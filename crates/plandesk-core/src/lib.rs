//! Plandesk Core - Admin Console Facade
//!
//! The single service object behind the console UI:
//! - Owns the role registry, the review store, and the member directory
//! - Enforces authorization in front of the trusting review store
//! - Persists the role registry after every successful mutation
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use plandesk_core::{AdminConsole, StaticDirectory};
//! use plandesk_patch::{MemberPatch, MemberRecord};
//! use plandesk_roles::RoleId;
//! use plandesk_store::MemoryStore;
//!
//! # fn example() -> Result<(), plandesk_core::ConsoleError> {
//! let directory = StaticDirectory::seeded([MemberRecord::new("R1", "Janet", "Doe")]);
//! let console = AdminConsole::new(Arc::new(MemoryStore::new()), Arc::new(directory))?;
//!
//! let assistant = RoleId::from("admin-assistant");
//! let patch = MemberPatch { first_name: Some("Jane".into()), ..MemberPatch::default() };
//! console.submit_change(&assistant, "R1", patch)?;
//!
//! console.approve_change(&RoleId::super_admin(), "R1")?;
//! assert_eq!(console.member_details("R1")?.first_name, "Jane");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod console;
mod directory;
mod error;

// Re-exports
pub use console::AdminConsole;
pub use directory::{MemberDirectory, StaticDirectory};
pub use error::ConsoleError;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the console
    pub use crate::{AdminConsole, ConsoleError, MemberDirectory, StaticDirectory};
    pub use plandesk_patch::{MemberPatch, MemberRecord};
    pub use plandesk_review::{FieldDecision, ReviewOutcome};
    pub use plandesk_roles::{Capability, RoleId, RolePermissions};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
