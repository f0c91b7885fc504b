//! Plandesk Review
//!
//! The pending-change store: proposed member edits are submitted, reviewed
//! (fully, field-by-field, or rejected), and folded into a per-member
//! applied overlay.
//!
//! # Core Concepts
//!
//! - [`PendingChange`]: one outstanding proposal per representative id.
//! - [`ReviewStore`]: the state machine per representative —
//!   `None → Submitted → (Approved | PartiallyApproved | Rejected) → None`.
//! - [`ReviewOutcome`]: per-field accept/reject bookkeeping from the most
//!   recent review, kept for display.
//!
//! # Trust boundary
//!
//! The store performs **no authorization**. Anything holding a mutable
//! reference can approve arbitrary pending changes; capability checks and
//! the submitter-rank rule live in the console facade that wraps it.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod outcome;
mod pending;
mod store;

// Re-exports
pub use outcome::{FieldDecision, ReviewOutcome};
pub use pending::{ChangeStatus, PendingChange};
pub use store::ReviewStore;
