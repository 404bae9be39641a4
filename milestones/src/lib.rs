//! Project milestones and their unlock gating.
//!
//! A milestone moves Pending → Unlocked exactly once, and only against a
//! verified attestation. Unlocking is a gate, not a transfer: no funds move
//! here. The Completed state is reserved for an external process and has no
//! transition in this engine.

pub mod book;
pub mod error;
pub mod milestone;

pub use book::MilestoneBook;
pub use error::MilestoneError;
pub use milestone::Milestone;
