//! The claim registry: authoritative record of investor claims.
//!
//! A claim is a non-transferable share of a project's future revenue,
//! minted when a verified external payment is settled. The registry owns
//! the claim status state machine (Active ↔ Staked, Active → Slashed) and
//! the per-owner / per-project indexes.

pub mod claim;
pub mod error;
pub mod registry;

pub use claim::Claim;
pub use error::ClaimError;
pub use registry::ClaimRegistry;
