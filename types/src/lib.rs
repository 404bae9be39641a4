//! Fundamental types for the SLUICE settlement engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: identities, entity ids, amounts, basis-point shares, digests,
//! timestamps, status enums, and key material.

pub mod amount;
pub mod digest;
pub mod identity;
pub mod ids;
pub mod keys;
pub mod status;
pub mod time;

pub use amount::{Amount, BasisPoints};
pub use digest::{AttestationKey, Digest};
pub use identity::Identity;
pub use ids::{ClaimId, PaymentRef, ProjectId, RewardId};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use status::{ClaimStatus, MilestoneStatus};
pub use time::Timestamp;
