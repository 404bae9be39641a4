//! Attestation verification for the SLUICE settlement engine.
//!
//! Two externally-sourced facts enter the ledger through this crate, and
//! nowhere else:
//! - **Milestone attestations**: signed assertions by an authorized verifier
//!   that a project milestone was completed. Gate milestone unlocks.
//! - **Payment proofs**: admin-submitted records of externally-observed
//!   payments. Recorded exactly once per payment reference.

pub mod attestation;
pub mod digest;
pub mod error;
pub mod proof;
pub mod verifier;

pub use attestation::MilestoneAttestation;
pub use digest::{attestation_digest, attestation_key, ATTESTATION_DIGEST_VERSION};
pub use error::AttestationError;
pub use proof::{PaymentProof, PaymentProofSubmission};
pub use verifier::AttestationVerifier;
