//! Attestation-specific errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttestationError {
    #[error("signature does not verify against the attestation digest")]
    InvalidSignature,

    #[error("signer {0} is not an authorized verifier")]
    UnauthorizedVerifier(String),

    #[error("an attestation with this key already exists")]
    AttestationExists,

    #[error("payment {0} already has a verified proof")]
    AlreadyVerified(String),
}
