//! Claim registry errors.

use sluice_types::{BasisPoints, ClaimId, ClaimStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("claim {0} not found")]
    ClaimNotFound(ClaimId),

    #[error("share {0} is outside the valid range [1, 10000]")]
    InvalidShare(BasisPoints),

    #[error("claim status cannot move from {from:?} to {to:?}")]
    InvalidTransition { from: ClaimStatus, to: ClaimStatus },

    #[error("claims are not transferable")]
    NonTransferable,
}
