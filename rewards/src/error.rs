//! Reward engine errors.

use sluice_claims::ClaimError;
use sluice_types::{ClaimId, RewardId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RewardError {
    #[error("reward {0} not found")]
    RewardNotFound(RewardId),

    #[error("claim {0} not found")]
    ClaimNotFound(ClaimId),

    #[error("caller does not own this claim or reward")]
    NotOwner,

    #[error("claim {0} is not active")]
    NotActive(ClaimId),

    #[error("claim {0} already has an active reward")]
    RewardAlreadyExists(ClaimId),

    #[error("claim registry error: {0}")]
    Claim(#[from] ClaimError),
}
