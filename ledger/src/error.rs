//! Ledger-level errors, aggregating the component errors.

use sluice_attestation::AttestationError;
use sluice_claims::ClaimError;
use sluice_milestones::MilestoneError;
use sluice_revenue::RevenueError;
use sluice_rewards::RewardError;
use sluice_types::ProjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),

    #[error("project {0} is not active")]
    ProjectInactive(ProjectId),

    #[error("payment {0} was already processed for this project")]
    DuplicatePayment(String),

    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("payment {0} has no verified proof")]
    UnverifiedPayment(String),

    #[error("contribution is below one basis point of the funding target")]
    ContributionTooSmall,

    #[error("contribution exceeds the representable share range")]
    InvalidShare,

    #[error("operation requires the administrator")]
    AdminOnly,

    #[error("operation requires the project creator")]
    NotCreator,

    #[error("operation rejected: the ledger is executing another operation")]
    ReentrantCall,

    #[error("claim error: {0}")]
    Claim(#[from] ClaimError),

    #[error("reward error: {0}")]
    Reward(#[from] RewardError),

    #[error("revenue error: {0}")]
    Revenue(#[from] RevenueError),

    #[error("milestone error: {0}")]
    Milestone(#[from] MilestoneError),

    #[error("attestation error: {0}")]
    Attestation(#[from] AttestationError),

    #[error("storage error: {0}")]
    Store(String),
}
