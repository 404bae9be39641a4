//! Milestone errors.

use sluice_types::ProjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MilestoneError {
    #[error("project {project} has no milestone at index {index}")]
    MilestoneNotFound { project: ProjectId, index: u32 },

    #[error("milestone {index} of project {project} is already past Pending")]
    MilestoneAlreadyUnlocked { project: ProjectId, index: u32 },

    #[error("attestation key does not name a verified attestation")]
    InvalidAttestation,

    #[error("unlock amount must be non-zero")]
    InvalidAmount,
}
