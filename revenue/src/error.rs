//! Revenue engine errors.

use sluice_types::ProjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RevenueError {
    #[error("revenue amount must be non-zero")]
    ZeroAmount,

    #[error("project {0} has no pending revenue")]
    NoRevenue(ProjectId),

    #[error("project {0} has no active claims to distribute to")]
    NoActiveClaims(ProjectId),
}
