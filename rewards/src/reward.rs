//! The reward record.

use serde::{Deserialize, Serialize};
use sluice_types::{BasisPoints, ClaimId, Identity, ProjectId, RewardId, Timestamp};

/// A transferable token paired 1:1 with a staked claim.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reward {
    pub id: RewardId,
    /// The claim this reward is paired with (pairing ends at burn).
    pub claim_id: ClaimId,
    pub project_id: ProjectId,
    /// Share snapshot copied from the claim at stake time.
    pub share: BasisPoints,
    pub owner: Identity,
    pub active: bool,
    pub minted_at: Timestamp,
}
