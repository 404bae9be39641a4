//! Status enums for claims and milestones.

use serde::{Deserialize, Serialize};

/// The lifecycle status of an investor claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Earning: participates in revenue distributions.
    Active,
    /// Paused: a transferable reward is outstanding against this claim.
    Staked,
    /// Terminal: removed from distribution by administrative action.
    Slashed,
}

impl ClaimStatus {
    /// Whether this claim participates in revenue distributions.
    pub fn earns_revenue(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether a reward can be minted against this claim.
    pub fn can_stake(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Slashed)
    }
}

/// The unlock status of a project milestone. Moves forward only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilestoneStatus {
    /// Awaiting an attested unlock.
    Pending,
    /// Unlock gate passed via a verified attestation.
    Unlocked,
    /// Reserved for an external completion process; no transition into this
    /// state is implemented by the settlement engine.
    Completed,
}

impl MilestoneStatus {
    /// Whether the unlock gate can still be passed.
    pub fn can_unlock(&self) -> bool {
        matches!(self, Self::Pending)
    }
}
