//! Records emitted by committed ledger operations.

use sluice_revenue::DistributionRecord;
use sluice_types::{Amount, AttestationKey, BasisPoints, ClaimId, Identity, PaymentRef, ProjectId, RewardId};

/// One committed state change, for downstream consumers (indexers, UIs).
///
/// Events are emitted only by operations that succeeded; a failed operation
/// emits nothing.
#[derive(Clone, Debug)]
pub enum LedgerEvent {
    ProjectCreated {
        project_id: ProjectId,
        creator: Identity,
    },
    PaymentProcessed {
        project_id: ProjectId,
        claim_id: ClaimId,
        investor: Identity,
        amount: Amount,
        share: BasisPoints,
        payment_ref: PaymentRef,
    },
    ClaimStaked {
        claim_id: ClaimId,
        reward_id: RewardId,
    },
    RewardBurned {
        reward_id: RewardId,
        claim_id: ClaimId,
    },
    ClaimSlashed {
        claim_id: ClaimId,
    },
    DistributionCompleted {
        record: DistributionRecord,
    },
    MilestoneUnlocked {
        project_id: ProjectId,
        index: u32,
        attestation_key: AttestationKey,
    },
}
