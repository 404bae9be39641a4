//! The claim record.

use serde::{Deserialize, Serialize};
use sluice_types::{Amount, BasisPoints, ClaimId, ClaimStatus, Identity, PaymentRef, ProjectId, Timestamp};

/// A non-transferable record of an investor's proportional share in a
/// project.
///
/// The owner changes only through registry-internal status machinery,
/// never by transfer — transferability is what distinguishes a reward from
/// a claim.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub owner: Identity,
    pub project_id: ProjectId,
    /// Share of the project's revenue, in basis points ∈ [1, 10000].
    pub share: BasisPoints,
    pub status: ClaimStatus,
    /// External reference price at funding time, kept for audit.
    pub join_price: Amount,
    /// The externally-observed payment this claim settles.
    pub payment_ref: PaymentRef,
    pub created_at: Timestamp,
}
