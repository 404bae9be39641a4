//! Milestone attestation record.

use serde::{Deserialize, Serialize};
use sluice_types::{Identity, ProjectId, Timestamp};

/// A verified, signed assertion that a project milestone was completed.
///
/// Immutable once created. The verifier field is `None` only for records
/// imported from an external source that predates verifier tracking; such
/// records never pass `verify_milestone_attestation`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MilestoneAttestation {
    pub project_id: ProjectId,
    pub milestone_index: u32,
    pub name: String,
    pub description: String,
    /// Opaque reference to the completion evidence (URL, content hash).
    pub proof_ref: String,
    pub created_at: Timestamp,
    pub verifier: Option<Identity>,
    pub verified: bool,
}
