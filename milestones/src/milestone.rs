//! The milestone record.

use serde::{Deserialize, Serialize};
use sluice_types::{Amount, AttestationKey, MilestoneStatus, ProjectId, Timestamp};

/// One fund-release gate of a project, identified by its position in the
/// project's milestone sequence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Milestone {
    pub project_id: ProjectId,
    /// Position in the project-scoped sequence.
    pub index: u32,
    pub name: String,
    pub description: String,
    /// Amount this gate releases once unlocked (released elsewhere).
    pub unlock_amount: Amount,
    pub status: MilestoneStatus,
    pub unlocked_at: Option<Timestamp>,
    /// The attestation that passed the gate.
    pub attestation_key: Option<AttestationKey>,
    pub created_at: Timestamp,
}
