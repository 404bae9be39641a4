//! The project record.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use sluice_types::{Amount, Identity, PaymentRef, ProjectId, Timestamp};

/// One funded project. Created once, never deleted.
///
/// `raised` is mutated only by payment intake; `active` only by
/// administrative action.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub creator: Identity,
    pub funding_target: Amount,
    pub raised: Amount,
    pub active: bool,
    pub created_at: Timestamp,
    /// Payment references already consumed by intake for this project.
    pub processed_refs: HashSet<PaymentRef>,
}
