//! Pending revenue entries.

use serde::{Deserialize, Serialize};
use sluice_types::{Amount, Timestamp};

/// One revenue receipt awaiting distribution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RevenueEntry {
    pub amount: Amount,
    /// Free-form origin label ("box_office", "streaming", ...).
    pub source: String,
    pub recorded_at: Timestamp,
}
