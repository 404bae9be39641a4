//! The revenue distribution engine.
//!
//! Revenue entries accumulate per project in an append-only queue; one
//! distribution call drains the whole queue and pays currently-Active
//! claims pro-rata by basis points, flooring each payout. The flooring
//! remainder is not carried forward.

pub mod engine;
pub mod entry;
pub mod error;
pub mod sink;

pub use engine::{DistributionRecord, RevenueEngine};
pub use entry::RevenueEntry;
pub use error::RevenueError;
pub use sink::{PayoutSink, RecordingSink};
