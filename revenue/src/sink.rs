//! The channel value leaves the engine through.

use sluice_types::{Amount, Identity};

/// Receives distribution payouts.
///
/// The engine computes who gets what; the sink is how it reaches them
/// (a token ledger credit, an on-chain transfer, ...). Sinks run while the
/// settlement ledger holds its execution lock, so a sink cannot re-enter
/// the ledger mid-distribution.
pub trait PayoutSink {
    fn transfer(&mut self, to: &Identity, amount: Amount);
}

/// An in-memory sink that records transfers, for tests and embedding.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub transfers: Vec<(Identity, Amount)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total amount paid to an identity across all recorded transfers.
    pub fn total_for(&self, identity: &Identity) -> Amount {
        self.transfers
            .iter()
            .filter(|(to, _)| to == identity)
            .fold(Amount::ZERO, |acc, (_, amount)| acc + *amount)
    }
}

impl PayoutSink for RecordingSink {
    fn transfer(&mut self, to: &Identity, amount: Amount) {
        self.transfers.push((to.clone(), amount));
    }
}
