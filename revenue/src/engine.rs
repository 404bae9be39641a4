//! The revenue distribution engine.

use std::collections::HashMap;

use crate::entry::RevenueEntry;
use crate::error::RevenueError;
use crate::sink::PayoutSink;
use serde::{Deserialize, Serialize};
use sluice_claims::ClaimRegistry;
use sluice_types::{Amount, ProjectId, Timestamp};

/// Summary of one completed distribution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistributionRecord {
    pub project_id: ProjectId,
    /// Total revenue consumed from the pending queue.
    pub total: Amount,
    /// Sum of basis points across the claims considered.
    pub total_share: u32,
    /// Number of claims that received a non-zero payout.
    pub claims_paid: u32,
    pub distributed_at: Timestamp,
}

/// Accumulates revenue per project and drains it pro-rata on demand.
pub struct RevenueEngine {
    pending: HashMap<ProjectId, Vec<RevenueEntry>>,
    history: Vec<DistributionRecord>,
}

impl RevenueEngine {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// Append a revenue entry to a project's pending queue.
    pub fn add_revenue(
        &mut self,
        project_id: ProjectId,
        amount: Amount,
        source: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), RevenueError> {
        if amount.is_zero() {
            return Err(RevenueError::ZeroAmount);
        }
        self.pending.entry(project_id).or_default().push(RevenueEntry {
            amount,
            source: source.into(),
            recorded_at: now,
        });
        Ok(())
    }

    /// Sum of a project's pending queue.
    pub fn pending_total(&self, project_id: ProjectId) -> Amount {
        self.pending
            .get(&project_id)
            .map(|entries| {
                entries
                    .iter()
                    .fold(Amount::ZERO, |acc, e| acc + e.amount)
            })
            .unwrap_or(Amount::ZERO)
    }

    /// A project's pending entries, oldest first.
    pub fn pending_entries(&self, project_id: ProjectId) -> &[RevenueEntry] {
        self.pending
            .get(&project_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distribute the entire pending queue of a project pro-rata across its
    /// currently-Active claims.
    ///
    /// Each payout is `floor(total × share / total_share)`. The queue is
    /// fully drained even though flooring can leave a remainder unpaid; the
    /// remainder is not carried to the next distribution.
    pub fn distribute(
        &mut self,
        project_id: ProjectId,
        registry: &ClaimRegistry,
        sink: &mut dyn PayoutSink,
        now: Timestamp,
    ) -> Result<DistributionRecord, RevenueError> {
        let total = self.pending_total(project_id);
        if total.is_zero() {
            return Err(RevenueError::NoRevenue(project_id));
        }

        let active = registry.active_claims(project_id);
        let total_share: u32 = active.iter().map(|c| c.share.raw() as u32).sum();
        if total_share == 0 {
            return Err(RevenueError::NoActiveClaims(project_id));
        }

        let payouts: Vec<_> = active
            .iter()
            .map(|claim| {
                let amount = total.raw() * claim.share.raw() as u128 / total_share as u128;
                (claim.owner.clone(), Amount::new(amount))
            })
            .filter(|(_, amount)| !amount.is_zero())
            .collect();

        // Commit before the sink runs: the queue is consumed exactly once
        // regardless of what the sink does with the payouts.
        self.pending.remove(&project_id);
        let record = DistributionRecord {
            project_id,
            total,
            total_share,
            claims_paid: payouts.len() as u32,
            distributed_at: now,
        };
        self.history.push(record.clone());

        for (owner, amount) in &payouts {
            sink.transfer(owner, *amount);
        }
        Ok(record)
    }

    /// Completed distributions, oldest first.
    pub fn history(&self) -> &[DistributionRecord] {
        &self.history
    }

    /// Iterate pending queues (for persistence).
    pub fn iter_pending(&self) -> impl Iterator<Item = (&ProjectId, &Vec<RevenueEntry>)> {
        self.pending.iter()
    }

    /// Restore a project's pending queue loaded from a store.
    pub fn restore_pending(&mut self, project_id: ProjectId, entries: Vec<RevenueEntry>) {
        if !entries.is_empty() {
            self.pending.insert(project_id, entries);
        }
    }

    /// Restore a distribution record loaded from a store.
    pub fn restore_record(&mut self, record: DistributionRecord) {
        self.history.push(record);
    }
}

impl Default for RevenueEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use sluice_types::{BasisPoints, ClaimStatus, Identity, PaymentRef};

    fn investor(n: u8) -> Identity {
        Identity::new(format!("slc_{:0>60}", n))
    }

    fn registry_with_shares(shares: &[u16]) -> ClaimRegistry {
        let mut registry = ClaimRegistry::new();
        for (i, &bp) in shares.iter().enumerate() {
            let n = (i + 1) as u8;
            registry
                .mint_claim(
                    investor(n),
                    ProjectId::new(1),
                    BasisPoints::new(bp),
                    Amount::new(100),
                    PaymentRef::from(format!("tx{n}").as_str()),
                    Timestamp::new(1_000),
                )
                .unwrap();
        }
        registry
    }

    fn project() -> ProjectId {
        ProjectId::new(1)
    }

    #[test]
    fn zero_revenue_rejected() {
        let mut engine = RevenueEngine::new();
        let result = engine.add_revenue(project(), Amount::ZERO, "box_office", Timestamp::new(1));
        assert!(matches!(result.unwrap_err(), RevenueError::ZeroAmount));
    }

    #[test]
    fn entries_accumulate() {
        let mut engine = RevenueEngine::new();
        engine
            .add_revenue(project(), Amount::new(600), "box_office", Timestamp::new(1))
            .unwrap();
        engine
            .add_revenue(project(), Amount::new(400), "streaming", Timestamp::new(2))
            .unwrap();
        assert_eq!(engine.pending_total(project()), Amount::new(1_000));
        assert_eq!(engine.pending_entries(project()).len(), 2);
    }

    #[test]
    fn distribute_empty_queue_fails() {
        let mut engine = RevenueEngine::new();
        let registry = registry_with_shares(&[2_000]);
        let mut sink = RecordingSink::new();
        let result = engine.distribute(project(), &registry, &mut sink, Timestamp::new(10));
        assert!(matches!(result.unwrap_err(), RevenueError::NoRevenue(_)));
    }

    #[test]
    fn distribute_without_active_claims_fails() {
        let mut engine = RevenueEngine::new();
        engine
            .add_revenue(project(), Amount::new(1_000), "box_office", Timestamp::new(1))
            .unwrap();
        let registry = ClaimRegistry::new();
        let mut sink = RecordingSink::new();
        let result = engine.distribute(project(), &registry, &mut sink, Timestamp::new(10));
        assert!(matches!(result.unwrap_err(), RevenueError::NoActiveClaims(_)));
        // The queue is untouched by a failed distribution.
        assert_eq!(engine.pending_total(project()), Amount::new(1_000));
    }

    #[test]
    fn exact_prorata_split() {
        let mut engine = RevenueEngine::new();
        engine
            .add_revenue(project(), Amount::new(1_000), "box_office", Timestamp::new(1))
            .unwrap();
        let registry = registry_with_shares(&[2_000, 3_000, 5_000]);
        let mut sink = RecordingSink::new();

        let record = engine
            .distribute(project(), &registry, &mut sink, Timestamp::new(10))
            .unwrap();

        assert_eq!(record.total, Amount::new(1_000));
        assert_eq!(record.total_share, 10_000);
        assert_eq!(record.claims_paid, 3);
        assert_eq!(sink.total_for(&investor(1)), Amount::new(200));
        assert_eq!(sink.total_for(&investor(2)), Amount::new(300));
        assert_eq!(sink.total_for(&investor(3)), Amount::new(500));
        assert_eq!(engine.pending_total(project()), Amount::ZERO);
    }

    #[test]
    fn flooring_remainder_is_discarded() {
        let mut engine = RevenueEngine::new();
        engine
            .add_revenue(project(), Amount::new(10), "box_office", Timestamp::new(1))
            .unwrap();
        let registry = registry_with_shares(&[3_333, 3_333, 3_334]);
        let mut sink = RecordingSink::new();

        engine
            .distribute(project(), &registry, &mut sink, Timestamp::new(10))
            .unwrap();

        // floor(10 * 3333 / 10000) = 3 for each; 1 unit unrecovered.
        assert_eq!(sink.total_for(&investor(1)), Amount::new(3));
        assert_eq!(sink.total_for(&investor(2)), Amount::new(3));
        assert_eq!(sink.total_for(&investor(3)), Amount::new(3));
        let paid: u128 = sink.transfers.iter().map(|(_, a)| a.raw()).sum();
        assert_eq!(paid, 9);

        // Queue fully cleared; the remainder does not reappear later.
        assert_eq!(engine.pending_total(project()), Amount::ZERO);
        engine
            .add_revenue(project(), Amount::new(100), "streaming", Timestamp::new(20))
            .unwrap();
        assert_eq!(engine.pending_total(project()), Amount::new(100));
    }

    #[test]
    fn staked_claims_excluded() {
        let mut engine = RevenueEngine::new();
        engine
            .add_revenue(project(), Amount::new(1_000), "box_office", Timestamp::new(1))
            .unwrap();
        let mut registry = registry_with_shares(&[2_000, 3_000]);
        let staked_id = registry.list_by_owner(&investor(1))[0].id;
        registry.set_status(staked_id, ClaimStatus::Staked).unwrap();
        let mut sink = RecordingSink::new();

        let record = engine
            .distribute(project(), &registry, &mut sink, Timestamp::new(10))
            .unwrap();

        // Only the 3000 bp claim participates and takes the whole total.
        assert_eq!(record.total_share, 3_000);
        assert_eq!(record.claims_paid, 1);
        assert_eq!(sink.total_for(&investor(1)), Amount::ZERO);
        assert_eq!(sink.total_for(&investor(2)), Amount::new(1_000));
    }

    #[test]
    fn zero_payouts_not_transferred() {
        let mut engine = RevenueEngine::new();
        engine
            .add_revenue(project(), Amount::new(3), "box_office", Timestamp::new(1))
            .unwrap();
        // 1 bp against 9999 bp: floor(3 * 1 / 10000) = 0.
        let registry = registry_with_shares(&[1, 9_999]);
        let mut sink = RecordingSink::new();

        let record = engine
            .distribute(project(), &registry, &mut sink, Timestamp::new(10))
            .unwrap();

        assert_eq!(record.claims_paid, 1);
        assert_eq!(sink.transfers.len(), 1);
        assert_eq!(sink.total_for(&investor(2)), Amount::new(2));
    }

    #[test]
    fn queues_are_per_project() {
        let mut engine = RevenueEngine::new();
        engine
            .add_revenue(ProjectId::new(1), Amount::new(100), "a", Timestamp::new(1))
            .unwrap();
        engine
            .add_revenue(ProjectId::new(2), Amount::new(200), "b", Timestamp::new(1))
            .unwrap();

        let registry = registry_with_shares(&[10_000]);
        let mut sink = RecordingSink::new();
        engine
            .distribute(ProjectId::new(1), &registry, &mut sink, Timestamp::new(10))
            .unwrap();

        assert_eq!(engine.pending_total(ProjectId::new(1)), Amount::ZERO);
        assert_eq!(engine.pending_total(ProjectId::new(2)), Amount::new(200));
    }

    #[test]
    fn history_records_distributions() {
        let mut engine = RevenueEngine::new();
        engine
            .add_revenue(project(), Amount::new(1_000), "box_office", Timestamp::new(1))
            .unwrap();
        let registry = registry_with_shares(&[10_000]);
        let mut sink = RecordingSink::new();
        engine
            .distribute(project(), &registry, &mut sink, Timestamp::new(10))
            .unwrap();

        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history()[0].total, Amount::new(1_000));
        assert_eq!(engine.history()[0].distributed_at, Timestamp::new(10));
    }
}
