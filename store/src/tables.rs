//! The keyed-table traits every backend implements.

use crate::StoreError;

/// Project records keyed by project id.
pub trait ProjectStore {
    fn put_project(&self, id: u64, bytes: &[u8]) -> Result<(), StoreError>;
    fn get_project(&self, id: u64) -> Result<Vec<u8>, StoreError>;
    fn iter_projects(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError>;
}

/// Claim records keyed by global claim id.
pub trait ClaimStore {
    fn put_claim(&self, id: u64, bytes: &[u8]) -> Result<(), StoreError>;
    fn iter_claims(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError>;
}

/// Reward records keyed by global reward id (active and burned alike).
pub trait RewardStore {
    fn put_reward(&self, id: u64, bytes: &[u8]) -> Result<(), StoreError>;
    fn iter_rewards(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError>;
}

/// Milestone sequences keyed by project id, stored whole — a project's
/// milestones form one ordered unit.
pub trait MilestoneStore {
    fn put_milestones(&self, project_id: u64, bytes: &[u8]) -> Result<(), StoreError>;
    fn iter_milestone_sequences(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError>;
}

/// Attestations keyed by attestation key; payment proofs keyed by the
/// external payment reference.
pub trait AttestationStore {
    fn put_attestation(&self, key: &[u8; 32], bytes: &[u8]) -> Result<(), StoreError>;
    fn iter_attestations(&self) -> Result<Vec<([u8; 32], Vec<u8>)>, StoreError>;
    fn put_payment_proof(&self, reference: &str, bytes: &[u8]) -> Result<(), StoreError>;
    fn iter_payment_proofs(&self) -> Result<Vec<(String, Vec<u8>)>, StoreError>;
}

/// Pending revenue queues keyed by project id, stored whole — a queue is
/// drained as one unit.
pub trait RevenueStore {
    fn put_pending(&self, project_id: u64, bytes: &[u8]) -> Result<(), StoreError>;
    fn iter_pending(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError>;
}

/// Scalar metadata (admin identity, id counters, verifier set, history).
pub trait MetaStore {
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
}

/// A backend that carries every settlement table.
pub trait SettlementStore:
    ProjectStore + ClaimStore + RewardStore + MilestoneStore + AttestationStore + RevenueStore + MetaStore
{
}

impl<T> SettlementStore for T where
    T: ProjectStore
        + ClaimStore
        + RewardStore
        + MilestoneStore
        + AttestationStore
        + RevenueStore
        + MetaStore
{
}
