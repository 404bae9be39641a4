//! Snapshot persistence over the `sluice-store` tables.
//!
//! The ledger serializes each entity with bincode into the logical keyed
//! tables; derived indexes (per-owner, per-project, the reward arena) are
//! rebuilt on load rather than persisted. Emitted events and the execution
//! lock are transient and never stored.

use crate::engine::SettlementLedger;
use crate::error::LedgerError;
use crate::project::Project;
use sluice_attestation::{MilestoneAttestation, PaymentProof};
use sluice_claims::Claim;
use sluice_milestones::Milestone;
use sluice_revenue::{DistributionRecord, RevenueEntry};
use sluice_rewards::Reward;
use sluice_store::SettlementStore;
use sluice_types::{AttestationKey, Identity, ProjectId};

const META_ADMIN: &[u8] = b"admin";
const META_NEXT_PROJECT_ID: &[u8] = b"next_project_id";
const META_AUTHORIZED_VERIFIERS: &[u8] = b"authorized_verifiers";
const META_DISTRIBUTION_HISTORY: &[u8] = b"distribution_history";

fn store_err(e: impl ToString) -> LedgerError {
    LedgerError::Store(e.to_string())
}

impl SettlementLedger {
    /// Persist all ledger state to a settlement store.
    pub fn save_to_store(&self, store: &dyn SettlementStore) -> Result<(), LedgerError> {
        store
            .put_meta(META_ADMIN, self.admin.as_str().as_bytes())
            .map_err(store_err)?;
        store
            .put_meta(META_NEXT_PROJECT_ID, &self.next_project_id.to_be_bytes())
            .map_err(store_err)?;

        let verifiers: Vec<&Identity> = self.attestations.authorized_verifiers().iter().collect();
        let bytes = bincode::serialize(&verifiers).map_err(store_err)?;
        store
            .put_meta(META_AUTHORIZED_VERIFIERS, &bytes)
            .map_err(store_err)?;

        let bytes = bincode::serialize(self.revenue.history()).map_err(store_err)?;
        store
            .put_meta(META_DISTRIBUTION_HISTORY, &bytes)
            .map_err(store_err)?;

        for project in self.projects.values() {
            let bytes = bincode::serialize(project).map_err(store_err)?;
            store.put_project(project.id.raw(), &bytes).map_err(store_err)?;
        }
        for claim in self.claims.iter_claims() {
            let bytes = bincode::serialize(claim).map_err(store_err)?;
            store.put_claim(claim.id.raw(), &bytes).map_err(store_err)?;
        }
        for reward in self.rewards.iter_active().chain(self.rewards.iter_burned()) {
            let bytes = bincode::serialize(reward).map_err(store_err)?;
            store.put_reward(reward.id.raw(), &bytes).map_err(store_err)?;
        }
        for (project_id, sequence) in self.milestones.iter_sequences() {
            let bytes = bincode::serialize(sequence).map_err(store_err)?;
            store
                .put_milestones(project_id.raw(), &bytes)
                .map_err(store_err)?;
        }
        for (key, attestation) in self.attestations.iter_attestations() {
            let bytes = bincode::serialize(attestation).map_err(store_err)?;
            store.put_attestation(key.as_bytes(), &bytes).map_err(store_err)?;
        }
        for proof in self.attestations.iter_payment_proofs() {
            let bytes = bincode::serialize(proof).map_err(store_err)?;
            store
                .put_payment_proof(proof.payment_ref.as_str(), &bytes)
                .map_err(store_err)?;
        }
        for (project_id, entries) in self.revenue.iter_pending() {
            let bytes = bincode::serialize(entries).map_err(store_err)?;
            store.put_pending(project_id.raw(), &bytes).map_err(store_err)?;
        }
        Ok(())
    }

    /// Restore a ledger from a settlement store.
    pub fn load_from_store(store: &dyn SettlementStore) -> Result<Self, LedgerError> {
        let admin_bytes = store
            .get_meta(META_ADMIN)
            .map_err(store_err)?
            .ok_or_else(|| LedgerError::Store("missing admin identity".into()))?;
        let admin_str = String::from_utf8(admin_bytes).map_err(store_err)?;
        if !admin_str.starts_with(Identity::PREFIX) {
            return Err(LedgerError::Store("malformed admin identity".into()));
        }
        let mut ledger = SettlementLedger::new(Identity::new(admin_str));

        if let Some(bytes) = store.get_meta(META_NEXT_PROJECT_ID).map_err(store_err)? {
            if bytes.len() >= 8 {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(&bytes[..8]);
                ledger.next_project_id = u64::from_be_bytes(buf);
            }
        }

        if let Some(bytes) = store
            .get_meta(META_AUTHORIZED_VERIFIERS)
            .map_err(store_err)?
        {
            let verifiers: Vec<Identity> = bincode::deserialize(&bytes).map_err(store_err)?;
            for verifier in verifiers {
                ledger.attestations.authorize_verifier(verifier, true);
            }
        }

        if let Some(bytes) = store
            .get_meta(META_DISTRIBUTION_HISTORY)
            .map_err(store_err)?
        {
            let history: Vec<DistributionRecord> = bincode::deserialize(&bytes).map_err(store_err)?;
            for record in history {
                ledger.revenue.restore_record(record);
            }
        }

        for (id, bytes) in store.iter_projects().map_err(store_err)? {
            let project: Project = bincode::deserialize(&bytes).map_err(store_err)?;
            ledger.next_project_id = ledger.next_project_id.max(id + 1);
            ledger.projects.insert(project.id, project);
        }
        for (_, bytes) in store.iter_claims().map_err(store_err)? {
            let claim: Claim = bincode::deserialize(&bytes).map_err(store_err)?;
            ledger.claims.restore_claim(claim);
        }
        for (_, bytes) in store.iter_rewards().map_err(store_err)? {
            let reward: Reward = bincode::deserialize(&bytes).map_err(store_err)?;
            ledger.rewards.restore_reward(reward);
        }
        for (project_id, bytes) in store.iter_milestone_sequences().map_err(store_err)? {
            let sequence: Vec<Milestone> = bincode::deserialize(&bytes).map_err(store_err)?;
            ledger
                .milestones
                .restore_sequence(ProjectId::new(project_id), sequence);
        }
        for (key, bytes) in store.iter_attestations().map_err(store_err)? {
            let attestation: MilestoneAttestation =
                bincode::deserialize(&bytes).map_err(store_err)?;
            ledger
                .attestations
                .restore_attestation(AttestationKey::new(key), attestation);
        }
        for (_, bytes) in store.iter_payment_proofs().map_err(store_err)? {
            let proof: PaymentProof = bincode::deserialize(&bytes).map_err(store_err)?;
            ledger.attestations.restore_payment_proof(proof);
        }
        for (project_id, bytes) in store.iter_pending().map_err(store_err)? {
            let entries: Vec<RevenueEntry> = bincode::deserialize(&bytes).map_err(store_err)?;
            ledger
                .revenue
                .restore_pending(ProjectId::new(project_id), entries);
        }

        Ok(ledger)
    }
}
