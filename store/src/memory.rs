//! Thread-safe in-memory backend for testing and embedding.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::tables::{
    AttestationStore, ClaimStore, MetaStore, MilestoneStore, ProjectStore, RevenueStore,
    RewardStore,
};
use crate::StoreError;

/// An in-memory implementation of every settlement table.
pub struct MemoryStore {
    projects: Mutex<HashMap<u64, Vec<u8>>>,
    claims: Mutex<HashMap<u64, Vec<u8>>>,
    rewards: Mutex<HashMap<u64, Vec<u8>>>,
    milestones: Mutex<HashMap<u64, Vec<u8>>>,
    attestations: Mutex<HashMap<[u8; 32], Vec<u8>>>,
    payment_proofs: Mutex<HashMap<String, Vec<u8>>>,
    revenue: Mutex<HashMap<u64, Vec<u8>>>,
    meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            projects: Mutex::new(HashMap::new()),
            claims: Mutex::new(HashMap::new()),
            rewards: Mutex::new(HashMap::new()),
            milestones: Mutex::new(HashMap::new()),
            attestations: Mutex::new(HashMap::new()),
            payment_proofs: Mutex::new(HashMap::new()),
            revenue: Mutex::new(HashMap::new()),
            meta: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn iter_u64_table(table: &Mutex<HashMap<u64, Vec<u8>>>) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
    Ok(table
        .lock()
        .unwrap()
        .iter()
        .map(|(k, v)| (*k, v.clone()))
        .collect())
}

impl ProjectStore for MemoryStore {
    fn put_project(&self, id: u64, bytes: &[u8]) -> Result<(), StoreError> {
        self.projects.lock().unwrap().insert(id, bytes.to_vec());
        Ok(())
    }

    fn get_project(&self, id: u64) -> Result<Vec<u8>, StoreError> {
        self.projects
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("project {id}")))
    }

    fn iter_projects(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        iter_u64_table(&self.projects)
    }
}

impl ClaimStore for MemoryStore {
    fn put_claim(&self, id: u64, bytes: &[u8]) -> Result<(), StoreError> {
        self.claims.lock().unwrap().insert(id, bytes.to_vec());
        Ok(())
    }

    fn iter_claims(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        iter_u64_table(&self.claims)
    }
}

impl RewardStore for MemoryStore {
    fn put_reward(&self, id: u64, bytes: &[u8]) -> Result<(), StoreError> {
        self.rewards.lock().unwrap().insert(id, bytes.to_vec());
        Ok(())
    }

    fn iter_rewards(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        iter_u64_table(&self.rewards)
    }
}

impl MilestoneStore for MemoryStore {
    fn put_milestones(&self, project_id: u64, bytes: &[u8]) -> Result<(), StoreError> {
        self.milestones
            .lock()
            .unwrap()
            .insert(project_id, bytes.to_vec());
        Ok(())
    }

    fn iter_milestone_sequences(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        iter_u64_table(&self.milestones)
    }
}

impl AttestationStore for MemoryStore {
    fn put_attestation(&self, key: &[u8; 32], bytes: &[u8]) -> Result<(), StoreError> {
        self.attestations
            .lock()
            .unwrap()
            .insert(*key, bytes.to_vec());
        Ok(())
    }

    fn iter_attestations(&self) -> Result<Vec<([u8; 32], Vec<u8>)>, StoreError> {
        Ok(self
            .attestations
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect())
    }

    fn put_payment_proof(&self, reference: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.payment_proofs
            .lock()
            .unwrap()
            .insert(reference.to_string(), bytes.to_vec());
        Ok(())
    }

    fn iter_payment_proofs(&self) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        Ok(self
            .payment_proofs
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

impl RevenueStore for MemoryStore {
    fn put_pending(&self, project_id: u64, bytes: &[u8]) -> Result<(), StoreError> {
        self.revenue
            .lock()
            .unwrap()
            .insert(project_id, bytes.to_vec());
        Ok(())
    }

    fn iter_pending(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        iter_u64_table(&self.revenue)
    }
}

impl MetaStore for MemoryStore {
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meta
            .lock()
            .unwrap()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_roundtrip() {
        let store = MemoryStore::new();
        store.put_project(1, b"alpha").unwrap();
        assert_eq!(store.get_project(1).unwrap(), b"alpha");
        assert!(matches!(
            store.get_project(2).unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    #[test]
    fn put_overwrites() {
        let store = MemoryStore::new();
        store.put_project(1, b"old").unwrap();
        store.put_project(1, b"new").unwrap();
        assert_eq!(store.get_project(1).unwrap(), b"new");
        assert_eq!(store.iter_projects().unwrap().len(), 1);
    }

    #[test]
    fn meta_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get_meta(b"admin").unwrap(), None);
        store.put_meta(b"admin", b"slc_x").unwrap();
        assert_eq!(store.get_meta(b"admin").unwrap(), Some(b"slc_x".to_vec()));
    }

    #[test]
    fn attestation_tables_independent() {
        let store = MemoryStore::new();
        store.put_attestation(&[1u8; 32], b"att").unwrap();
        store.put_payment_proof("tx1", b"proof").unwrap();
        assert_eq!(store.iter_attestations().unwrap().len(), 1);
        assert_eq!(store.iter_payment_proofs().unwrap().len(), 1);
    }
}
