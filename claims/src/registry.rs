//! The claim registry engine.

use std::collections::HashMap;

use crate::claim::Claim;
use crate::error::ClaimError;
use sluice_types::{Amount, BasisPoints, ClaimId, ClaimStatus, Identity, PaymentRef, ProjectId, Timestamp};

/// Owns every claim plus per-owner and per-project indexes.
///
/// Minting is reachable only through the settlement ledger's trust
/// boundary; status transitions are restricted to the state machine
/// (Active ↔ Staked for the reward engine, Active → Slashed for the
/// administrator).
pub struct ClaimRegistry {
    next_claim_id: u64,
    claims: HashMap<ClaimId, Claim>,
    by_owner: HashMap<Identity, Vec<ClaimId>>,
    by_project: HashMap<ProjectId, Vec<ClaimId>>,
}

impl ClaimRegistry {
    pub fn new() -> Self {
        Self {
            next_claim_id: 1,
            claims: HashMap::new(),
            by_owner: HashMap::new(),
            by_project: HashMap::new(),
        }
    }

    /// Mint a claim for a settled payment.
    ///
    /// The share must lie in [1, 10000]; zero-resolution and over-whole
    /// shares are both `InvalidShare`.
    pub fn mint_claim(
        &mut self,
        owner: Identity,
        project_id: ProjectId,
        share: BasisPoints,
        join_price: Amount,
        payment_ref: PaymentRef,
        now: Timestamp,
    ) -> Result<ClaimId, ClaimError> {
        if !share.is_valid_share() {
            return Err(ClaimError::InvalidShare(share));
        }

        let id = ClaimId::new(self.next_claim_id);
        self.next_claim_id += 1;

        let claim = Claim {
            id,
            owner: owner.clone(),
            project_id,
            share,
            status: ClaimStatus::Active,
            join_price,
            payment_ref,
            created_at: now,
        };
        self.claims.insert(id, claim);
        self.by_owner.entry(owner).or_default().push(id);
        self.by_project.entry(project_id).or_default().push(id);
        Ok(id)
    }

    /// Move a claim through the status state machine.
    ///
    /// Allowed: Active → Staked, Staked → Active, Active → Slashed.
    /// Slashed is terminal.
    pub fn set_status(&mut self, claim_id: ClaimId, new_status: ClaimStatus) -> Result<(), ClaimError> {
        let claim = self
            .claims
            .get_mut(&claim_id)
            .ok_or(ClaimError::ClaimNotFound(claim_id))?;

        let allowed = matches!(
            (claim.status, new_status),
            (ClaimStatus::Active, ClaimStatus::Staked)
                | (ClaimStatus::Staked, ClaimStatus::Active)
                | (ClaimStatus::Active, ClaimStatus::Slashed)
        );
        if !allowed {
            return Err(ClaimError::InvalidTransition {
                from: claim.status,
                to: new_status,
            });
        }
        claim.status = new_status;
        Ok(())
    }

    /// Any transfer attempt on a claim fails: claims follow the investor
    /// that made the payment, permanently.
    pub fn transfer(
        &mut self,
        _claim_id: ClaimId,
        _from: &Identity,
        _to: &Identity,
    ) -> Result<(), ClaimError> {
        Err(ClaimError::NonTransferable)
    }

    /// Approvals are transfer machinery; same refusal.
    pub fn approve(
        &mut self,
        _claim_id: ClaimId,
        _owner: &Identity,
        _delegate: &Identity,
    ) -> Result<(), ClaimError> {
        Err(ClaimError::NonTransferable)
    }

    pub fn get(&self, claim_id: ClaimId) -> Option<&Claim> {
        self.claims.get(&claim_id)
    }

    pub fn list_by_owner(&self, owner: &Identity) -> Vec<&Claim> {
        self.by_owner
            .get(owner)
            .map(|ids| ids.iter().filter_map(|id| self.claims.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn list_by_project(&self, project_id: ProjectId) -> Vec<&Claim> {
        self.by_project
            .get(&project_id)
            .map(|ids| ids.iter().filter_map(|id| self.claims.get(id)).collect())
            .unwrap_or_default()
    }

    /// Claims of a project that currently earn revenue (status Active).
    pub fn active_claims(&self, project_id: ProjectId) -> Vec<&Claim> {
        self.list_by_project(project_id)
            .into_iter()
            .filter(|c| c.status.earns_revenue())
            .collect()
    }

    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    /// Iterate all claims (for persistence).
    pub fn iter_claims(&self) -> impl Iterator<Item = &Claim> {
        self.claims.values()
    }

    /// Restore a claim loaded from a store, rebuilding the indexes.
    pub fn restore_claim(&mut self, claim: Claim) {
        self.next_claim_id = self.next_claim_id.max(claim.id.raw() + 1);
        self.by_owner.entry(claim.owner.clone()).or_default().push(claim.id);
        self.by_project.entry(claim.project_id).or_default().push(claim.id);
        self.claims.insert(claim.id, claim);
    }
}

impl Default for ClaimRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investor(n: u8) -> Identity {
        Identity::new(format!("slc_{:0>60}", n))
    }

    fn mint(registry: &mut ClaimRegistry, owner: u8, bp: u16) -> ClaimId {
        registry
            .mint_claim(
                investor(owner),
                ProjectId::new(1),
                BasisPoints::new(bp),
                Amount::new(100),
                PaymentRef::from("tx1"),
                Timestamp::new(1_000),
            )
            .unwrap()
    }

    #[test]
    fn mint_assigns_sequential_ids_and_indexes() {
        let mut registry = ClaimRegistry::new();
        let a = mint(&mut registry, 1, 2_500);
        let b = mint(&mut registry, 2, 1_000);
        assert_eq!(a, ClaimId::new(1));
        assert_eq!(b, ClaimId::new(2));

        assert_eq!(registry.list_by_owner(&investor(1)).len(), 1);
        assert_eq!(registry.list_by_project(ProjectId::new(1)).len(), 2);
        assert_eq!(registry.claim_count(), 2);
    }

    #[test]
    fn minted_claim_is_active() {
        let mut registry = ClaimRegistry::new();
        let id = mint(&mut registry, 1, 2_500);
        let claim = registry.get(id).unwrap();
        assert_eq!(claim.status, ClaimStatus::Active);
        assert_eq!(claim.share, BasisPoints::new(2_500));
        assert_eq!(claim.owner, investor(1));
    }

    #[test]
    fn zero_share_rejected() {
        let mut registry = ClaimRegistry::new();
        let result = registry.mint_claim(
            investor(1),
            ProjectId::new(1),
            BasisPoints::ZERO,
            Amount::new(100),
            PaymentRef::from("tx1"),
            Timestamp::new(1_000),
        );
        assert!(matches!(result.unwrap_err(), ClaimError::InvalidShare(_)));
    }

    #[test]
    fn over_whole_share_rejected() {
        let mut registry = ClaimRegistry::new();
        let result = registry.mint_claim(
            investor(1),
            ProjectId::new(1),
            BasisPoints::new(10_001),
            Amount::new(100),
            PaymentRef::from("tx1"),
            Timestamp::new(1_000),
        );
        assert!(matches!(result.unwrap_err(), ClaimError::InvalidShare(_)));
    }

    #[test]
    fn stake_and_release_transitions() {
        let mut registry = ClaimRegistry::new();
        let id = mint(&mut registry, 1, 2_500);

        registry.set_status(id, ClaimStatus::Staked).unwrap();
        assert_eq!(registry.get(id).unwrap().status, ClaimStatus::Staked);

        registry.set_status(id, ClaimStatus::Active).unwrap();
        assert_eq!(registry.get(id).unwrap().status, ClaimStatus::Active);
    }

    #[test]
    fn slash_is_terminal() {
        let mut registry = ClaimRegistry::new();
        let id = mint(&mut registry, 1, 2_500);
        registry.set_status(id, ClaimStatus::Slashed).unwrap();

        for target in [ClaimStatus::Active, ClaimStatus::Staked, ClaimStatus::Slashed] {
            let result = registry.set_status(id, target);
            assert!(matches!(
                result.unwrap_err(),
                ClaimError::InvalidTransition { .. }
            ));
        }
    }

    #[test]
    fn staked_claim_cannot_be_slashed_directly() {
        let mut registry = ClaimRegistry::new();
        let id = mint(&mut registry, 1, 2_500);
        registry.set_status(id, ClaimStatus::Staked).unwrap();
        let result = registry.set_status(id, ClaimStatus::Slashed);
        assert!(matches!(
            result.unwrap_err(),
            ClaimError::InvalidTransition { .. }
        ));
    }

    #[test]
    fn unknown_claim_not_found() {
        let mut registry = ClaimRegistry::new();
        let result = registry.set_status(ClaimId::new(99), ClaimStatus::Staked);
        assert!(matches!(result.unwrap_err(), ClaimError::ClaimNotFound(_)));
    }

    #[test]
    fn transfer_and_approve_always_refused() {
        let mut registry = ClaimRegistry::new();
        let id = mint(&mut registry, 1, 2_500);
        let owner_before = registry.get(id).unwrap().owner.clone();

        let result = registry.transfer(id, &investor(1), &investor(2));
        assert!(matches!(result.unwrap_err(), ClaimError::NonTransferable));
        let result = registry.approve(id, &investor(1), &investor(2));
        assert!(matches!(result.unwrap_err(), ClaimError::NonTransferable));

        assert_eq!(registry.get(id).unwrap().owner, owner_before);
    }

    #[test]
    fn active_claims_filters_status() {
        let mut registry = ClaimRegistry::new();
        let a = mint(&mut registry, 1, 2_000);
        let _b = mint(&mut registry, 2, 3_000);
        registry.set_status(a, ClaimStatus::Staked).unwrap();

        let active = registry.active_claims(ProjectId::new(1));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].owner, investor(2));
    }

    #[test]
    fn restore_rebuilds_indexes_and_id_counter() {
        let mut registry = ClaimRegistry::new();
        let id = mint(&mut registry, 1, 2_500);
        let claim = registry.get(id).unwrap().clone();

        let mut restored = ClaimRegistry::new();
        restored.restore_claim(claim);
        assert_eq!(restored.list_by_owner(&investor(1)).len(), 1);

        // Next mint must not collide with the restored id.
        let next = mint(&mut restored, 2, 1_000);
        assert_eq!(next, ClaimId::new(2));
    }
}
