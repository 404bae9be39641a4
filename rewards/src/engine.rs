//! The reward/stake engine.

use std::collections::HashMap;

use crate::error::RewardError;
use crate::reward::Reward;
use sluice_claims::ClaimRegistry;
use sluice_types::{ClaimId, ClaimStatus, Identity, RewardId, Timestamp};

/// Pairs claims with transferable rewards while staked.
///
/// Active rewards live in an index-backed arena: `slots` is unordered with
/// no gaps, `index` maps id → slot, and removal is an O(1) swap-remove that
/// re-points the moved entry. Burned rewards are retained (inactive) in a
/// separate log for audit reads.
pub struct RewardEngine {
    next_reward_id: u64,
    slots: Vec<Reward>,
    index: HashMap<RewardId, usize>,
    /// Active 1:1 pairing: claim id → reward id.
    by_claim: HashMap<ClaimId, RewardId>,
    burned: Vec<Reward>,
}

impl RewardEngine {
    pub fn new() -> Self {
        Self {
            next_reward_id: 1,
            slots: Vec::new(),
            index: HashMap::new(),
            by_claim: HashMap::new(),
            burned: Vec::new(),
        }
    }

    /// Stake a claim: pause its revenue and mint a transferable reward.
    ///
    /// Requires that `caller` owns the claim, that the claim is Active, and
    /// that no active reward is already paired with it.
    pub fn stake(
        &mut self,
        claim_id: ClaimId,
        caller: &Identity,
        registry: &mut ClaimRegistry,
        now: Timestamp,
    ) -> Result<RewardId, RewardError> {
        let claim = registry
            .get(claim_id)
            .ok_or(RewardError::ClaimNotFound(claim_id))?;
        if claim.owner != *caller {
            return Err(RewardError::NotOwner);
        }
        if !claim.status.can_stake() {
            return Err(RewardError::NotActive(claim_id));
        }
        if self.by_claim.contains_key(&claim_id) {
            return Err(RewardError::RewardAlreadyExists(claim_id));
        }

        let share = claim.share;
        let project_id = claim.project_id;
        registry.set_status(claim_id, ClaimStatus::Staked)?;

        let id = RewardId::new(self.next_reward_id);
        self.next_reward_id += 1;
        let reward = Reward {
            id,
            claim_id,
            project_id,
            share,
            owner: caller.clone(),
            active: true,
            minted_at: now,
        };
        self.index.insert(id, self.slots.len());
        self.by_claim.insert(claim_id, id);
        self.slots.push(reward);
        Ok(id)
    }

    /// Burn a reward: unpair it and resume the underlying claim's revenue.
    ///
    /// Returns the claim id that went back to Active. Only the reward's
    /// current owner may burn it.
    pub fn burn(
        &mut self,
        reward_id: RewardId,
        caller: &Identity,
        registry: &mut ClaimRegistry,
    ) -> Result<ClaimId, RewardError> {
        let slot = *self
            .index
            .get(&reward_id)
            .ok_or(RewardError::RewardNotFound(reward_id))?;
        if self.slots[slot].owner != *caller {
            return Err(RewardError::NotOwner);
        }

        let claim_id = self.slots[slot].claim_id;
        registry.set_status(claim_id, ClaimStatus::Active)?;

        let mut reward = self.slots.swap_remove(slot);
        self.index.remove(&reward_id);
        if let Some(moved) = self.slots.get(slot) {
            self.index.insert(moved.id, slot);
        }
        self.by_claim.remove(&claim_id);

        reward.active = false;
        self.burned.push(reward);
        Ok(claim_id)
    }

    /// Transfer an active reward to a new owner.
    ///
    /// First-class and unrestricted — and deliberately inert towards the
    /// paired claim: the claim stays Staked no matter who holds the reward.
    pub fn transfer(
        &mut self,
        reward_id: RewardId,
        caller: &Identity,
        to: Identity,
    ) -> Result<(), RewardError> {
        let slot = *self
            .index
            .get(&reward_id)
            .ok_or(RewardError::RewardNotFound(reward_id))?;
        let reward = &mut self.slots[slot];
        if reward.owner != *caller {
            return Err(RewardError::NotOwner);
        }
        reward.owner = to;
        Ok(())
    }

    /// Read a reward, active or burned.
    pub fn get(&self, reward_id: RewardId) -> Option<&Reward> {
        if let Some(&slot) = self.index.get(&reward_id) {
            return self.slots.get(slot);
        }
        self.burned.iter().find(|r| r.id == reward_id)
    }

    /// The active reward paired with a claim, if any.
    pub fn reward_for_claim(&self, claim_id: ClaimId) -> Option<&Reward> {
        let id = self.by_claim.get(&claim_id)?;
        let slot = self.index.get(id)?;
        self.slots.get(*slot)
    }

    /// Active rewards currently held by an owner.
    pub fn list_by_owner(&self, owner: &Identity) -> Vec<&Reward> {
        self.slots.iter().filter(|r| r.owner == *owner).collect()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len()
    }

    /// Test-usable invariant: every claim is Staked iff exactly one active
    /// reward is paired with it.
    pub fn pairing_holds(&self, registry: &ClaimRegistry) -> bool {
        for claim in registry.iter_claims() {
            let paired = self
                .by_claim
                .get(&claim.id)
                .and_then(|id| self.index.get(id))
                .is_some();
            let staked = claim.status == ClaimStatus::Staked;
            if staked != paired {
                return false;
            }
        }
        // No active reward may point at a claim the registry doesn't know.
        self.slots.iter().all(|r| registry.get(r.claim_id).is_some())
    }

    /// Iterate active rewards (for persistence).
    pub fn iter_active(&self) -> impl Iterator<Item = &Reward> {
        self.slots.iter()
    }

    /// Iterate burned rewards (for persistence).
    pub fn iter_burned(&self) -> impl Iterator<Item = &Reward> {
        self.burned.iter()
    }

    /// Restore a reward loaded from a store, rebuilding the arena indexes.
    pub fn restore_reward(&mut self, reward: Reward) {
        self.next_reward_id = self.next_reward_id.max(reward.id.raw() + 1);
        if reward.active {
            self.index.insert(reward.id, self.slots.len());
            self.by_claim.insert(reward.claim_id, reward.id);
            self.slots.push(reward);
        } else {
            self.burned.push(reward);
        }
    }
}

impl Default for RewardEngine {
    fn default() -> Self {
        Self::new()
    }
}
