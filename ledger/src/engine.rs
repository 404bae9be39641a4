//! The settlement ledger engine.

use std::collections::HashMap;

use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::lock::ExecutionLock;
use crate::project::Project;
use sluice_attestation::{AttestationVerifier, PaymentProofSubmission};
use sluice_claims::ClaimRegistry;
use sluice_milestones::MilestoneBook;
use sluice_revenue::{DistributionRecord, PayoutSink, RevenueEngine};
use sluice_rewards::RewardEngine;
use sluice_types::{
    Amount, AttestationKey, BasisPoints, ClaimId, ClaimStatus, Identity, PaymentRef, ProjectId,
    PublicKey, RewardId, Signature, Timestamp,
};

/// The orchestrating entry point of the settlement engine.
///
/// Owns the project table and the component engines, and applies every
/// capability check (admin, project creator, owner) against the caller
/// identity passed into each mutating operation. Every operation validates
/// completely before its first mutation, so a failure commits nothing.
pub struct SettlementLedger {
    pub(crate) admin: Identity,
    pub(crate) next_project_id: u64,
    pub(crate) projects: HashMap<ProjectId, Project>,
    pub(crate) claims: ClaimRegistry,
    pub(crate) rewards: RewardEngine,
    pub(crate) revenue: RevenueEngine,
    pub(crate) milestones: MilestoneBook,
    pub(crate) attestations: AttestationVerifier,
    pub(crate) lock: ExecutionLock,
    pub(crate) events: Vec<LedgerEvent>,
}

impl SettlementLedger {
    /// Create an empty ledger administered by `admin`.
    pub fn new(admin: Identity) -> Self {
        Self {
            admin,
            next_project_id: 1,
            projects: HashMap::new(),
            claims: ClaimRegistry::new(),
            rewards: RewardEngine::new(),
            revenue: RevenueEngine::new(),
            milestones: MilestoneBook::new(),
            attestations: AttestationVerifier::new(),
            lock: ExecutionLock::new(),
            events: Vec::new(),
        }
    }

    fn require_admin(&self, caller: &Identity) -> Result<(), LedgerError> {
        if *caller != self.admin {
            return Err(LedgerError::AdminOnly);
        }
        Ok(())
    }

    fn project_ref(&self, project_id: ProjectId) -> Result<&Project, LedgerError> {
        self.projects
            .get(&project_id)
            .ok_or(LedgerError::ProjectNotFound(project_id))
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    /// Register a project. Open to any identity; the creator is recorded
    /// and gates milestone creation.
    pub fn create_project(
        &mut self,
        creator: Identity,
        title: impl Into<String>,
        description: impl Into<String>,
        funding_target: Amount,
        now: Timestamp,
    ) -> Result<ProjectId, LedgerError> {
        if funding_target.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        let id = ProjectId::new(self.next_project_id);
        self.next_project_id += 1;
        self.projects.insert(
            id,
            Project {
                id,
                title: title.into(),
                description: description.into(),
                creator: creator.clone(),
                funding_target,
                raised: Amount::ZERO,
                active: true,
                created_at: now,
                processed_refs: Default::default(),
            },
        );
        tracing::info!(project = %id, creator = %creator, target = %funding_target, "project created");
        self.events
            .push(LedgerEvent::ProjectCreated { project_id: id, creator });
        Ok(id)
    }

    /// Administrative: open or close a project for funding.
    pub fn set_project_active(
        &mut self,
        caller: &Identity,
        project_id: ProjectId,
        active: bool,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        let project = self
            .projects
            .get_mut(&project_id)
            .ok_or(LedgerError::ProjectNotFound(project_id))?;
        project.active = active;
        tracing::info!(project = %project_id, active, "project activity changed");
        Ok(())
    }

    pub fn project(&self, project_id: ProjectId) -> Option<&Project> {
        self.projects.get(&project_id)
    }

    pub fn list_projects(&self) -> Vec<&Project> {
        self.projects.values().collect()
    }

    // ------------------------------------------------------------------
    // Payment intake
    // ------------------------------------------------------------------

    /// Settle a verified external payment into a freshly-minted claim.
    ///
    /// The share is `floor(amount × 10000 / funding_target)` basis points.
    /// Exactly-once per payment reference and project: a reference is
    /// checked against the processed set and marked in the same operation
    /// that mints the claim.
    pub fn process_payment(
        &mut self,
        project_id: ProjectId,
        investor: Identity,
        amount: Amount,
        payment_ref: PaymentRef,
        price_at_payment: Amount,
        now: Timestamp,
    ) -> Result<ClaimId, LedgerError> {
        let project = self.project_ref(project_id)?;
        if !project.active {
            return Err(LedgerError::ProjectInactive(project_id));
        }
        if project.processed_refs.contains(&payment_ref) {
            return Err(LedgerError::DuplicatePayment(payment_ref.to_string()));
        }
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        if !self.attestations.is_payment_verified(&payment_ref) {
            return Err(LedgerError::UnverifiedPayment(payment_ref.to_string()));
        }
        let share = BasisPoints::from_contribution(amount, project.funding_target)
            .ok_or(LedgerError::InvalidShare)?;
        if share.is_zero() {
            return Err(LedgerError::ContributionTooSmall);
        }
        let new_raised = project
            .raised
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;

        // Checks done. The mint still validates the share range; it runs
        // before any project mutation so a rejection leaves nothing behind.
        let claim_id = self.claims.mint_claim(
            investor.clone(),
            project_id,
            share,
            price_at_payment,
            payment_ref.clone(),
            now,
        )?;
        let project = self
            .projects
            .get_mut(&project_id)
            .ok_or(LedgerError::ProjectNotFound(project_id))?;
        project.raised = new_raised;
        project.processed_refs.insert(payment_ref.clone());

        tracing::info!(
            project = %project_id,
            claim = %claim_id,
            investor = %investor,
            amount = %amount,
            share = %share,
            "payment settled into claim"
        );
        self.events.push(LedgerEvent::PaymentProcessed {
            project_id,
            claim_id,
            investor,
            amount,
            share,
            payment_ref,
        });
        Ok(claim_id)
    }

    // ------------------------------------------------------------------
    // Staking
    // ------------------------------------------------------------------

    /// Stake a claim, pausing its revenue and minting a transferable reward.
    pub fn stake_claim(
        &mut self,
        caller: &Identity,
        claim_id: ClaimId,
        now: Timestamp,
    ) -> Result<RewardId, LedgerError> {
        let reward_id = self.rewards.stake(claim_id, caller, &mut self.claims, now)?;
        tracing::debug!(claim = %claim_id, reward = %reward_id, "claim staked");
        self.events.push(LedgerEvent::ClaimStaked { claim_id, reward_id });
        Ok(reward_id)
    }

    /// Burn a reward, resuming the paired claim's revenue.
    ///
    /// Holds the execution lock: burning hands value back to an
    /// externally-controlled owner.
    pub fn burn_reward(
        &mut self,
        caller: &Identity,
        reward_id: RewardId,
    ) -> Result<ClaimId, LedgerError> {
        let _guard = self.lock.acquire().ok_or(LedgerError::ReentrantCall)?;
        let claim_id = self.rewards.burn(reward_id, caller, &mut self.claims)?;
        tracing::debug!(reward = %reward_id, claim = %claim_id, "reward burned");
        self.events.push(LedgerEvent::RewardBurned { reward_id, claim_id });
        Ok(claim_id)
    }

    /// Transfer a reward to a new owner. Never touches the paired claim.
    pub fn transfer_reward(
        &mut self,
        caller: &Identity,
        reward_id: RewardId,
        to: Identity,
    ) -> Result<(), LedgerError> {
        self.rewards.transfer(reward_id, caller, to)?;
        Ok(())
    }

    /// Administrative: slash a claim out of distribution, terminally.
    pub fn slash_claim(&mut self, caller: &Identity, claim_id: ClaimId) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        self.claims.set_status(claim_id, ClaimStatus::Slashed)?;
        tracing::warn!(claim = %claim_id, "claim slashed");
        self.events.push(LedgerEvent::ClaimSlashed { claim_id });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Revenue
    // ------------------------------------------------------------------

    /// Administrative: append revenue to a project's pending queue.
    pub fn add_revenue(
        &mut self,
        caller: &Identity,
        project_id: ProjectId,
        amount: Amount,
        source: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        self.project_ref(project_id)?;
        self.revenue.add_revenue(project_id, amount, source, now)?;
        Ok(())
    }

    /// Administrative: drain a project's pending revenue pro-rata across its
    /// Active claims, paying through `sink`.
    ///
    /// Holds the execution lock for its full duration — the sink reaches
    /// externally-controlled owners and must not be able to nest a call
    /// back into the ledger before the distribution record is committed.
    pub fn distribute(
        &mut self,
        caller: &Identity,
        project_id: ProjectId,
        sink: &mut dyn PayoutSink,
        now: Timestamp,
    ) -> Result<DistributionRecord, LedgerError> {
        self.require_admin(caller)?;
        self.project_ref(project_id)?;
        let _guard = self.lock.acquire().ok_or(LedgerError::ReentrantCall)?;
        let record = self.revenue.distribute(project_id, &self.claims, sink, now)?;
        tracing::info!(
            project = %project_id,
            total = %record.total,
            total_share = record.total_share,
            claims_paid = record.claims_paid,
            "revenue distributed"
        );
        self.events.push(LedgerEvent::DistributionCompleted {
            record: record.clone(),
        });
        Ok(record)
    }

    // ------------------------------------------------------------------
    // Milestones
    // ------------------------------------------------------------------

    /// Add a Pending milestone. Only the project creator may, and only
    /// while the project is active.
    pub fn add_milestone(
        &mut self,
        caller: &Identity,
        project_id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
        unlock_amount: Amount,
        now: Timestamp,
    ) -> Result<u32, LedgerError> {
        let project = self.project_ref(project_id)?;
        if !project.active {
            return Err(LedgerError::ProjectInactive(project_id));
        }
        if project.creator != *caller {
            return Err(LedgerError::NotCreator);
        }
        let index = self
            .milestones
            .add_milestone(project_id, name, description, unlock_amount, now)?;
        Ok(index)
    }

    /// Pass a milestone's unlock gate against a verified attestation.
    /// Callable by the administrator or the project creator. No funds move.
    pub fn unlock_milestone(
        &mut self,
        caller: &Identity,
        project_id: ProjectId,
        index: u32,
        attestation_key: AttestationKey,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        let project = self.project_ref(project_id)?;
        if *caller != self.admin && *caller != project.creator {
            return Err(LedgerError::NotCreator);
        }
        self.milestones
            .unlock_milestone(project_id, index, attestation_key, &self.attestations, now)?;
        tracing::info!(project = %project_id, index, "milestone unlocked");
        self.events.push(LedgerEvent::MilestoneUnlocked {
            project_id,
            index,
            attestation_key,
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Attestations and payment proofs
    // ------------------------------------------------------------------

    /// Administrative: add or remove an authorized verifier.
    pub fn authorize_verifier(
        &mut self,
        caller: &Identity,
        identity: Identity,
        allowed: bool,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        self.attestations.authorize_verifier(identity, allowed);
        Ok(())
    }

    /// Record a signed milestone attestation. The signature itself is the
    /// authorization — no separate caller check.
    #[allow(clippy::too_many_arguments)]
    pub fn create_milestone_attestation(
        &mut self,
        project_id: ProjectId,
        milestone_index: u32,
        name: &str,
        description: &str,
        proof_ref: &str,
        public_key: &PublicKey,
        signature: &Signature,
        now: Timestamp,
    ) -> Result<AttestationKey, LedgerError> {
        let key = self.attestations.create_milestone_attestation(
            project_id,
            milestone_index,
            name,
            description,
            proof_ref,
            public_key,
            signature,
            now,
        )?;
        Ok(key)
    }

    /// Administrative: record a verified proof for an external payment.
    /// Errors on a reference that already has one — not blind-retry-safe.
    pub fn verify_payment(
        &mut self,
        caller: &Identity,
        submission: PaymentProofSubmission,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        self.attestations.verify_payment(submission)?;
        Ok(())
    }

    /// Administrative: record a batch of payment observations, skipping
    /// entries already verified. Returns the number newly recorded.
    pub fn batch_verify_payments(
        &mut self,
        caller: &Identity,
        submissions: Vec<PaymentProofSubmission>,
    ) -> Result<usize, LedgerError> {
        self.require_admin(caller)?;
        Ok(self.attestations.batch_verify_payments(submissions))
    }

    pub fn is_payment_verified(&self, payment_ref: &PaymentRef) -> bool {
        self.attestations.is_payment_verified(payment_ref)
    }

    pub fn verify_milestone_attestation(&self, key: &AttestationKey) -> bool {
        self.attestations.verify_milestone_attestation(key)
    }

    // ------------------------------------------------------------------
    // Reads and events
    // ------------------------------------------------------------------

    pub fn admin(&self) -> &Identity {
        &self.admin
    }

    pub fn claims(&self) -> &ClaimRegistry {
        &self.claims
    }

    pub fn rewards(&self) -> &RewardEngine {
        &self.rewards
    }

    pub fn revenue(&self) -> &RevenueEngine {
        &self.revenue
    }

    pub fn milestones(&self) -> &MilestoneBook {
        &self.milestones
    }

    pub fn attestations(&self) -> &AttestationVerifier {
        &self.attestations
    }

    /// Take the records emitted by operations since the last drain.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }
}
