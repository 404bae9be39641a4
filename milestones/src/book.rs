//! The milestone book: per-project milestone sequences.

use std::collections::HashMap;

use crate::error::MilestoneError;
use crate::milestone::Milestone;
use sluice_attestation::AttestationVerifier;
use sluice_types::{Amount, AttestationKey, MilestoneStatus, ProjectId, Timestamp};

/// Tracks every project's milestone sequence and performs the
/// attestation-gated Pending → Unlocked transition.
pub struct MilestoneBook {
    by_project: HashMap<ProjectId, Vec<Milestone>>,
}

impl MilestoneBook {
    pub fn new() -> Self {
        Self {
            by_project: HashMap::new(),
        }
    }

    /// Append a Pending milestone to a project's sequence and return its
    /// index. The project-active gate is applied by the settlement ledger.
    pub fn add_milestone(
        &mut self,
        project_id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
        unlock_amount: Amount,
        now: Timestamp,
    ) -> Result<u32, MilestoneError> {
        if unlock_amount.is_zero() {
            return Err(MilestoneError::InvalidAmount);
        }
        let sequence = self.by_project.entry(project_id).or_default();
        let index = sequence.len() as u32;
        sequence.push(Milestone {
            project_id,
            index,
            name: name.into(),
            description: description.into(),
            unlock_amount,
            status: MilestoneStatus::Pending,
            unlocked_at: None,
            attestation_key: None,
            created_at: now,
        });
        Ok(index)
    }

    /// Pass a milestone's unlock gate against a verified attestation.
    ///
    /// No funds move here; releasing the unlock amount is the concern of an
    /// outer layer.
    pub fn unlock_milestone(
        &mut self,
        project_id: ProjectId,
        index: u32,
        attestation_key: AttestationKey,
        attestations: &AttestationVerifier,
        now: Timestamp,
    ) -> Result<(), MilestoneError> {
        let milestone = self
            .by_project
            .get_mut(&project_id)
            .and_then(|seq| seq.get_mut(index as usize))
            .ok_or(MilestoneError::MilestoneNotFound {
                project: project_id,
                index,
            })?;

        if !milestone.status.can_unlock() {
            return Err(MilestoneError::MilestoneAlreadyUnlocked {
                project: project_id,
                index,
            });
        }
        if !attestations.verify_milestone_attestation(&attestation_key) {
            return Err(MilestoneError::InvalidAttestation);
        }

        milestone.status = MilestoneStatus::Unlocked;
        milestone.unlocked_at = Some(now);
        milestone.attestation_key = Some(attestation_key);
        Ok(())
    }

    pub fn get(&self, project_id: ProjectId, index: u32) -> Option<&Milestone> {
        self.by_project
            .get(&project_id)
            .and_then(|seq| seq.get(index as usize))
    }

    pub fn list_by_project(&self, project_id: ProjectId) -> &[Milestone] {
        self.by_project
            .get(&project_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn milestone_count(&self, project_id: ProjectId) -> usize {
        self.by_project.get(&project_id).map_or(0, Vec::len)
    }

    /// Iterate all sequences (for persistence).
    pub fn iter_sequences(&self) -> impl Iterator<Item = (&ProjectId, &Vec<Milestone>)> {
        self.by_project.iter()
    }

    /// Restore a project's milestone sequence loaded from a store.
    pub fn restore_sequence(&mut self, project_id: ProjectId, milestones: Vec<Milestone>) {
        if !milestones.is_empty() {
            self.by_project.insert(project_id, milestones);
        }
    }
}

impl Default for MilestoneBook {
    fn default() -> Self {
        Self::new()
    }
}
