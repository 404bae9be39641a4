//! The attestation verifier engine.

use std::collections::{HashMap, HashSet};

use crate::attestation::MilestoneAttestation;
use crate::digest::{attestation_digest, attestation_key};
use crate::error::AttestationError;
use crate::proof::{PaymentProof, PaymentProofSubmission};
use sluice_crypto::recover_signer;
use sluice_types::{AttestationKey, Identity, PaymentRef, ProjectId, PublicKey, Signature, Timestamp};

/// Holds the authorized-verifier set, recorded milestone attestations, and
/// payment proofs. Enforces exactly-once recording per proof key.
pub struct AttestationVerifier {
    authorized: HashSet<Identity>,
    attestations: HashMap<AttestationKey, MilestoneAttestation>,
    payment_proofs: HashMap<PaymentRef, PaymentProof>,
}

impl AttestationVerifier {
    pub fn new() -> Self {
        Self {
            authorized: HashSet::new(),
            attestations: HashMap::new(),
            payment_proofs: HashMap::new(),
        }
    }

    /// Add or remove an identity from the authorized-verifier set.
    ///
    /// Admin gating happens at the ledger boundary; this engine trusts its
    /// caller.
    pub fn authorize_verifier(&mut self, identity: Identity, allowed: bool) {
        if allowed {
            self.authorized.insert(identity);
        } else {
            self.authorized.remove(&identity);
        }
    }

    /// Whether an identity is currently an authorized verifier.
    pub fn is_authorized(&self, identity: &Identity) -> bool {
        self.authorized.contains(identity)
    }

    /// Record a signed milestone attestation and return its storage key.
    ///
    /// The signature must be a detached Ed25519 signature by an authorized
    /// verifier over the canonical message digest of
    /// (project, index, name, description, proof ref, `now`).
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
    ) -> Result<AttestationKey, AttestationError> {
        let digest = attestation_digest(project_id, milestone_index, name, description, proof_ref, now);
        let signer = recover_signer(&digest, signature, public_key)
            .ok_or(AttestationError::InvalidSignature)?;
        if !self.authorized.contains(&signer) {
            return Err(AttestationError::UnauthorizedVerifier(signer.to_string()));
        }

        let key = attestation_key(project_id, milestone_index, proof_ref, now);
        if self.attestations.contains_key(&key) {
            return Err(AttestationError::AttestationExists);
        }

        self.attestations.insert(
            key,
            MilestoneAttestation {
                project_id,
                milestone_index,
                name: name.to_string(),
                description: description.to_string(),
                proof_ref: proof_ref.to_string(),
                created_at: now,
                verifier: Some(signer),
                verified: true,
            },
        );
        Ok(key)
    }

    /// Whether a stored, verified attestation with a known verifier exists
    /// under this key.
    pub fn verify_milestone_attestation(&self, key: &AttestationKey) -> bool {
        self.attestations
            .get(key)
            .is_some_and(|a| a.verified && a.verifier.is_some())
    }

    /// Read a stored attestation.
    pub fn get_attestation(&self, key: &AttestationKey) -> Option<&MilestoneAttestation> {
        self.attestations.get(key)
    }

    /// Record a verified proof for an externally-observed payment.
    ///
    /// Exactly-once per reference: a second submission for the same
    /// reference is an error, not a silent success, so a confused relay
    /// surfaces instead of hiding.
    pub fn verify_payment(
        &mut self,
        submission: PaymentProofSubmission,
    ) -> Result<(), AttestationError> {
        let existing = self.payment_proofs.get(&submission.payment_ref);
        if existing.is_some_and(|p| p.verified) {
            return Err(AttestationError::AlreadyVerified(
                submission.payment_ref.to_string(),
            ));
        }
        self.payment_proofs
            .insert(submission.payment_ref.clone(), submission.into_proof());
        Ok(())
    }

    /// Whether a verified proof exists for this payment reference.
    pub fn is_payment_verified(&self, payment_ref: &PaymentRef) -> bool {
        self.payment_proofs
            .get(payment_ref)
            .is_some_and(|p| p.verified)
    }

    /// Read a stored payment proof.
    pub fn get_payment_proof(&self, payment_ref: &PaymentRef) -> Option<&PaymentProof> {
        self.payment_proofs.get(payment_ref)
    }

    /// Record a batch of payment observations, skipping entries that already
    /// have a verified proof. Returns the number newly recorded.
    pub fn batch_verify_payments(&mut self, submissions: Vec<PaymentProofSubmission>) -> usize {
        let mut recorded = 0;
        for submission in submissions {
            if self.is_payment_verified(&submission.payment_ref) {
                continue;
            }
            self.payment_proofs
                .insert(submission.payment_ref.clone(), submission.into_proof());
            recorded += 1;
        }
        recorded
    }

    /// Iterate stored attestations (for persistence).
    pub fn iter_attestations(
        &self,
    ) -> impl Iterator<Item = (&AttestationKey, &MilestoneAttestation)> {
        self.attestations.iter()
    }

    /// Iterate stored payment proofs (for persistence).
    pub fn iter_payment_proofs(&self) -> impl Iterator<Item = &PaymentProof> {
        self.payment_proofs.values()
    }

    /// The current authorized-verifier set (for persistence).
    pub fn authorized_verifiers(&self) -> &HashSet<Identity> {
        &self.authorized
    }

    /// Restore an attestation record loaded from a store.
    pub fn restore_attestation(&mut self, key: AttestationKey, attestation: MilestoneAttestation) {
        self.attestations.insert(key, attestation);
    }

    /// Restore a payment proof loaded from a store.
    pub fn restore_payment_proof(&mut self, proof: PaymentProof) {
        self.payment_proofs.insert(proof.payment_ref.clone(), proof);
    }
}

impl Default for AttestationVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sluice_crypto::{derive_identity, keypair_from_seed, sign_digest};
    use sluice_types::Amount;

    fn verifier_with_keypair(seed: u8) -> (AttestationVerifier, sluice_types::KeyPair) {
        let kp = keypair_from_seed(&[seed; 32]);
        let mut book = AttestationVerifier::new();
        book.authorize_verifier(derive_identity(&kp.public), true);
        (book, kp)
    }

    fn submission(reference: &str) -> PaymentProofSubmission {
        PaymentProofSubmission {
            payment_ref: PaymentRef::from(reference),
            sender: "0xsender".to_string(),
            recipient: "0xvault".to_string(),
            amount: Amount::new(25_000),
            external_timestamp: Timestamp::new(1_000),
            block_number: 42,
        }
    }

    fn create(
        book: &mut AttestationVerifier,
        kp: &sluice_types::KeyPair,
        now: Timestamp,
    ) -> Result<AttestationKey, AttestationError> {
        let digest = attestation_digest(ProjectId::new(1), 0, "beta", "shipped", "ipfs://x", now);
        let sig = sign_digest(&digest, &kp.private);
        book.create_milestone_attestation(
            ProjectId::new(1),
            0,
            "beta",
            "shipped",
            "ipfs://x",
            &kp.public,
            &sig,
            now,
        )
    }

    #[test]
    fn authorized_verifier_creates_attestation() {
        let (mut book, kp) = verifier_with_keypair(1);
        let key = create(&mut book, &kp, Timestamp::new(100)).unwrap();
        assert!(book.verify_milestone_attestation(&key));

        let stored = book.get_attestation(&key).unwrap();
        assert!(stored.verified);
        assert_eq!(stored.verifier, Some(derive_identity(&kp.public)));
    }

    #[test]
    fn unauthorized_signer_rejected() {
        let (mut book, _) = verifier_with_keypair(1);
        let outsider = keypair_from_seed(&[9u8; 32]);
        let result = create(&mut book, &outsider, Timestamp::new(100));
        assert!(matches!(
            result.unwrap_err(),
            AttestationError::UnauthorizedVerifier(_)
        ));
    }

    #[test]
    fn deauthorized_verifier_rejected() {
        let (mut book, kp) = verifier_with_keypair(1);
        book.authorize_verifier(derive_identity(&kp.public), false);
        let result = create(&mut book, &kp, Timestamp::new(100));
        assert!(matches!(
            result.unwrap_err(),
            AttestationError::UnauthorizedVerifier(_)
        ));
    }

    #[test]
    fn forged_signature_rejected() {
        let (mut book, kp) = verifier_with_keypair(1);
        let now = Timestamp::new(100);
        let digest = attestation_digest(ProjectId::new(1), 0, "beta", "shipped", "ipfs://x", now);
        let sig = sign_digest(&digest, &kp.private);
        // Same signature presented with a different milestone index.
        let result = book.create_milestone_attestation(
            ProjectId::new(1),
            1,
            "beta",
            "shipped",
            "ipfs://x",
            &kp.public,
            &sig,
            now,
        );
        assert!(matches!(
            result.unwrap_err(),
            AttestationError::InvalidSignature
        ));
    }

    #[test]
    fn same_inputs_different_times_different_keys() {
        let (mut book, kp) = verifier_with_keypair(1);
        let k1 = create(&mut book, &kp, Timestamp::new(100)).unwrap();
        let k2 = create(&mut book, &kp, Timestamp::new(101)).unwrap();
        assert_ne!(k1, k2);
        assert!(book.verify_milestone_attestation(&k1));
        assert!(book.verify_milestone_attestation(&k2));
    }

    #[test]
    fn same_second_duplicate_rejected() {
        let (mut book, kp) = verifier_with_keypair(1);
        create(&mut book, &kp, Timestamp::new(100)).unwrap();
        let result = create(&mut book, &kp, Timestamp::new(100));
        assert!(matches!(
            result.unwrap_err(),
            AttestationError::AttestationExists
        ));
    }

    #[test]
    fn unknown_key_does_not_verify() {
        let book = AttestationVerifier::new();
        assert!(!book.verify_milestone_attestation(&AttestationKey::new([5u8; 32])));
    }

    #[test]
    fn unverified_record_does_not_pass() {
        let mut book = AttestationVerifier::new();
        let key = AttestationKey::new([5u8; 32]);
        book.restore_attestation(
            key,
            MilestoneAttestation {
                project_id: ProjectId::new(1),
                milestone_index: 0,
                name: "beta".to_string(),
                description: String::new(),
                proof_ref: "p".to_string(),
                created_at: Timestamp::new(1),
                verifier: Some(Identity::new("slc_someone")),
                verified: false,
            },
        );
        assert!(!book.verify_milestone_attestation(&key));
    }

    #[test]
    fn record_without_verifier_does_not_pass() {
        let mut book = AttestationVerifier::new();
        let key = AttestationKey::new([6u8; 32]);
        book.restore_attestation(
            key,
            MilestoneAttestation {
                project_id: ProjectId::new(1),
                milestone_index: 0,
                name: "beta".to_string(),
                description: String::new(),
                proof_ref: "p".to_string(),
                created_at: Timestamp::new(1),
                verifier: None,
                verified: true,
            },
        );
        assert!(!book.verify_milestone_attestation(&key));
    }

    #[test]
    fn payment_recorded_once() {
        let mut book = AttestationVerifier::new();
        book.verify_payment(submission("tx1")).unwrap();
        assert!(book.is_payment_verified(&PaymentRef::from("tx1")));

        let result = book.verify_payment(submission("tx1"));
        assert!(matches!(
            result.unwrap_err(),
            AttestationError::AlreadyVerified(_)
        ));
    }

    #[test]
    fn unknown_payment_not_verified() {
        let book = AttestationVerifier::new();
        assert!(!book.is_payment_verified(&PaymentRef::from("tx-missing")));
    }

    #[test]
    fn batch_skips_already_verified() {
        let mut book = AttestationVerifier::new();
        book.verify_payment(submission("tx1")).unwrap();

        let recorded = book.batch_verify_payments(vec![
            submission("tx1"),
            submission("tx2"),
            submission("tx3"),
        ]);
        assert_eq!(recorded, 2);
        assert!(book.is_payment_verified(&PaymentRef::from("tx2")));
        assert!(book.is_payment_verified(&PaymentRef::from("tx3")));
    }

    #[test]
    fn proof_fields_stored() {
        let mut book = AttestationVerifier::new();
        book.verify_payment(submission("tx1")).unwrap();
        let proof = book.get_payment_proof(&PaymentRef::from("tx1")).unwrap();
        assert_eq!(proof.amount, Amount::new(25_000));
        assert_eq!(proof.block_number, 42);
        assert!(proof.verified);
    }
}
