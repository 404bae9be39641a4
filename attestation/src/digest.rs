//! Canonical digest construction for attestations.
//!
//! Digests are versioned and byte-exact so that any reimplementation (in any
//! language) signing or checking the same business data produces identical
//! bytes. Layout, in order:
//!
//! - 1 version byte (`ATTESTATION_DIGEST_VERSION`)
//! - 1 domain byte (`0xA1` signed message, `0xA2` storage key)
//! - project id, u64 big-endian
//! - milestone index, u32 big-endian
//! - each string field as u32 big-endian length followed by UTF-8 bytes
//! - creation timestamp, u64 big-endian seconds
//!
//! The creation time is part of both digests, so identical business data
//! attested at different seconds yields different signed messages and
//! different storage keys.

use sluice_crypto::blake2b_256_multi;
use sluice_types::{AttestationKey, Digest, ProjectId, Timestamp};

/// Version of the canonical digest layout.
pub const ATTESTATION_DIGEST_VERSION: u8 = 1;

/// Domain byte for the message a verifier signs.
const DOMAIN_MESSAGE: u8 = 0xA1;
/// Domain byte for the storage key of a recorded attestation.
const DOMAIN_KEY: u8 = 0xA2;

/// The canonical message digest a verifier signs:
/// (project, milestone index, name, description, proof ref, creation time).
pub fn attestation_digest(
    project_id: ProjectId,
    milestone_index: u32,
    name: &str,
    description: &str,
    proof_ref: &str,
    created_at: Timestamp,
) -> Digest {
    let project_bytes = project_id.raw().to_be_bytes();
    let index_bytes = milestone_index.to_be_bytes();
    let name_len = (name.len() as u32).to_be_bytes();
    let description_len = (description.len() as u32).to_be_bytes();
    let proof_len = (proof_ref.len() as u32).to_be_bytes();
    let time_bytes = created_at.as_secs().to_be_bytes();

    Digest::new(blake2b_256_multi(&[
        &[ATTESTATION_DIGEST_VERSION, DOMAIN_MESSAGE],
        &project_bytes,
        &index_bytes,
        &name_len,
        name.as_bytes(),
        &description_len,
        description.as_bytes(),
        &proof_len,
        proof_ref.as_bytes(),
        &time_bytes,
    ]))
}

/// The storage key of a recorded attestation:
/// (project, milestone index, proof ref, creation time).
pub fn attestation_key(
    project_id: ProjectId,
    milestone_index: u32,
    proof_ref: &str,
    created_at: Timestamp,
) -> AttestationKey {
    let project_bytes = project_id.raw().to_be_bytes();
    let index_bytes = milestone_index.to_be_bytes();
    let proof_len = (proof_ref.len() as u32).to_be_bytes();
    let time_bytes = created_at.as_secs().to_be_bytes();

    AttestationKey::new(blake2b_256_multi(&[
        &[ATTESTATION_DIGEST_VERSION, DOMAIN_KEY],
        &project_bytes,
        &index_bytes,
        &proof_len,
        proof_ref.as_bytes(),
        &time_bytes,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectId {
        ProjectId::new(7)
    }

    #[test]
    fn digest_is_deterministic() {
        let a = attestation_digest(project(), 0, "beta", "beta shipped", "ipfs://x", Timestamp::new(100));
        let b = attestation_digest(project(), 0, "beta", "beta shipped", "ipfs://x", Timestamp::new(100));
        assert_eq!(a, b);
    }

    #[test]
    fn digest_depends_on_every_field() {
        let base = attestation_digest(project(), 0, "beta", "d", "p", Timestamp::new(100));
        assert_ne!(
            base,
            attestation_digest(ProjectId::new(8), 0, "beta", "d", "p", Timestamp::new(100))
        );
        assert_ne!(
            base,
            attestation_digest(project(), 1, "beta", "d", "p", Timestamp::new(100))
        );
        assert_ne!(
            base,
            attestation_digest(project(), 0, "gamma", "d", "p", Timestamp::new(100))
        );
        assert_ne!(
            base,
            attestation_digest(project(), 0, "beta", "e", "p", Timestamp::new(100))
        );
        assert_ne!(
            base,
            attestation_digest(project(), 0, "beta", "d", "q", Timestamp::new(100))
        );
        assert_ne!(
            base,
            attestation_digest(project(), 0, "beta", "d", "p", Timestamp::new(101))
        );
    }

    #[test]
    fn length_prefix_prevents_field_bleed() {
        // "ab" + "c" must not collide with "a" + "bc".
        let a = attestation_digest(project(), 0, "ab", "c", "p", Timestamp::new(100));
        let b = attestation_digest(project(), 0, "a", "bc", "p", Timestamp::new(100));
        assert_ne!(a, b);
    }

    #[test]
    fn key_differs_from_message_digest() {
        let d = attestation_digest(project(), 0, "beta", "d", "p", Timestamp::new(100));
        let k = attestation_key(project(), 0, "p", Timestamp::new(100));
        assert_ne!(d.as_bytes(), k.as_bytes());
    }

    #[test]
    fn key_changes_with_time() {
        let k1 = attestation_key(project(), 0, "p", Timestamp::new(100));
        let k2 = attestation_key(project(), 0, "p", Timestamp::new(101));
        assert_ne!(k1, k2);
    }
}
