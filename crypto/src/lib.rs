//! Cryptographic primitives for the SLUICE settlement engine.
//!
//! - **Ed25519** for attestation signing and signature verification
//! - **Blake2b** for canonical digests and attestation keys
//! - Identity derivation with `slc_` prefix and base32 encoding
//! - Signer recovery: verify a detached signature over a digest and derive
//!   the signing identity from the supplied public key

pub mod hash;
pub mod identity;
pub mod keys;
pub mod sign;

pub use hash::{blake2b_256, blake2b_256_multi};
pub use identity::{decode_identity, derive_identity, validate_identity};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{recover_signer, sign_digest, verify_signature};
