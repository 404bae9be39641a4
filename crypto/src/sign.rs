//! Ed25519 signing, verification, and signer recovery.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use sluice_types::{Digest, Identity, PrivateKey, PublicKey, Signature};

/// Sign a canonical digest with a private key, returning the signature.
pub fn sign_digest(digest: &Digest, private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    let sig = signing_key.sign(digest.as_bytes());
    Signature(sig.to_bytes())
}

/// Verify a signature against a digest and public key.
///
/// Returns `true` if the signature is valid, `false` otherwise.
pub fn verify_signature(digest: &Digest, signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify(digest.as_bytes(), &dalek_sig).is_ok()
}

/// Recover the signer identity of a detached signature over `digest`.
///
/// Ed25519 carries no key-recovery, so the submission supplies the public
/// key alongside the signature: recovery means verifying the signature with
/// that key and deriving the `slc_` identity from it. Returns `None` when
/// the signature does not check out, so a forged submission never yields an
/// identity to authorize.
pub fn recover_signer(
    digest: &Digest,
    signature: &Signature,
    public_key: &PublicKey,
) -> Option<Identity> {
    if !verify_signature(digest, signature, public_key) {
        return None;
    }
    Some(crate::identity::derive_identity(public_key))
}
