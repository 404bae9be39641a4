//! Participant identity with `slc_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A SLUICE participant identity, always prefixed with `slc_`.
///
/// Derived from the participant's public key via Blake2b hashing + base32
/// encoding (see `sluice_crypto::derive_identity`). Investors, project
/// creators, verifiers, and the administrator are all addressed this way.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// The standard prefix for all SLUICE identities.
    pub const PREFIX: &'static str = "slc_";

    /// Create a new identity from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `slc_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "identity must start with slc_");
        Self(s)
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this identity is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
