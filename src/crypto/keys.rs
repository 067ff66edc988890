//! In-memory key material and the master-credential verifier.
//!
//! `MasterPassword` and `DerivedKey` wipe themselves on drop.  The
//! verifier stored in the credential record is an HKDF-SHA256 expansion
//! of an Argon2id output, so the record never holds a usable entry key.

use std::fmt;

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{PassManError, Result};

/// Length of derived keys (256 bits).
pub const KEY_LEN: usize = 32;

/// HKDF context string for the master-credential verifier.
const VERIFIER_INFO: &[u8] = b"passman-master-verifier";

/// The master password, held only for the lifetime of a session.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterPassword {
    secret: String,
}

impl MasterPassword {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// UTF-8 bytes of the password, the input to every derivation.
    pub fn as_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.secret
    }

    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }

    pub fn len(&self) -> usize {
        self.secret.chars().count()
    }
}

impl From<String> for MasterPassword {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl From<&str> for MasterPassword {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl fmt::Debug for MasterPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterPassword(<redacted>)")
    }
}

/// A 32-byte key derived from the master password and a salt.
///
/// Never persisted; recomputed for each operation and zeroed on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    pub(crate) fn zeroed() -> Self {
        Self {
            bytes: [0u8; KEY_LEN],
        }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8; KEY_LEN] {
        &mut self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

/// Derive the master-credential verifier from a record key.
///
/// We skip the `extract` step and use the Argon2id output directly as
/// the pseudo-random key, because it already has full entropy.
pub fn derive_verifier(record_key: &DerivedKey) -> Result<[u8; KEY_LEN]> {
    let hk = Hkdf::<Sha256>::from_prk(record_key.as_bytes())
        .map_err(|e| PassManError::KeyDerivation(format!("HKDF init failed: {e}")))?;

    let mut okm = [0u8; KEY_LEN];
    hk.expand(VERIFIER_INFO, &mut okm)
        .map_err(|e| PassManError::KeyDerivation(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}
