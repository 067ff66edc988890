//! Password-based key derivation using Argon2id.
//!
//! Every entry gets its own random salt, so every entry is encrypted
//! under a different key even though all keys come from the same
//! master password.  Parameters are fixed per vault when the master
//! credential record is written, and read back from that record.

use std::time::Instant;

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::keys::{DerivedKey, KEY_LEN};
use crate::errors::{PassManError, Result};

/// Length of a per-entry (or per-record) salt in bytes.
pub const SALT_LEN: usize = 16;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Largest memory cost we will allocate, in KiB (1 GB).
pub const MAX_MEMORY_KIB: u32 = 1_048_576;

/// Upper bound for both iterations and lanes.
pub const MAX_ITERATIONS: u32 = 64;
pub const MAX_PARALLELISM: u32 = 64;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl KdfParams {
    /// Reject parameters outside the enforced bounds.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_MEMORY_KIB..=MAX_MEMORY_KIB).contains(&self.memory_kib) {
            return Err(PassManError::KeyDerivation(format!(
                "Argon2 memory_kib must be between {MIN_MEMORY_KIB} and {MAX_MEMORY_KIB} (got {})",
                self.memory_kib
            )));
        }
        if !(1..=MAX_ITERATIONS).contains(&self.iterations) {
            return Err(PassManError::KeyDerivation(format!(
                "Argon2 iterations must be between 1 and {MAX_ITERATIONS} (got {})",
                self.iterations
            )));
        }
        if !(1..=MAX_PARALLELISM).contains(&self.parallelism) {
            return Err(PassManError::KeyDerivation(format!(
                "Argon2 parallelism must be between 1 and {MAX_PARALLELISM} (got {})",
                self.parallelism
            )));
        }
        Ok(())
    }
}

/// Derive a 32-byte key from a master password and salt.
///
/// The same password + salt + params always produce the same key.
pub fn derive_key(password: &[u8], salt: &[u8], kdf_params: &KdfParams) -> Result<DerivedKey> {
    kdf_params.validate()?;

    let params = Params::new(
        kdf_params.memory_kib,
        kdf_params.iterations,
        kdf_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| PassManError::KeyDerivation(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let started = Instant::now();
    let mut key = DerivedKey::zeroed();
    argon2
        .hash_password_into(password, salt, key.as_mut_bytes())
        .map_err(|e| PassManError::KeyDerivation(format!("Argon2id hashing failed: {e}")))?;
    tracing::trace!(elapsed = ?started.elapsed(), "derived key");

    Ok(key)
}

/// Generate a cryptographically random salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
