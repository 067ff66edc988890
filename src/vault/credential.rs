//! Master password verification.
//!
//! The reserved `savedpassword` file gates access to the vault.  Its
//! presence means the vault is initialized; it is written exactly once
//! and never changed afterwards.
//!
//! Current records are JSON:
//!
//! ```text
//! { "version": 1, "salt": <b64>, "kdf": {..}, "verifier": <b64>, "created_at": .. }
//! ```
//!
//! where `verifier = HKDF-Expand(Argon2id(password, salt, kdf))`.  The
//! `kdf` parameters also apply to every entry key in the vault.
//!
//! Records written by PassMan 0.1 are exactly 32 raw bytes, the
//! unsalted SHA-256 of the password.  They are still accepted so old
//! vaults can be unlocked; their entries use the default parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::store::VaultStore;
use crate::crypto::kdf::{derive_key, generate_salt, KdfParams, SALT_LEN};
use crate::crypto::keys::{derive_verifier, MasterPassword, KEY_LEN};
use crate::errors::{PassManError, Result};

/// Current credential record version.
const RECORD_VERSION: u8 = 1;

/// Size of a legacy record (a bare SHA-256 digest).
const LEGACY_RECORD_LEN: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialRecord {
    version: u8,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    salt: Vec<u8>,

    kdf: KdfParams,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    verifier: Vec<u8>,

    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
enum Scheme {
    Argon2id {
        salt: Vec<u8>,
        verifier: Vec<u8>,
        created_at: DateTime<Utc>,
    },
    LegacySha256 {
        digest: [u8; LEGACY_RECORD_LEN],
    },
}

/// A loaded master credential record.
#[derive(Debug, Clone)]
pub struct MasterCredential {
    scheme: Scheme,
    kdf: KdfParams,
}

impl MasterCredential {
    /// Write the credential record for a brand-new vault.
    ///
    /// Fails with `AlreadyInitialized` if a record exists; there is no
    /// way back to the uninitialized state.
    pub fn initialize(
        store: &VaultStore,
        password: &MasterPassword,
        params: &KdfParams,
    ) -> Result<Self> {
        if store.has_record() {
            return Err(PassManError::AlreadyInitialized(store.record_path()));
        }
        if password.is_empty() {
            return Err(PassManError::EmptyMasterPassword);
        }
        params.validate()?;

        let salt = generate_salt();
        let record_key = derive_key(password.as_bytes(), &salt, params)?;
        let verifier = derive_verifier(&record_key)?;

        let record = CredentialRecord {
            version: RECORD_VERSION,
            salt: salt.to_vec(),
            kdf: *params,
            verifier: verifier.to_vec(),
            created_at: Utc::now(),
        };

        let bytes = serde_json::to_vec_pretty(&record)
            .map_err(|e| PassManError::InvalidRecord(format!("serialize: {e}")))?;
        store.create_record(&bytes)?;

        tracing::info!(path = %store.record_path().display(), "initialized master credential");

        Ok(Self::from_record(record))
    }

    /// Load the credential record of an initialized vault.
    pub fn load(store: &VaultStore) -> Result<Self> {
        let bytes = store.read_record()?;
        Self::from_bytes(&bytes)
    }

    /// Parse a credential record, current or legacy.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() == LEGACY_RECORD_LEN {
            let mut digest = [0u8; LEGACY_RECORD_LEN];
            digest.copy_from_slice(bytes);
            return Ok(Self {
                scheme: Scheme::LegacySha256 { digest },
                kdf: KdfParams::default(),
            });
        }

        let record: CredentialRecord = serde_json::from_slice(bytes)
            .map_err(|e| PassManError::InvalidRecord(format!("record JSON: {e}")))?;

        if record.version != RECORD_VERSION {
            return Err(PassManError::InvalidRecord(format!(
                "unsupported version {}, expected {RECORD_VERSION}",
                record.version
            )));
        }
        if record.salt.len() != SALT_LEN {
            return Err(PassManError::InvalidRecord(format!(
                "salt must be {SALT_LEN} bytes, got {}",
                record.salt.len()
            )));
        }
        if record.verifier.len() != KEY_LEN {
            return Err(PassManError::InvalidRecord(format!(
                "verifier must be {KEY_LEN} bytes, got {}",
                record.verifier.len()
            )));
        }
        record
            .kdf
            .validate()
            .map_err(|e| PassManError::InvalidRecord(e.to_string()))?;

        Ok(Self::from_record(record))
    }

    fn from_record(record: CredentialRecord) -> Self {
        Self {
            scheme: Scheme::Argon2id {
                salt: record.salt,
                verifier: record.verifier,
                created_at: record.created_at,
            },
            kdf: record.kdf,
        }
    }

    /// Check `password` against the record in constant time.
    pub fn verify(&self, password: &MasterPassword) -> Result<bool> {
        let matches = match &self.scheme {
            Scheme::Argon2id { salt, verifier, .. } => {
                let record_key = derive_key(password.as_bytes(), salt, &self.kdf)?;
                let candidate = derive_verifier(&record_key)?;
                bool::from(candidate.as_slice().ct_eq(verifier.as_slice()))
            }
            Scheme::LegacySha256 { digest } => {
                let candidate = Sha256::digest(password.as_bytes());
                bool::from(candidate.as_slice().ct_eq(&digest[..]))
            }
        };

        if !matches {
            tracing::debug!("master password verification failed");
        }
        Ok(matches)
    }

    /// KDF parameters for every entry key in this vault.
    pub fn kdf_params(&self) -> KdfParams {
        self.kdf
    }

    /// Returns `true` for an unsalted SHA-256 record from PassMan 0.1.
    pub fn is_legacy(&self) -> bool {
        matches!(self.scheme, Scheme::LegacySha256 { .. })
    }

    /// When the record was written (unknown for legacy records).
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        match &self.scheme {
            Scheme::Argon2id { created_at, .. } => Some(*created_at),
            Scheme::LegacySha256 { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
