//! Entry file format and the secret codec.
//!
//! Every entry file holds one self-contained blob:
//!
//! ```text
//! [version: 1 byte][nonce: 12 bytes][salt: 16 bytes][ciphertext + tag: 16+ bytes]
//! ```
//!
//! - **Version**: format version (currently `1`).
//! - **Nonce**: random AES-256-GCM nonce, fresh for every blob.
//! - **Salt**: random Argon2id salt; the entry key is derived from the
//!   master password and this salt.
//! - **Ciphertext**: the UTF-8 secret, followed by the GCM tag.

use zeroize::{Zeroize, Zeroizing};

use crate::crypto::encryption::{self, NONCE_LEN, TAG_LEN};
use crate::crypto::kdf::{derive_key, generate_salt, KdfParams, SALT_LEN};
use crate::crypto::keys::MasterPassword;
use crate::crypto::legacy::{self, LEGACY_NONCE_LEN, LEGACY_SALT_LEN};
use crate::errors::{PassManError, Result};

/// Current blob format version.
pub const FORMAT_VERSION: u8 = 1;

/// Fixed-size prefix: 1 (version) + 12 (nonce) + 16 (salt).
pub const HEADER_LEN: usize = 1 + NONCE_LEN + SALT_LEN;

/// Smallest well-formed blob: header plus an empty ciphertext's tag.
pub const MIN_BLOB_LEN: usize = HEADER_LEN + TAG_LEN;

/// PassMan 0.1 prefix: 8 (nonce) + 16 (salt), no version byte.
pub const LEGACY_HEADER_LEN: usize = LEGACY_NONCE_LEN + LEGACY_SALT_LEN;

/// A parsed entry blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBlob {
    nonce: [u8; NONCE_LEN],
    salt: [u8; SALT_LEN],
    ciphertext: Vec<u8>,
}

impl EncryptedBlob {
    /// Serialize to the on-disk layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        buf.push(FORMAT_VERSION);
        buf.extend_from_slice(&self.nonce);
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.ciphertext);
        buf
    }

    /// Parse the on-disk layout.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_BLOB_LEN {
            return Err(PassManError::CorruptEntry(format!(
                "blob is {} bytes, expected at least {MIN_BLOB_LEN}",
                data.len()
            )));
        }

        let version = data[0];
        if version != FORMAT_VERSION {
            return Err(PassManError::UnsupportedFormat(version));
        }

        let (nonce_bytes, rest) = data[1..].split_at(NONCE_LEN);
        let (salt_bytes, ciphertext) = rest.split_at(SALT_LEN);

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);
        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(salt_bytes);

        Ok(Self {
            nonce,
            salt,
            ciphertext: ciphertext.to_vec(),
        })
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// Ciphertext including the trailing tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

/// Encrypt one secret under a fresh salt and nonce.
///
/// The entry key is derived from `password` and the new salt, used once,
/// and zeroed when it goes out of scope.
pub fn encrypt_secret(
    secret: &str,
    password: &MasterPassword,
    params: &KdfParams,
) -> Result<EncryptedBlob> {
    let salt = generate_salt();
    let key = derive_key(password.as_bytes(), &salt, params)?;
    let (nonce, ciphertext) = encryption::encrypt(&key, secret.as_bytes())?;

    Ok(EncryptedBlob {
        nonce,
        salt,
        ciphertext,
    })
}

/// Decrypt a blob back into its secret.
///
/// A wrong master password, a modified blob, or plaintext that is not
/// UTF-8 all fail with `Decode`.
pub fn decrypt_secret(
    blob: &EncryptedBlob,
    password: &MasterPassword,
    params: &KdfParams,
) -> Result<Zeroizing<String>> {
    let key = derive_key(password.as_bytes(), &blob.salt, params)?;
    let plaintext = encryption::decrypt(&key, &blob.nonce, &blob.ciphertext)?;

    into_secret(plaintext)
}

/// Decrypt a PassMan 0.1 entry: `nonce(8) || salt(16) || ciphertext`.
///
/// Without a tag the only wrong-key signal is plaintext that is not
/// UTF-8, which surfaces as `Decode`.
pub fn decrypt_legacy_secret(data: &[u8], password: &MasterPassword) -> Result<Zeroizing<String>> {
    if data.len() <= LEGACY_HEADER_LEN {
        return Err(PassManError::CorruptEntry(format!(
            "legacy blob is {} bytes, expected more than {LEGACY_HEADER_LEN}",
            data.len()
        )));
    }

    let (nonce_bytes, rest) = data.split_at(LEGACY_NONCE_LEN);
    let (salt, ciphertext) = rest.split_at(LEGACY_SALT_LEN);
    let mut nonce = [0u8; LEGACY_NONCE_LEN];
    nonce.copy_from_slice(nonce_bytes);

    let key = legacy::derive_legacy_key(password, salt)?;
    into_secret(legacy::legacy_decrypt(&key, &nonce, ciphertext))
}

fn into_secret(plaintext: Vec<u8>) -> Result<Zeroizing<String>> {
    // On error, zeroize the bytes inside the error before discarding.
    String::from_utf8(plaintext).map(Zeroizing::new).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        PassManError::Decode
    })
}
