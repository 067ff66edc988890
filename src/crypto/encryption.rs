//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! returns it next to the ciphertext, so the blob layer can place it
//! where the entry format wants it.  The 16-byte tag is appended to
//! the ciphertext by the cipher.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use super::keys::DerivedKey;
use crate::errors::{PassManError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key`.
///
/// Returns `(nonce, ciphertext || tag)`.
pub fn encrypt(key: &DerivedKey, plaintext: &[u8]) -> Result<([u8; NONCE_LEN], Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| PassManError::Encryption(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| PassManError::Encryption(format!("encryption error: {e}")))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    nonce_bytes.copy_from_slice(&nonce);
    Ok((nonce_bytes, ciphertext))
}

/// Decrypt and authenticate `ciphertext` (which carries its tag).
///
/// Any authentication failure, including a wrong key, is `Decode`.
pub fn decrypt(key: &DerivedKey, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN || ciphertext.len() < TAG_LEN {
        return Err(PassManError::Decode);
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| PassManError::Decode)?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| PassManError::Decode)
}
