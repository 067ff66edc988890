//! Decryption for entries written by PassMan 0.1.
//!
//! Those entries were encrypted with Salsa20 (8-byte nonce, no MAC) under
//! a key from PBKDF2-HMAC-SHA1 with 1000 rounds.  The password was fed to
//! PBKDF2 as Latin-1 bytes.  Nothing here is used for writing.

use pbkdf2::pbkdf2_hmac;
use salsa20::cipher::{KeyIvInit, StreamCipher};
use salsa20::{Key, Nonce, Salsa20};
use sha1::Sha1;
use zeroize::Zeroizing;

use super::keys::{DerivedKey, MasterPassword};
use crate::errors::{PassManError, Result};

/// Salsa20 nonce length used by 0.1 entries.
pub const LEGACY_NONCE_LEN: usize = 8;

/// Length of the ASCII salt stored after the nonce.
pub const LEGACY_SALT_LEN: usize = 16;

/// PBKDF2 round count used by 0.1.
const LEGACY_ROUNDS: u32 = 1_000;

/// Derive the 0.1 entry key for `salt`.
///
/// Fails with `Decode` for passwords that have no Latin-1 encoding; 0.1
/// could not have written entries under such a password.
pub fn derive_legacy_key(password: &MasterPassword, salt: &[u8]) -> Result<DerivedKey> {
    let latin1: Zeroizing<Vec<u8>> = Zeroizing::new(
        password
            .as_str()
            .chars()
            .map(|c| u8::try_from(u32::from(c)).map_err(|_| PassManError::Decode))
            .collect::<Result<Vec<u8>>>()?,
    );

    let mut key = DerivedKey::zeroed();
    pbkdf2_hmac::<Sha1>(&latin1, salt, LEGACY_ROUNDS, key.as_mut_bytes());
    Ok(key)
}

/// Apply the Salsa20 keystream to `ciphertext`.
///
/// There is no tag, so this cannot fail on a wrong key; the caller has
/// to judge the plaintext.
pub fn legacy_decrypt(
    key: &DerivedKey,
    nonce: &[u8; LEGACY_NONCE_LEN],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut cipher = Salsa20::new(Key::from_slice(key.as_bytes()), Nonce::from_slice(nonce));
    let mut plaintext = ciphertext.to_vec();
    cipher.apply_keystream(&mut plaintext);
    plaintext
}
