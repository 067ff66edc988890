//! Cryptographic primitives for PassMan.
//!
//! This module provides:
//! - Argon2id password-based key derivation (`kdf`)
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Zeroizing key types and the master verifier (`keys`)
//! - Read-only PBKDF2 + Salsa20 decryption of PassMan 0.1 entries (`legacy`)

pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod legacy;

pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_key, generate_salt, KdfParams, SALT_LEN};
pub use keys::{derive_verifier, DerivedKey, MasterPassword, KEY_LEN};
