//! Vault module: encrypted entry storage.
//!
//! This module provides:
//! - Entry name sanitization (`name`)
//! - The entry blob format and secret codec (`format`)
//! - The directory-backed entry catalog (`store`)
//! - Master password verification (`credential`)
//! - The `Vault` / `VaultSession` facade front ends drive (`session`)

pub mod credential;
pub mod entry;
pub mod format;
pub mod name;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use credential::MasterCredential;
pub use entry::EntryMetadata;
pub use format::{decrypt_secret, encrypt_secret, EncryptedBlob};
pub use name::{sanitize_name, strip_name, RESERVED_RECORD_NAME};
pub use session::{Vault, VaultSession};
pub use store::VaultStore;
