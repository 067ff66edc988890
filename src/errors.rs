use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassMan.
#[derive(Debug, Error)]
pub enum PassManError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Unable to decode entry: wrong master password or tampered data")]
    Decode,

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    // --- Entry errors ---
    #[error("Entry '{0}' not found")]
    NotFound(String),

    #[error("Entry '{0}' already exists")]
    AlreadyExists(String),

    #[error("Invalid entry name: {0}")]
    InvalidName(String),

    #[error("Secret value cannot be empty")]
    EmptySecret,

    #[error("Entry file is corrupt: {0}")]
    CorruptEntry(String),

    #[error("Unsupported entry format version {0}")]
    UnsupportedFormat(u8),

    // --- Master credential errors ---
    #[error("No master password record found at {0}")]
    MasterRecordNotFound(PathBuf),

    #[error("Vault is already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid master password record: {0}")]
    InvalidRecord(String),

    #[error("Master password cannot be empty")]
    EmptyMasterPassword,

    #[error("Incorrect master password")]
    IncorrectPassword,

    // --- Generator errors ---
    #[error("Select at least one character class (letters, digits, symbols)")]
    NoCharacterClasses,

    #[error("Invalid generator options: {0}")]
    InvalidGeneratorOptions(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for PassMan results.
pub type Result<T> = std::result::Result<T, PassManError>;
