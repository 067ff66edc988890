//! The operations a front end drives.
//!
//! `Vault` is the unauthenticated handle on a data directory: it knows
//! whether the vault is initialized and turns a master password into a
//! `VaultSession`.  The session keeps the authenticated password for its
//! lifetime and composes the codec and the store for every operation.

use std::path::Path;

use zeroize::Zeroizing;

use super::credential::MasterCredential;
use super::format::{decrypt_legacy_secret, decrypt_secret, encrypt_secret, EncryptedBlob};
use super::name::{sanitize_name, strip_name};
use super::store::VaultStore;
use crate::crypto::kdf::KdfParams;
use crate::crypto::keys::MasterPassword;
use crate::errors::{PassManError, Result};
use crate::generator::{self, GeneratorOptions};

/// Handle on a vault directory before authentication.
#[derive(Debug, Clone)]
pub struct Vault {
    store: VaultStore,
}

impl Vault {
    /// Open the vault at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: &Path) -> Result<Self> {
        Ok(Self {
            store: VaultStore::open(data_dir)?,
        })
    }

    pub fn store(&self) -> &VaultStore {
        &self.store
    }

    /// `false` on first run, before `initialize` has been called.
    pub fn is_initialized(&self) -> bool {
        self.store.has_record()
    }

    /// First run: write the credential record and start a session.
    pub fn initialize(&self, password: MasterPassword, params: &KdfParams) -> Result<VaultSession> {
        let credential = MasterCredential::initialize(&self.store, &password, params)?;
        VaultSession::new(self.store.clone(), password, &credential)
    }

    /// Check a master password without starting a session.
    pub fn verify_master(&self, password: &MasterPassword) -> Result<bool> {
        MasterCredential::load(&self.store)?.verify(password)
    }

    /// Verify `password` and start a session, or fail with
    /// `IncorrectPassword`.
    pub fn unlock(&self, password: MasterPassword) -> Result<VaultSession> {
        let credential = MasterCredential::load(&self.store)?;
        if !credential.verify(&password)? {
            return Err(PassManError::IncorrectPassword);
        }
        if credential.is_legacy() {
            tracing::warn!("vault uses a legacy unsalted master password record");
        }

        tracing::info!(path = %self.store.root().display(), "vault unlocked");
        VaultSession::new(self.store.clone(), password, &credential)
    }
}

/// An authenticated session over one vault.
#[derive(Debug)]
pub struct VaultSession {
    store: VaultStore,
    password: MasterPassword,
    kdf: KdfParams,
    /// Vault was created by PassMan 0.1, so entries may be in its format.
    legacy: bool,
    /// Sorted snapshot of entry names, kept in sync by add/delete.
    entries: Vec<String>,
}

impl VaultSession {
    /// Build a session from an already verified password.
    fn new(
        store: VaultStore,
        password: MasterPassword,
        credential: &MasterCredential,
    ) -> Result<Self> {
        let entries = store.list()?;
        Ok(Self {
            store,
            password,
            kdf: credential.kdf_params(),
            legacy: credential.is_legacy(),
            entries,
        })
    }

    /// Entry names known to this session, sorted.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Map user input onto a stored entry name.
    ///
    /// An existing entry whose name matches the input minus disallowed
    /// characters wins, which keeps space-padded 0.1 names reachable.
    /// Otherwise the input is sanitized the same way `add_entry` does.
    pub fn find_entry(&self, raw: &str) -> Result<String> {
        let stripped = strip_name(raw);
        if self.store.contains(&stripped) {
            return Ok(stripped);
        }
        sanitize_name(raw)
    }

    /// Re-read the entry list from disk.
    pub fn refresh(&mut self) -> Result<()> {
        self.entries = self.store.list()?;
        Ok(())
    }

    /// Encrypt and store a new entry.
    ///
    /// `name` is sanitized first; the stored name is returned so the
    /// caller can show it.  An existing entry is never overwritten.
    pub fn add_entry(&mut self, name: &str, secret: &str) -> Result<String> {
        let name = sanitize_name(name)?;
        if secret.is_empty() {
            return Err(PassManError::EmptySecret);
        }
        // Skip the KDF for an obvious collision; `create` still guards the race.
        if self.store.contains(&name) {
            return Err(PassManError::AlreadyExists(name));
        }

        let blob = encrypt_secret(secret, &self.password, &self.kdf)?;
        self.store.create(&name, &blob.to_bytes())?;

        if let Err(pos) = self.entries.binary_search(&name) {
            self.entries.insert(pos, name.clone());
        }
        tracing::info!(entry = %name, "added entry");
        Ok(name)
    }

    /// Decrypt an entry's secret.
    ///
    /// In a vault created by PassMan 0.1, an entry that is not a valid
    /// current blob is read as a 0.1 entry instead.  New entries are
    /// always written in the current format.
    pub fn reveal_entry(&self, name: &str) -> Result<Zeroizing<String>> {
        let bytes = self.store.read(name)?;
        let current = EncryptedBlob::from_bytes(&bytes)
            .and_then(|blob| decrypt_secret(&blob, &self.password, &self.kdf));

        let err = match current {
            Err(err) if self.legacy && may_be_legacy(&err) => err,
            other => return other,
        };

        match decrypt_legacy_secret(&bytes, &self.password) {
            Ok(secret) => {
                tracing::debug!(entry = name, "decoded legacy entry");
                Ok(secret)
            }
            // A blob that parsed but failed its tag stays a current-format error.
            Err(_) if matches!(err, PassManError::Decode) => Err(err),
            Err(legacy_err) => Err(legacy_err),
        }
    }

    /// Permanently delete an entry.  Confirmation is the caller's job.
    pub fn delete_entry(&mut self, name: &str) -> Result<()> {
        self.store.delete(name)?;
        self.entries.retain(|n| n != name);
        tracing::info!(entry = name, "deleted entry");
        Ok(())
    }

    /// Generate a random password; see [`generator::generate_password`].
    pub fn generate_password(&self, options: &GeneratorOptions) -> Result<String> {
        generator::generate_password(options)
    }

    /// KDF parameters used for entry keys in this vault.
    pub fn kdf_params(&self) -> KdfParams {
        self.kdf
    }

    pub fn store(&self) -> &VaultStore {
        &self.store
    }
}

/// Errors a PassMan 0.1 entry produces when read as a current blob.
fn may_be_legacy(err: &PassManError) -> bool {
    matches!(
        err,
        PassManError::CorruptEntry(_) | PassManError::UnsupportedFormat(_) | PassManError::Decode
    )
}
