//! File-system-backed entry catalog.
//!
//! `VaultStore` owns one directory.  Each entry is a file whose name is
//! the sanitized entry name and whose content is an opaque blob.  The
//! master credential record lives in the same directory under a
//! reserved name and is only reachable through the `*_record` methods.
//!
//! New files are written to a temp file in the same directory and then
//! published with a no-clobber link/rename, so an entry name never
//! points at a half-written file and an existing entry is never
//! overwritten.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::entry::EntryMetadata;
use super::name::{is_entry_name, validate_name, RESERVED_RECORD_NAME};
use crate::errors::{PassManError, Result};

/// Handle on a vault data directory.
#[derive(Debug, Clone)]
pub struct VaultStore {
    root: PathBuf,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the store rooted at `root`, creating the directory on first run.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            fs::create_dir_all(root)?;

            // On Unix, restrict the data directory to the owner.
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(root, fs::Permissions::from_mode(0o700))?;
            }

            tracing::info!(path = %root.display(), "created vault directory");
        }

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Returns the data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Names of all entries, sorted by name.
    ///
    /// Skips the credential record, directories, temp files and anything
    /// else whose file name is not a valid entry name.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .entry_files()?
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        names.sort();
        Ok(names)
    }

    /// Metadata for all entries, sorted by name.
    pub fn list_metadata(&self) -> Result<Vec<EntryMetadata>> {
        let mut list: Vec<EntryMetadata> = self
            .entry_files()?
            .into_iter()
            .map(|(name, path)| {
                let modified = fs::metadata(&path)
                    .and_then(|m| m.modified())
                    .ok()
                    .map(DateTime::<Utc>::from);
                EntryMetadata { name, modified }
            })
            .collect();

        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    /// Returns `true` if an entry with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entry_path(name).is_ok_and(|path| path.is_file())
    }

    /// Store a new entry.  Fails with `AlreadyExists` rather than
    /// overwriting.
    pub fn create(&self, name: &str, blob: &[u8]) -> Result<()> {
        let path = self.entry_path(name)?;

        self.write_new(&path, blob).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => PassManError::AlreadyExists(name.to_string()),
            _ => PassManError::Io(e),
        })?;

        tracing::debug!(entry = name, "created entry");
        Ok(())
    }

    /// Read the raw blob of an entry.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.entry_path(name)?;

        fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PassManError::NotFound(name.to_string()),
            _ => PassManError::Io(e),
        })
    }

    /// Permanently remove an entry.
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.entry_path(name)?;

        fs::remove_file(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PassManError::NotFound(name.to_string()),
            _ => PassManError::Io(e),
        })?;

        tracing::debug!(entry = name, "deleted entry");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Master credential record
    // ------------------------------------------------------------------

    /// Path of the reserved credential record.
    pub fn record_path(&self) -> PathBuf {
        self.root.join(RESERVED_RECORD_NAME)
    }

    /// Returns `true` once the vault has been initialized.
    pub fn has_record(&self) -> bool {
        self.record_path().is_file()
    }

    pub(crate) fn read_record(&self) -> Result<Vec<u8>> {
        let path = self.record_path();

        fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PassManError::MasterRecordNotFound(path.clone()),
            _ => PassManError::Io(e),
        })
    }

    pub(crate) fn create_record(&self, bytes: &[u8]) -> Result<()> {
        let path = self.record_path();

        self.write_new(&path, bytes).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => PassManError::AlreadyInitialized(path.clone()),
            _ => PassManError::Io(e),
        })
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn entry_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }

    /// Regular files in the directory whose names are valid entry names.
    fn entry_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut files = Vec::new();

        for dir_entry in fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = dir_entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if is_entry_name(&name) {
                files.push((name, dir_entry.path()));
            }
        }

        Ok(files)
    }

    /// Write `bytes` to `target`, failing with `AlreadyExists` if it exists.
    ///
    /// The temp file is created owner-only and removed on every error
    /// path when the `NamedTempFile` is dropped.
    fn write_new(&self, target: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut tmp = tempfile::Builder::new()
            .prefix(".passman-")
            .suffix(".tmp")
            .tempfile_in(&self.root)?;

        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;

        tmp.persist_noclobber(target).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, VaultStore) {
        let dir = TempDir::new().unwrap();
        let store = VaultStore::open(&dir.path().join("PassManData")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_missing_directory() {
        let (_dir, store) = store();
        assert!(store.root().is_dir());
        assert!(!store.has_record());
    }

    #[test]
    fn create_read_delete_cycle() {
        let (_dir, store) = store();

        store.create("mail", b"blob").unwrap();
        assert!(store.contains("mail"));
        assert_eq!(store.read("mail").unwrap(), b"blob");

        store.delete("mail").unwrap();
        assert!(!store.contains("mail"));
        assert!(matches!(store.read("mail"), Err(PassManError::NotFound(_))));
    }

    #[test]
    fn create_never_overwrites() {
        let (_dir, store) = store();

        store.create("bank", b"first").unwrap();
        let result = store.create("bank", b"second");

        assert!(matches!(result, Err(PassManError::AlreadyExists(ref n)) if n == "bank"));
        assert_eq!(store.read("bank").unwrap(), b"first");
    }

    #[test]
    fn failed_create_leaves_no_temp_files() {
        let (_dir, store) = store();

        store.create("bank", b"first").unwrap();
        let _ = store.create("bank", b"second");

        let leftovers: Vec<_> = fs::read_dir(store.root())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn list_skips_record_dirs_and_foreign_files() {
        let (_dir, store) = store();

        store.create("zeta", b"z").unwrap();
        store.create("Alpha", b"a").unwrap();
        store.create_record(b"record").unwrap();
        fs::create_dir(store.root().join("subdir")).unwrap();
        fs::write(store.root().join(".passman-x.tmp"), b"junk").unwrap();
        fs::write(store.root().join("notes.txt"), b"junk").unwrap();

        assert_eq!(store.list().unwrap(), vec!["Alpha", "zeta"]);

        let meta = store.list_metadata().unwrap();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta[0].name, "Alpha");
        assert!(meta[0].modified.is_some());
    }

    #[test]
    fn reserved_record_is_not_an_entry() {
        let (_dir, store) = store();
        store.create_record(b"record").unwrap();

        assert!(matches!(
            store.read(RESERVED_RECORD_NAME),
            Err(PassManError::InvalidName(_))
        ));
        assert!(matches!(
            store.delete(RESERVED_RECORD_NAME),
            Err(PassManError::InvalidName(_))
        ));
        assert!(store.has_record());
    }

    #[test]
    fn record_is_written_once() {
        let (_dir, store) = store();

        store.create_record(b"one").unwrap();
        assert!(matches!(
            store.create_record(b"two"),
            Err(PassManError::AlreadyInitialized(_))
        ));
        assert_eq!(store.read_record().unwrap(), b"one");
    }

    #[test]
    fn missing_record_is_reported() {
        let (_dir, store) = store();
        assert!(matches!(
            store.read_record(),
            Err(PassManError::MasterRecordNotFound(_))
        ));
    }

    #[test]
    fn delete_missing_entry_is_not_found() {
        let (_dir, store) = store();
        store.create("keep", b"k").unwrap();

        assert!(matches!(store.delete("ghost"), Err(PassManError::NotFound(_))));
        assert_eq!(store.list().unwrap(), vec!["keep"]);
    }

    #[test]
    fn unsanitized_names_are_rejected() {
        let (_dir, store) = store();
        assert!(matches!(
            store.create("../escape", b"x"),
            Err(PassManError::InvalidName(_))
        ));
        assert!(!store.contains("../escape"));
    }
}
