//! Lightweight entry metadata for listings.

use chrono::{DateTime, Utc};

/// Metadata about an entry (no encrypted value).
///
/// Returned by `VaultStore::list_metadata` so callers can display entry
/// names and timestamps without touching any ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    pub name: String,

    /// Last modification time of the entry file, when the platform
    /// reports one.  Entries are never rewritten, so this is also the
    /// creation time in practice.
    pub modified: Option<DateTime<Utc>>,
}
