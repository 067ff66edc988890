//! Entry names.
//!
//! An entry name doubles as its file name, so it is restricted to ASCII
//! letters, digits and spaces.  User input is sanitized by dropping
//! every other character and trimming; names handed to the store must
//! already be in that alphabet.  PassMan 0.1 did not trim, so stored
//! names may carry surrounding spaces.

use crate::errors::{PassManError, Result};

/// File name of the master credential record inside the data directory.
pub const RESERVED_RECORD_NAME: &str = "savedpassword";

/// Longest entry name we accept (a common file-name limit).
const MAX_NAME_LEN: usize = 255;

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' '
}

/// Drop every character outside the entry-name alphabet, keeping spaces.
pub fn strip_name(raw: &str) -> String {
    raw.chars().filter(|&c| is_allowed(c)).collect()
}

/// Strip disallowed characters from `raw` and trim surrounding spaces.
///
/// `"My Site! #1"` becomes `"My Site 1"`.  Fails with `InvalidName` when
/// nothing usable is left or the result is the reserved record name.
pub fn sanitize_name(raw: &str) -> Result<String> {
    let cleaned = strip_name(raw).trim().to_string();
    validate_name(&cleaned)?;
    Ok(cleaned)
}

/// Check that `name` is already a valid, sanitized entry name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PassManError::InvalidName(
            "name must contain at least one letter or digit".into(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(PassManError::InvalidName(format!(
            "name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    if !name.chars().all(is_allowed) {
        return Err(PassManError::InvalidName(format!(
            "'{name}' contains characters other than letters, digits and spaces"
        )));
    }
    // Case-insensitive file systems would map these onto the record file.
    if name.eq_ignore_ascii_case(RESERVED_RECORD_NAME) {
        return Err(PassManError::InvalidName(format!(
            "'{name}' is reserved"
        )));
    }
    Ok(())
}

/// Returns `true` if `name` could have been produced by `sanitize_name`.
pub fn is_entry_name(name: &str) -> bool {
    validate_name(name).is_ok()
}
