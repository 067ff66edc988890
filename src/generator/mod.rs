//! Random password generation.
//!
//! Characters are drawn uniformly from the union of the selected
//! classes using the thread-local CSPRNG (ChaCha, seeded from the OS).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{PassManError, Result};

/// ASCII letters, lower then upper case.
pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const DIGITS: &str = "0123456789";

/// The 32 ASCII punctuation characters.
pub const SYMBOLS: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Length used when the caller does not pick one.
pub const DEFAULT_LENGTH: usize = 24;

/// Upper bound on generated length.
pub const MAX_LENGTH: usize = 1024;

/// Which character classes to draw from, and how many characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub letters: bool,
    pub digits: bool,
    pub symbols: bool,
    pub length: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            letters: true,
            digits: true,
            symbols: true,
            length: DEFAULT_LENGTH,
        }
    }
}

impl GeneratorOptions {
    /// The union of the selected classes.
    pub fn charset(&self) -> Vec<char> {
        let mut chars = Vec::new();
        if self.letters {
            chars.extend(LETTERS.chars());
        }
        if self.digits {
            chars.extend(DIGITS.chars());
        }
        if self.symbols {
            chars.extend(SYMBOLS.chars());
        }
        chars
    }
}

/// Generate a password according to `options`.
///
/// Fails with `NoCharacterClasses` when every class is off.
pub fn generate_password(options: &GeneratorOptions) -> Result<String> {
    let charset = options.charset();
    if charset.is_empty() {
        return Err(PassManError::NoCharacterClasses);
    }
    if options.length == 0 || options.length > MAX_LENGTH {
        return Err(PassManError::InvalidGeneratorOptions(format!(
            "length must be between 1 and {MAX_LENGTH} (got {})",
            options.length
        )));
    }

    let mut rng = rand::rng();
    Ok((0..options.length)
        .map(|_| charset[rng.random_range(0..charset.len())])
        .collect())
}
