use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::KdfParams;
use crate::errors::{PassManError, Result};
use crate::generator::{GeneratorOptions, DEFAULT_LENGTH};

/// Name of the per-user data directory, kept from PassMan 0.1.
pub const DATA_DIR_NAME: &str = "PassManData";

/// User configuration, loaded from `config.toml`.
///
/// Every field has a sensible default so PassMan works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Overrides the per-user data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Argon2 memory cost in KiB for new vaults (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count for new vaults (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree for new vaults (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Generated password length (default: 24).
    #[serde(default = "default_password_length")]
    pub password_length: usize,

    #[serde(default = "default_true")]
    pub letters: bool,

    #[serde(default = "default_true")]
    pub digits: bool,

    #[serde(default = "default_true")]
    pub symbols: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_password_length() -> usize {
    DEFAULT_LENGTH
}

fn default_true() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            password_length: default_password_length(),
            letters: default_true(),
            digits: default_true(),
            symbols: default_true(),
        }
    }
}

impl Settings {
    /// Name of the config file inside the config directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Default config file location, e.g. `~/.config/passman/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "passman")
            .map(|dirs| dirs.config_dir().join(Self::FILE_NAME))
    }

    /// Load settings from `config_path`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassManError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve the vault data directory.
    ///
    /// Uses `data_dir` when set, otherwise `<user data dir>/PassManData`
    /// (`%APPDATA%\PassManData` on Windows).
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.data_dir().join(DATA_DIR_NAME))
            .ok_or_else(|| {
                PassManError::Config("cannot determine the user data directory".into())
            })
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// Generator defaults from the config file.
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            letters: self.letters,
            digits: self.digits,
            symbols: self.symbols,
            length: self.password_length,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert!(s.data_dir.is_none());
        assert_eq!(s.kdf_params(), KdfParams::default());
        assert_eq!(s.generator_options(), GeneratorOptions::default());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(settings.password_length, 24);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        let config = r#"
data_dir = "/srv/vault"
argon2_memory_kib = 131072
argon2_iterations = 5
argon2_parallelism = 8
password_length = 32
symbols = false
"#;
        fs::write(&path, config).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.data_dir, Some(PathBuf::from("/srv/vault")));
        assert_eq!(settings.argon2_memory_kib, 131_072);
        assert_eq!(settings.argon2_iterations, 5);
        assert_eq!(settings.argon2_parallelism, 8);

        let opts = settings.generator_options();
        assert_eq!(opts.length, 32);
        assert!(opts.letters && opts.digits && !opts.symbols);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "password_length = 16\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.password_length, 16);
        // Rest should be defaults
        assert_eq!(settings.argon2_iterations, 3);
        assert!(settings.letters);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "not valid {{toml").unwrap();

        assert!(matches!(Settings::load(&path), Err(PassManError::Config(_))));
    }

    #[test]
    fn data_dir_override_wins() {
        let s = Settings {
            data_dir: Some(PathBuf::from("/tmp/pm")),
            ..Settings::default()
        };
        assert_eq!(s.data_dir().unwrap(), PathBuf::from("/tmp/pm"));
    }

    #[test]
    fn default_data_dir_ends_with_passman_data() {
        if let Ok(dir) = Settings::default().data_dir() {
            assert!(dir.ends_with(DATA_DIR_NAME));
        }
    }
}
