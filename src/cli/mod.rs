//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::crypto::MasterPassword;
use crate::errors::{PassManError, Result};
use crate::generator::GeneratorOptions;
use crate::vault::{Vault, VaultSession};

/// Minimum password length to prevent trivially weak master passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable holding the master password for scripted use.
pub const PASSWORD_ENV: &str = "PASSMAN_PASSWORD";

/// PassMan CLI: local password manager.
#[derive(Parser)]
#[command(name = "passman", about = "Local password manager", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault data directory (default: <user data dir>/PassManData)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/passman/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault and choose the master password
    Init,

    /// Add a new entry
    Add {
        /// Entry name (e.g. "My Bank"); only letters, digits and spaces are kept
        name: String,

        /// Generate the secret instead of prompting for it
        #[arg(short, long)]
        generate: bool,

        #[command(flatten)]
        charset: CharsetArgs,
    },

    /// Copy an entry's password to the clipboard
    Get {
        /// Entry name
        name: String,

        /// Print to stdout instead of copying to the clipboard
        #[arg(long)]
        print: bool,
    },

    /// List all entries
    List,

    /// Delete an entry
    Delete {
        /// Entry name
        name: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password without touching the vault
    Generate {
        #[command(flatten)]
        charset: CharsetArgs,

        /// Copy to the clipboard instead of printing
        #[arg(long)]
        copy: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Password generator flags shared by `add` and `generate`.
#[derive(clap::Args, Debug, Default)]
pub struct CharsetArgs {
    /// Password length (default from config, otherwise 24)
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Leave out letters
    #[arg(long)]
    pub no_letters: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_digits: bool,

    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,
}

impl CharsetArgs {
    /// Apply the flags on top of the configured defaults.
    pub fn apply(&self, base: GeneratorOptions) -> GeneratorOptions {
        GeneratorOptions {
            letters: base.letters && !self.no_letters,
            digits: base.digits && !self.no_digits,
            symbols: base.symbols && !self.no_symbols,
            length: self.length.unwrap_or(base.length),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from `--config` or the default location.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    match cli.config.clone().or_else(Settings::default_path) {
        Some(path) => Settings::load(&path),
        None => Ok(Settings::default()),
    }
}

/// Open the vault directory from `--data-dir` or the settings.
pub fn open_vault(cli: &Cli, settings: &Settings) -> Result<Vault> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => settings.data_dir()?,
    };
    Vault::open(&data_dir)
}

/// Open and unlock the vault, prompting for the master password.
pub fn unlock(cli: &Cli) -> Result<VaultSession> {
    let settings = load_settings(cli)?;
    let vault = open_vault(cli, &settings)?;

    if !vault.is_initialized() {
        output::tip("Run `passman init` to create a vault first.");
        return Err(PassManError::MasterRecordNotFound(
            vault.store().record_path(),
        ));
    }

    let password = prompt_password()?;
    vault.unlock(password)
}

/// Get the master password, trying in order:
/// 1. `PASSMAN_PASSWORD` env var (scripts)
/// 2. Interactive prompt
pub fn prompt_password() -> Result<MasterPassword> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(MasterPassword::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| PassManError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(MasterPassword::new(pw))
}

/// Prompt for a new master password with confirmation (used during `init`).
///
/// Also respects `PASSMAN_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<MasterPassword> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            let pw = MasterPassword::new(pw);
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(PassManError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(pw);
        }
    }

    loop {
        let password = MasterPassword::new(
            dialoguer::Password::new()
                .with_prompt("Choose master password")
                .with_confirmation(
                    "Confirm master password",
                    "Passwords do not match, try again",
                )
                .interact()
                .map_err(|e| PassManError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(password);
    }
}

/// Put `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| PassManError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| PassManError::Clipboard(e.to_string()))
}
