//! `passman init`: create a new vault and set the master password.

use crate::cli::output;
use crate::cli::{load_settings, open_vault, prompt_new_password, Cli};
use crate::errors::{PassManError, Result};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    let vault = open_vault(cli, &settings)?;

    // 1. There is no way to re-initialize or reset an existing vault.
    if vault.is_initialized() {
        output::tip("Use `passman add <NAME>` to add entries to the existing vault.");
        return Err(PassManError::AlreadyInitialized(vault.store().record_path()));
    }

    // 2. Prompt for a new password (with confirmation).
    let password = prompt_new_password()?;

    // 3. Write the credential record with the configured KDF cost.
    vault.initialize(password, &settings.kdf_params())?;
    output::success(&format!(
        "Vault created at {}",
        vault.store().root().display()
    ));

    output::tip("Run `passman add <NAME>` to add a password.");
    output::tip("Run `passman add <NAME> --generate` to generate one.");

    Ok(())
}
