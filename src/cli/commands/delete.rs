//! `passman delete`: remove an entry from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{PassManError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    // Open the vault first so a missing entry fails before the prompt.
    let mut session = unlock(cli)?;
    let name = session.find_entry(name)?;
    if !session.store().contains(&name) {
        return Err(PassManError::NotFound(name));
    }

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{name}'? This action cannot be undone"))
            .default(false)
            .interact()
            .map_err(|e| PassManError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    session.delete_entry(&name)?;
    output::success(&format!("Deleted '{name}'"));

    Ok(())
}
