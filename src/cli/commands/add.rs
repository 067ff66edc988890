//! `passman add`: encrypt and store a new entry.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{load_settings, unlock, CharsetArgs, Cli};
use crate::errors::{PassManError, Result};
use crate::generator::generate_password;

/// Execute the `add` command.
pub fn execute(cli: &Cli, name: &str, generate: bool, charset: &CharsetArgs) -> Result<()> {
    // Determine the secret from one of three sources.
    let secret = if generate {
        // Source 1: Password generator.
        let options = charset.apply(load_settings(cli)?.generator_options());
        Zeroizing::new(generate_password(&options)?)
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed_len = buf.trim_end().len();
        buf.truncate(trimmed_len);
        buf
    } else {
        // Source 3: Interactive secure prompt (default).
        Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(format!("Password for {name}"))
                .with_confirmation("Confirm password", "Passwords do not match, try again")
                .interact()
                .map_err(|e| PassManError::CommandFailed(format!("input prompt: {e}")))?,
        )
    };

    let mut session = unlock(cli)?;
    let stored = session.add_entry(name, &secret)?;

    if stored != name {
        output::info(&format!("Saved as '{stored}' (only letters, digits and spaces are kept)"));
    }
    output::success(&format!(
        "Entry '{stored}' added ({} total)",
        session.entries().len()
    ));
    if generate {
        output::tip(&format!("Run `passman get \"{stored}\"` to copy it."));
    }

    Ok(())
}
