//! `passman get`: decrypt an entry and copy it to the clipboard.

use crate::cli::output;
use crate::cli::{copy_to_clipboard, unlock, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str, print: bool) -> Result<()> {
    let session = unlock(cli)?;
    let name = session.find_entry(name)?;
    let secret = session.reveal_entry(&name)?;

    if print {
        println!("{}", secret.as_str());
    } else {
        copy_to_clipboard(&secret)?;
        output::success(&format!("Password for '{name}' copied to clipboard"));
    }

    Ok(())
}
