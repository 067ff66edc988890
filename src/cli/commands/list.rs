//! `passman list`: display all entries in a table.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let session = unlock(cli)?;
    let entries = session.store().list_metadata()?;

    let noun = if entries.len() == 1 { "entry" } else { "entries" };
    output::info(&format!("{} {noun}", entries.len()));
    output::print_entries_table(&entries);

    Ok(())
}
