//! `passman generate`: print or copy a random password.

use crate::cli::output;
use crate::cli::{copy_to_clipboard, load_settings, CharsetArgs, Cli};
use crate::errors::Result;
use crate::generator::generate_password;

/// Execute the `generate` command.
pub fn execute(cli: &Cli, charset: &CharsetArgs, copy: bool) -> Result<()> {
    let options = charset.apply(load_settings(cli)?.generator_options());
    let password = generate_password(&options)?;

    if copy {
        copy_to_clipboard(&password)?;
        output::success(&format!(
            "Generated {}-character password copied to clipboard",
            options.length
        ));
    } else {
        println!("{password}");
    }

    Ok(())
}
