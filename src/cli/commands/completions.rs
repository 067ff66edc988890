//! `passman completions`: generate shell completion scripts.
//!
//! Usage:
//!   passman completions bash > ~/.local/share/bash-completion/completions/passman
//!   passman completions zsh
//!   passman completions fish

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
    Ok(())
}
