use std::io;

use clap::Parser;
use passman::cli::{commands, output, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::Add {
            ref name,
            generate,
            ref charset,
        } => commands::add::execute(&cli, name, generate, charset),
        Commands::Get { ref name, print } => commands::get::execute(&cli, name, print),
        Commands::List => commands::list::execute(&cli),
        Commands::Delete { ref name, force } => commands::delete::execute(&cli, name, force),
        Commands::Generate { ref charset, copy } => {
            commands::generate::execute(&cli, charset, copy)
        }
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Set up tracing/logging based on verbosity level.
///
/// `RUST_LOG` takes precedence over `-v` when set.
fn setup_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();
}
