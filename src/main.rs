//! Vaultrun - run a command with secrets injected as environment variables.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vaultrun::cli::output;
use vaultrun::cli::{execute, Cli};
use vaultrun::core::constants::LOG_ENV;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("vaultrun=debug")
        } else {
            EnvFilter::new("vaultrun=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    // execute only comes back if something went wrong
    let e = execute(cli);
    output::error(&e.to_string());
    std::process::exit(1);
}
