//! Command-line interface.

pub mod output;
pub mod run;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::core::config::RunConfig;
use crate::core::constants::{
    DEFAULT_HOST, DEFAULT_PORT, RETRY_BASE_DELAY, RETRY_MAX_ATTEMPTS, TOKEN_ENV,
};

/// Vaultrun - run a command with secrets injected as environment variables.
#[derive(Parser)]
#[command(
    name = "vaultrun",
    about = "Run a command with secrets from Vault injected as environment variables",
    version,
    after_help = "Secrets file lines look like NAME=path/to/secret#key or path/to/secret#key"
)]
pub struct Cli {
    /// Secret store host
    #[arg(long, env = "VAULT_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Secret store port
    #[arg(long, env = "VAULT_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Authentication token
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: String,

    /// File listing the secrets to fetch, one per line
    #[arg(long, value_name = "FILE")]
    pub secrets_file: PathBuf,

    /// Connect over plain HTTP instead of HTTPS
    #[arg(long)]
    pub no_connect_tls: bool,

    /// Do not pass the current environment to the command
    #[arg(long)]
    pub no_inherit_env: bool,

    /// Give up on a single request after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Base delay in milliseconds of the randomized backoff between attempts
    #[arg(long, value_name = "MS", default_value_t = RETRY_BASE_DELAY.as_millis() as u64)]
    pub retry_base_delay_ms: u64,

    /// Total attempts per secret path before giving up
    #[arg(
        long,
        value_name = "N",
        default_value_t = RETRY_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Command and arguments to run
    #[arg(value_name = "CMD", required = true, trailing_var_arg = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// The connection settings for this invocation.
    pub fn run_config(&self) -> RunConfig {
        let mut config = RunConfig::new(self.host.clone(), self.port, self.token.clone());
        config.tls = !self.no_connect_tls;
        config.inherit_env = !self.no_inherit_env;
        config.timeout = self.timeout.map(Duration::from_secs);
        config.retry_base_delay = Duration::from_millis(self.retry_base_delay_ms);
        config.max_attempts = self.max_attempts;
        config
    }

    /// The program to run and its arguments.
    pub fn program(&self) -> (&str, &[String]) {
        match self.command.split_first() {
            Some((program, args)) => (program.as_str(), args),
            None => ("", &[]),
        }
    }
}

/// Execute the parsed command line.
///
/// Returns only on failure; on success the process has been replaced.
pub fn execute(cli: Cli) -> crate::error::RunError {
    let config = cli.run_config();
    let (program, args) = cli.program();
    run::execute(&config, &cli.secrets_file, program, args)
}
