//! Run command.
//!
//! Fetches the listed secrets and replaces this process with the command,
//! its environment made of the secrets and (optionally) the inherited one.

use std::path::Path;

use tracing::info;

use crate::core::config::RunConfig;
use crate::core::env::{assemble, local_vars};
use crate::core::fetch::Fetcher;
use crate::core::launch;
use crate::core::resolve::resolve;
use crate::core::secret::read_secret_list;
use crate::core::types::EnvVar;
use crate::error::{Result, RunError};

/// Build the environment and exec `command`. Returns only on failure.
pub fn execute(
    config: &RunConfig,
    secrets_file: &Path,
    command: &str,
    args: &[String],
) -> RunError {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => return RunError::Runtime(e),
    };

    let env = match runtime.block_on(build_env(config, secrets_file, local_vars())) {
        Ok(env) => env,
        Err(e) => return e.into(),
    };
    drop(runtime);

    info!(command, vars = env.len(), "launching command");
    RunError::Launch {
        command: command.to_string(),
        source: launch::exec(command, args, &env),
    }
}

/// Everything up to, but not including, the exec.
pub async fn build_env(
    config: &RunConfig,
    secrets_file: &Path,
    local: Vec<EnvVar>,
) -> Result<Vec<EnvVar>> {
    let secrets = read_secret_list(secrets_file)?;
    let fetched = Fetcher::new(config)?.fetch_all(&secrets).await?;
    let secret_vars = resolve(&secrets, &fetched)?;
    assemble(secret_vars, local, config.inherit_env)
}
