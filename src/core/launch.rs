//! Handing the process over to the target command.

use std::process::Command;

use tracing::debug;

use crate::core::types::EnvVar;

/// Build the command with `env` as its complete environment.
pub fn command(program: &str, args: &[String], env: &[EnvVar]) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .env_clear()
        .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    cmd
}

/// Replace the current process image with `program`.
///
/// Only returns if the exec itself failed.
#[cfg(unix)]
pub fn exec(program: &str, args: &[String], env: &[EnvVar]) -> std::io::Error {
    use std::os::unix::process::CommandExt;

    debug!(program, args = args.len(), vars = env.len(), "exec");
    command(program, args, env).exec()
}

/// Run `program` to completion and exit with its status.
///
/// Platforms without `exec` get the closest equivalent. Only returns if the
/// command could not be started.
#[cfg(not(unix))]
pub fn exec(program: &str, args: &[String], env: &[EnvVar]) -> std::io::Error {
    debug!(program, args = args.len(), vars = env.len(), "spawn");
    match command(program, args, env).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(e) => e,
    }
}
