//! Final environment assembly.
//!
//! Combines secret-derived variables with the inherited parent environment
//! and refuses any name that would appear twice.

use std::collections::HashSet;

use tracing::debug;

use crate::core::types::EnvVar;
use crate::error::{Error, Result};

/// Build the command's complete environment.
///
/// With `inherit` the result is `secret_vars` followed by `local_vars`,
/// otherwise `secret_vars` alone. Order is preserved.
///
/// # Errors
///
/// Returns `Error::DuplicateVar` for the first name seen twice, whether the
/// clash is between two secrets or between a secret and an inherited variable.
pub fn assemble(
    secret_vars: Vec<EnvVar>,
    local_vars: Vec<EnvVar>,
    inherit: bool,
) -> Result<Vec<EnvVar>> {
    let mut vars = secret_vars;
    if inherit {
        vars.extend(local_vars);
    }

    if let Some(name) = first_duplicate(&vars) {
        return Err(Error::DuplicateVar(name.to_string()));
    }

    debug!(count = vars.len(), inherit, "assembled environment");
    Ok(vars)
}

fn first_duplicate(vars: &[EnvVar]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(vars.len());
    vars.iter()
        .map(|(name, _)| name.as_str())
        .find(|name| !seen.insert(*name))
}

/// The current process environment, in its native order.
///
/// Names and values that are not valid UTF-8 are converted lossily, so such
/// a variable reaches the command with U+FFFD in place of the invalid bytes.
/// Duplicate detection and the `EnvVar` pairs work on `String`; keeping raw
/// `OsString`s would only matter for those non-UTF-8 entries.
pub fn local_vars() -> Vec<EnvVar> {
    std::env::vars_os()
        .map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        })
        .collect()
}
