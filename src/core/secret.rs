//! Secret list parsing.
//!
//! A secrets file holds one reference per line, written as `[NAME=]PATH#KEY`.
//! Without a `NAME=` prefix the variable name is derived from the path and key.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, ParseError, Result};

/// A reference to one field of a secret path, and the variable it is exposed as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    pub path: String,
    pub key: String,
    pub var_name: String,
}

impl Secret {
    /// Create a secret reference with an explicit variable name.
    pub fn new(
        path: impl Into<String>,
        key: impl Into<String>,
        var_name: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            var_name: var_name.into(),
        }
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.path, self.key)
    }
}

/// Parse one line of a secrets file.
///
/// The line is split at the first `=` into an optional name and a `PATH#KEY`
/// remainder, which is then split at its first `#`.
///
/// # Errors
///
/// Returns `ParseError` if the remainder has no `#`, or if the path or key
/// is empty.
pub fn parse_line(line: &str) -> std::result::Result<Secret, ParseError> {
    let (name, spec) = line.split_once('=').unwrap_or(("", line));

    let (path, key) = spec
        .split_once('#')
        .ok_or_else(|| ParseError::MissingSeparator(spec.to_string()))?;

    if path.is_empty() {
        return Err(ParseError::EmptyPath(line.to_string()));
    }
    if key.is_empty() {
        return Err(ParseError::EmptyKey(line.to_string()));
    }

    let var_name = if name.is_empty() {
        derive_var_name(path, key)
    } else {
        name.to_string()
    };

    Ok(Secret::new(path, key, var_name))
}

/// Derive a variable name: `PATH_KEY`, uppercased, with `/` and `-` as `_`.
pub fn derive_var_name(path: &str, key: &str) -> String {
    format!("{}_{}", path, key)
        .chars()
        .map(|c| match c {
            '/' | '-' => '_',
            c => c,
        })
        .collect::<String>()
        .to_uppercase()
}

/// Read and parse a whole secrets file.
///
/// The first malformed line aborts the read; no partial list is returned.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read and `Error::Parse` for
/// the first line that does not parse.
pub fn read_secret_list(file: impl AsRef<Path>) -> Result<Vec<Secret>> {
    let file = file.as_ref();
    let contents = std::fs::read_to_string(file).map_err(|source| Error::Io {
        file: file.to_path_buf(),
        source,
    })?;

    let secrets = contents
        .lines()
        .enumerate()
        .map(|(i, line)| {
            parse_line(line).map_err(|source| Error::Parse {
                file: file.to_path_buf(),
                line: i + 1,
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(file = %file.display(), count = secrets.len(), "loaded secret list");
    Ok(secrets)
}
