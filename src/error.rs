//! Error types for vaultrun.
//!
//! [`Error`] is the closed set of failures the secret pipeline can produce.
//! Its `Display` output is the single line shown to the user. Failures that
//! happen around the pipeline (starting the runtime, replacing the process
//! image) live in [`RunError`].

use std::path::PathBuf;

use thiserror::Error;

use crate::core::secret::Secret;

/// Failures produced while loading, fetching, resolving or assembling secrets.
#[derive(Error, Debug)]
pub enum Error {
    #[error("secret not found: {0}")]
    SecretNotFound(String),

    #[error("failed to read secrets file {}: {source}", .file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse secrets file {} at line {line}: {source}", .file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("key '{}' not found in secret path '{}'", .0.key, .0.path)]
    KeyNotFound(Secret),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("access forbidden: the token is missing or lacks access to the secret")]
    Forbidden,

    #[error("internal server error: {0}")]
    ServerError(String),

    #[error("server unavailable: {0}")]
    ServerUnavailable(String),

    #[error("server unreachable: {0}")]
    ServerUnreachable(#[source] reqwest::Error),

    #[error("invalid url for secret path: {0}")]
    InvalidUrl(String),

    #[error("duplicate environment variable: {0}")]
    DuplicateVar(String),

    #[error("unexpected response (status {status}): {body}")]
    Unspecified { status: u16, body: String },
}

/// A malformed line in the secrets file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("path does not contain '#' separator: {0}")]
    MissingSeparator(String),

    #[error("empty secret path: {0}")]
    EmptyPath(String),

    #[error("empty secret key: {0}")]
    EmptyKey(String),
}

/// Anything that stops a run before the command takes over the process.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Secrets(#[from] Error),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to execute {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
