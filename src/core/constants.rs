//! Constants used throughout vaultrun.
//!
//! Centralizes magic strings and configuration values.

use std::time::Duration;

/// Backend host used when neither `--host` nor `VAULT_HOST` is given.
pub const DEFAULT_HOST: &str = "localhost";

/// Backend port used when neither `--port` nor `VAULT_PORT` is given.
pub const DEFAULT_PORT: u16 = 8200;

/// Environment variable the token is read from when `--token` is absent.
pub const TOKEN_ENV: &str = "VAULT_TOKEN";

/// Header carrying the bearer token on every backend request.
pub const TOKEN_HEADER: &str = "x-vault-token";

/// URL path prefix under which secrets are read.
pub const SECRET_API_PREFIX: &str = "/v1/secret/";

/// Base delay of the full-jitter backoff (40 000 microseconds).
pub const RETRY_BASE_DELAY: Duration = Duration::from_micros(40_000);

/// Total attempts per secret path, the initial request included.
pub const RETRY_MAX_ATTEMPTS: u32 = 10;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "VAULTRUN_LOG";
