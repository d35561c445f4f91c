//! Run configuration.
//!
//! Built once from the command line and passed by reference to the fetcher.

use std::fmt;
use std::time::Duration;

use zeroize::Zeroizing;

use crate::core::constants::{
    DEFAULT_HOST, DEFAULT_PORT, RETRY_BASE_DELAY, RETRY_MAX_ATTEMPTS, SECRET_API_PREFIX,
};

/// Connection and environment settings for one run.
#[derive(Clone)]
pub struct RunConfig {
    pub host: String,
    pub port: u16,
    pub token: Zeroizing<String>,
    /// Connect over `https` when set, plain `http` otherwise.
    pub tls: bool,
    /// Pass the parent environment through to the command.
    pub inherit_env: bool,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Base of the full-jitter backoff between attempts.
    pub retry_base_delay: Duration,
    /// Total attempts per secret path, the first one included.
    pub max_attempts: u32,
}

impl RunConfig {
    /// Create a config for `host:port` with TLS and inheritance enabled.
    pub fn new(host: impl Into<String>, port: u16, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            token: Zeroizing::new(token.into()),
            tls: true,
            inherit_env: true,
            timeout: None,
            retry_base_delay: RETRY_BASE_DELAY,
            max_attempts: RETRY_MAX_ATTEMPTS,
        }
    }

    /// URL scheme implied by the TLS flag.
    pub fn scheme(&self) -> &'static str {
        if self.tls {
            "https"
        } else {
            "http"
        }
    }

    /// Unparsed URL for reading the secret at `path`.
    pub fn secret_url(&self, path: &str) -> String {
        format!(
            "{}://{}:{}{}{}",
            self.scheme(),
            self.host,
            self.port,
            SECRET_API_PREFIX,
            path
        )
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT, String::new())
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("token", &"<redacted>")
            .field("tls", &self.tls)
            .field("inherit_env", &self.inherit_env)
            .field("timeout", &self.timeout)
            .field("retry_base_delay", &self.retry_base_delay)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}
