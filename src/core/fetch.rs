//! Concurrent secret retrieval.
//!
//! Each distinct secret path is read once, in its own task, with the retry
//! policy applied per path. The fetch succeeds only if every path does.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use reqwest::{Client, Url};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::core::config::RunConfig;
use crate::core::constants::TOKEN_HEADER;
use crate::core::decode::decode_response;
use crate::core::retry::{full_jitter, RetryPolicy};
use crate::core::secret::Secret;
use crate::core::types::PathData;
use crate::error::{Error, Result};

/// Reads secret paths from the backend.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    config: Arc<RunConfig>,
    retry: RetryPolicy,
}

impl Fetcher {
    /// Create a fetcher for `config`, retrying every error with full-jitter
    /// backoff as configured.
    ///
    /// # Errors
    ///
    /// Returns `Error::ServerUnreachable` if the HTTP client cannot be built.
    pub fn new(config: &RunConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::ServerUnreachable)?;

        Ok(Self {
            client,
            config: Arc::new(config.clone()),
            retry: RetryPolicy::new(
                config.max_attempts,
                full_jitter(config.retry_base_delay),
                |_| true,
            ),
        })
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch every path referenced by `secrets`, one request chain per
    /// distinct path.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by any path once its retries are
    /// exhausted. The remaining requests are aborted.
    pub async fn fetch_all(&self, secrets: &[Secret]) -> Result<HashMap<String, PathData>> {
        let paths = unique_paths(secrets);
        debug!(secrets = secrets.len(), paths = paths.len(), "fetching secrets");

        let mut tasks = JoinSet::new();
        for path in paths {
            let fetcher = self.clone();
            tasks.spawn(async move {
                let data = fetcher
                    .retry
                    .run(|attempt| fetcher.fetch_path(&path, attempt))
                    .await;
                (path, data)
            });
        }

        let mut fetched = HashMap::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            let (path, data) = match joined {
                Ok(result) => result,
                Err(e) => std::panic::resume_unwind(e.into_panic()),
            };
            fetched.insert(path, data?);
        }

        info!(paths = fetched.len(), "fetched secrets");
        Ok(fetched)
    }

    /// One request for `path`, without retries.
    pub async fn fetch_path(&self, path: &str, attempt: u32) -> Result<PathData> {
        let url = Url::parse(&self.config.secret_url(path))
            .map_err(|_| Error::InvalidUrl(path.to_string()))?;
        debug!(path, attempt, "requesting secret");

        let response = self
            .client
            .get(url)
            .header(TOKEN_HEADER, self.config.token.as_str())
            .send()
            .await
            .map_err(Error::ServerUnreachable)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(Error::ServerUnreachable)?;
        debug!(path, status, "received response");

        decode_response(path, status, &body)
    }
}

/// Distinct paths of `secrets`, in the order they first appear.
fn unique_paths(secrets: &[Secret]) -> Vec<String> {
    let mut seen = HashSet::new();
    secrets
        .iter()
        .filter(|s| seen.insert(s.path.as_str()))
        .map(|s| s.path.clone())
        .collect()
}
