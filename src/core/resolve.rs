//! Mapping fetched path data back onto requested secrets.

use std::collections::HashMap;

use crate::core::secret::Secret;
use crate::core::types::{EnvVar, PathData};
use crate::error::{Error, Result};

/// Produce one `(var_name, value)` pair per secret, in input order.
///
/// # Errors
///
/// Returns `Error::KeyNotFound` for the first secret whose key is absent
/// from its path's data. No pairs are returned in that case.
pub fn resolve(secrets: &[Secret], fetched: &HashMap<String, PathData>) -> Result<Vec<EnvVar>> {
    secrets
        .iter()
        .map(|secret| {
            let data = fetched
                .get(&secret.path)
                .ok_or_else(|| Error::SecretNotFound(secret.path.clone()))?;
            let value = data
                .get(&secret.key)
                .ok_or_else(|| Error::KeyNotFound(secret.clone()))?;
            Ok((secret.var_name.clone(), value.clone()))
        })
        .collect()
}
