//! Backend response decoding.
//!
//! Turns the status and body of one secret read into either the path's
//! string fields or a classified error.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::types::PathData;
use crate::error::{Error, Result};

#[derive(Deserialize)]
struct SecretResponse {
    data: Map<String, Value>,
}

/// Decode the response to `GET /v1/secret/{path}`.
///
/// On 200 only string members of the top-level `data` object are kept;
/// members with any other JSON type are dropped.
///
/// # Errors
///
/// Every non-200 status maps to its `Error` variant. A 200 body without an
/// object-valued `data` member is reported as `Error::Unspecified`.
pub fn decode_response(path: &str, status: u16, body: &str) -> Result<PathData> {
    match status {
        200 => decode_data(body).ok_or_else(|| Error::Unspecified {
            status,
            body: body.to_string(),
        }),
        400 => Err(Error::BadRequest(body.to_string())),
        403 => Err(Error::Forbidden),
        404 => Err(Error::SecretNotFound(path.to_string())),
        500 => Err(Error::ServerError(body.to_string())),
        503 => Err(Error::ServerUnavailable(body.to_string())),
        _ => Err(Error::Unspecified {
            status,
            body: body.to_string(),
        }),
    }
}

fn decode_data(body: &str) -> Option<PathData> {
    let response: SecretResponse = serde_json::from_str(body).ok()?;
    let data = response
        .data
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            _ => None,
        })
        .collect();
    Some(data)
}
