//! Decoding boundary between wire JSON and the typed contract records.
//!
//! Every response body the client accepts passes through [`decode`] or
//! [`decode_value`], so a malformed payload surfaces as a single
//! [`ContractError`] instead of a partially-populated record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A payload did not match the expected contract shape.
#[derive(Debug, Error)]
#[error("payload does not match contract for {context}: {source}")]
pub struct ContractError {
    pub context: String,
    #[source]
    pub source: serde_json::Error,
}

/// Decodes raw JSON bytes into `T`.
///
/// # Errors
///
/// Returns [`ContractError`] if the bytes are not valid JSON or a required
/// field is missing or has the wrong type.
pub fn decode<T: DeserializeOwned>(context: &str, bytes: &[u8]) -> Result<T, ContractError> {
    serde_json::from_slice(bytes).map_err(|source| ContractError {
        context: context.to_owned(),
        source,
    })
}

/// Decodes an already-parsed JSON value into `T`.
///
/// # Errors
///
/// Returns [`ContractError`] if a required field is missing or has the
/// wrong type.
pub fn decode_value<T: DeserializeOwned>(
    context: &str,
    value: serde_json::Value,
) -> Result<T, ContractError> {
    serde_json::from_value(value).map_err(|source| ContractError {
        context: context.to_owned(),
        source,
    })
}

/// Reads a JSON number as `f64`, or NaN if it has no `f64` reading.
pub(crate) fn number_as_f64(n: &serde_json::Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

/// Error body returned by the analysis service on non-2xx responses.
///
/// `detail` is usually a string. Request validation failures carry a list
/// of `{"loc": [...], "msg": "...", "type": "..."}` objects instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Extracts a human-readable message, or `None` when the body carries
    /// nothing usable (missing, blank, or an unrecognised shape).
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                    .filter(|msg| !msg.trim().is_empty())
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            _ => None,
        }
    }
}
