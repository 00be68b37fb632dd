use feed_core::{CatalogKey, MediaRef};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response is not valid json: {0}")]
    Json(String),
    #[error("response has no `message` {expected}")]
    MissingMessage { expected: &'static str },
}

/// Both endpoints wrap their payload in `{"message": ..., "status": ...}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    message: Option<T>,
}

/// Extracts catalog keys from the listing response, in document order.
///
/// Only the keys of the `message` mapping matter; values are ignored.
pub fn decode_catalog(bytes: &[u8]) -> Result<Vec<CatalogKey>, DecodeError> {
    let envelope: Envelope<Map<String, Value>> =
        serde_json::from_slice(bytes).map_err(|err| DecodeError::Json(err.to_string()))?;
    let message = envelope
        .message
        .ok_or(DecodeError::MissingMessage { expected: "object" })?;
    Ok(message.keys().map(|key| CatalogKey::new(key.as_str())).collect())
}

/// Extracts media references for one key. Non-string and empty entries are dropped.
pub fn decode_media(bytes: &[u8]) -> Result<Vec<MediaRef>, DecodeError> {
    let envelope: Envelope<Vec<Value>> =
        serde_json::from_slice(bytes).map_err(|err| DecodeError::Json(err.to_string()))?;
    let message = envelope
        .message
        .ok_or(DecodeError::MissingMessage { expected: "array" })?;
    Ok(message
        .iter()
        .filter_map(Value::as_str)
        .filter(|reference| !reference.trim().is_empty())
        .map(MediaRef::new)
        .collect())
}
