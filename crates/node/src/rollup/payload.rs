//! Hex payload codec.
//!
//! Rollup payloads travel as `0x`-prefixed, hex-encoded UTF-8 byte strings.
//! Outbound notice/report payloads are the JSON serialization of the
//! action's result or error object; inbound payloads decode to either a
//! JSON document (advance) or a `/`-separated path (inspect).

use serde_json::Value;
use thiserror::Error;

/// Errors decoding or encoding a hex payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Payload is not valid hex.
    #[error("invalid hex payload: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Decoded bytes are not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Decoded string is not the expected JSON document.
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Hex-encode a JSON value for an outbound notice/report payload.
///
/// # Errors
///
/// Returns [`PayloadError::Json`] if the value cannot be serialized.
pub fn encode(value: &Value) -> Result<String, PayloadError> {
    let json = serde_json::to_string(value)?;
    Ok(format!("0x{}", hex::encode(json.as_bytes())))
}

/// Decode a `0x`-prefixed hex payload into its UTF-8 string.
///
/// The prefix is matched case-insensitively and tolerated when absent.
///
/// # Errors
///
/// Returns [`PayloadError::Hex`] or [`PayloadError::Utf8`] on malformed
/// input.
pub fn decode(payload: &str) -> Result<String, PayloadError> {
    let stripped = payload
        .strip_prefix("0x")
        .or_else(|| payload.strip_prefix("0X"))
        .unwrap_or(payload);
    let bytes = hex::decode(stripped)?;
    Ok(String::from_utf8(bytes)?)
}

/// Decode a hex payload and parse the result as JSON.
///
/// # Errors
///
/// Returns a [`PayloadError`] on malformed hex, UTF-8, or JSON.
pub fn decode_json(payload: &str) -> Result<Value, PayloadError> {
    let text = decode(payload)?;
    Ok(serde_json::from_str(&text)?)
}
