//! Integration tests for Campus.
//!
//! The tests drive the node's dispatch loop against a `wiremock` server
//! standing in for the rollup host, asserting the wire contract end-to-end:
//! exactly one notice/report per request, the accept/reject downgrade
//! rules, and the action behaviors.
//!
//! # Test Categories
//!
//! - `dispatch_loop` - polling, decoding, status feedback, unknown actions
//! - `actions` - end-to-end action behavior over the wire
//!
//! This crate's library holds the fixture builders that fake what the host
//! would send.

use serde_json::{Value, json};

/// Hex-encode a raw UTF-8 string the way rollup payloads travel.
#[must_use]
pub fn hex_payload(text: &str) -> String {
    format!("0x{}", hex::encode(text.as_bytes()))
}

/// The `finish` response body for an advance request carrying
/// `{action, data}`.
#[must_use]
pub fn advance_body(action: &str, data: &Value) -> Value {
    let call = json!({"action": action, "data": data}).to_string();
    json!({
        "request_type": "advance_state",
        "data": {
            "metadata": {
                "msg_sender": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
                "epoch_index": 0,
                "input_index": 0,
                "block_number": 1,
                "timestamp": 1_700_000_000,
            },
            "payload": hex_payload(&call),
        }
    })
}

/// The `finish` response body for an inspect request carrying a
/// `action/arg1/arg2/...` path.
#[must_use]
pub fn inspect_body(path: &str) -> Value {
    json!({
        "request_type": "inspect_state",
        "data": {"payload": hex_payload(path)}
    })
}

/// Decode the hex JSON payload out of a captured notice/report body.
///
/// # Panics
///
/// Panics when the body is not the expected `{"payload": "0x..."}` shape;
/// tests want the loud failure.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn decode_output(body: &[u8]) -> Value {
    let body: Value = serde_json::from_slice(body).unwrap();
    let hex_string = body["payload"].as_str().unwrap();
    let bytes = hex::decode(hex_string.trim_start_matches("0x")).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
