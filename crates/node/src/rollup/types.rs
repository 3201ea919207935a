//! Wire types for the rollup host protocol.

use serde::{Deserialize, Serialize};

/// Terminal status of a processed request, submitted with the next
/// `finish` poll.
///
/// `Reject` tells the host the request did not produce a valid durable
/// effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishStatus {
    Accept,
    Reject,
}

impl std::fmt::Display for FinishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accept => write!(f, "accept"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Body of the `finish` poll.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FinishRequest {
    pub status: FinishStatus,
}

/// A pending request handed back by the `finish` poll.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "request_type", content = "data", rename_all = "snake_case")]
pub enum RollupRequest {
    /// A state-mutating request.
    AdvanceState(AdvanceInput),
    /// A read-only request.
    InspectState(InspectInput),
}

/// Payload of an advance request.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvanceInput {
    /// Host-provided request metadata, passed through to handlers that
    /// choose to use it; never validated here.
    pub metadata: AdvanceMetadata,
    /// Hex-encoded UTF-8 JSON `{action, data}` document.
    pub payload: String,
}

/// Metadata attached to every advance request by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvanceMetadata {
    pub msg_sender: String,
    pub epoch_index: u64,
    pub input_index: u64,
    pub block_number: u64,
    pub timestamp: u64,
}

/// Payload of an inspect request.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectInput {
    /// Hex-encoded UTF-8 string of the form `action/arg1/arg2/...`.
    pub payload: String,
}

/// Body of an outbound notice/report call.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRequest {
    /// Hex-encoded JSON string of the action's result or error object.
    pub payload: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_finish_status_wire_form() {
        assert_eq!(
            serde_json::to_value(FinishRequest {
                status: FinishStatus::Accept
            })
            .unwrap(),
            json!({"status": "accept"})
        );
        assert_eq!(FinishStatus::Reject.to_string(), "reject");
    }

    #[test]
    fn test_deserialize_advance_request() {
        let value = json!({
            "request_type": "advance_state",
            "data": {
                "metadata": {
                    "msg_sender": "0xdead",
                    "epoch_index": 0,
                    "input_index": 3,
                    "block_number": 42,
                    "timestamp": 1_700_000_000
                },
                "payload": "0x00"
            }
        });

        let request: RollupRequest = serde_json::from_value(value).unwrap();
        match request {
            RollupRequest::AdvanceState(input) => {
                assert_eq!(input.metadata.msg_sender, "0xdead");
                assert_eq!(input.metadata.input_index, 3);
                assert_eq!(input.payload, "0x00");
            }
            RollupRequest::InspectState(_) => panic!("expected advance request"),
        }
    }

    #[test]
    fn test_deserialize_inspect_request() {
        let value = json!({
            "request_type": "inspect_state",
            "data": {"payload": "0x00"}
        });

        let request: RollupRequest = serde_json::from_value(value).unwrap();
        assert!(matches!(request, RollupRequest::InspectState(_)));
    }

    #[test]
    fn test_unknown_request_type_fails_to_parse() {
        let value = json!({"request_type": "warp_state", "data": {}});
        assert!(serde_json::from_value::<RollupRequest>(value).is_err());
    }
}
