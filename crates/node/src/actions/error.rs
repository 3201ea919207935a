//! Action rejection error.

use serde_json::{Value, json};
use thiserror::Error;

/// A rejected action: a handler precondition was not met, or the request
/// referenced an entity that does not exist.
///
/// Carries the human-readable message that becomes the reported
/// `{"error": ...}` object. Handlers return this instead of panicking or
/// throwing; the report protocol converts it into a `reject` status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    /// Create an error with the given report message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The report message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The JSON object sent through the report endpoint.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        json!({"error": self.message})
    }
}
