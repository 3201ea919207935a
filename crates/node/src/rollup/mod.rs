//! Rollup host HTTP client.
//!
//! The node is a pure client of the rollup host: it polls `finish` for the
//! next pending request and posts results to `notice` (durable state
//! changes) and `report` (read results and errors).
//!
//! No timeout or cancellation is applied to these calls: a hang in any of
//! them stalls the whole loop indefinitely. The host is trusted to answer;
//! this is an accepted property of the design.

pub mod payload;
pub mod types;

pub use payload::PayloadError;
pub use types::{
    AdvanceInput, AdvanceMetadata, FinishRequest, FinishStatus, InspectInput, OutputRequest,
    RollupRequest,
};

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Errors talking to the rollup host.
#[derive(Debug, Error)]
pub enum RollupError {
    /// HTTP request failed (connect, send, or body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Payload could not be encoded.
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    /// The `finish` poll answered with an unexpected status code.
    #[error("unexpected finish status: {0}")]
    UnexpectedStatus(StatusCode),
}

/// Status code and body of a notice/report response.
///
/// The body is kept because the host's rejection text becomes part of the
/// reported error payload.
#[derive(Debug, Clone)]
pub struct HostResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HostResponse {
    /// Whether the host rejected the call (status >= 400).
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        self.status.as_u16() >= 400
    }
}

/// Client for the rollup host's finish/notice/report endpoints.
#[derive(Debug, Clone)]
pub struct RollupClient {
    client: reqwest::Client,
    base_url: String,
}

impl RollupClient {
    /// Create a new client for the host at `base_url`.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Poll for the next pending request, submitting the previous
    /// request's final status.
    ///
    /// Returns `Ok(None)` when the host answers 202 (no request pending).
    ///
    /// # Errors
    ///
    /// Returns [`RollupError`] if the call fails, the host answers a
    /// non-success status other than 202, or the body does not decode.
    #[instrument(skip(self))]
    pub async fn finish(&self, status: FinishStatus) -> Result<Option<RollupRequest>, RollupError> {
        let response = self
            .client
            .post(format!("{}/finish", self.base_url))
            .json(&FinishRequest { status })
            .send()
            .await?;

        let code = response.status();
        debug!(status = %code, "received finish status");

        if code == StatusCode::ACCEPTED {
            return Ok(None);
        }
        if !code.is_success() {
            return Err(RollupError::UnexpectedStatus(code));
        }

        let request = response.json::<RollupRequest>().await?;
        Ok(Some(request))
    }

    /// Post a notice carrying the hex-encoded JSON `value`.
    ///
    /// A notice signifies that a durable state change was recorded.
    ///
    /// # Errors
    ///
    /// Returns [`RollupError`] if the value cannot be encoded or the call
    /// fails at the transport level. A host rejection (status >= 400) is
    /// reported through the returned [`HostResponse`], not an error.
    #[instrument(skip(self, value))]
    pub async fn notice(&self, value: &Value) -> Result<HostResponse, RollupError> {
        self.post_output("notice", value).await
    }

    /// Post a report carrying the hex-encoded JSON `value`.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::notice`].
    #[instrument(skip(self, value))]
    pub async fn report(&self, value: &Value) -> Result<HostResponse, RollupError> {
        self.post_output("report", value).await
    }

    async fn post_output(&self, endpoint: &str, value: &Value) -> Result<HostResponse, RollupError> {
        let body = OutputRequest {
            payload: payload::encode(value)?,
        };

        let response = self
            .client
            .post(format!("{}/{endpoint}", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        Ok(HostResponse { status, body })
    }
}
