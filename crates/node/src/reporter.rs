//! Report protocol: converts handler outcomes into host calls and terminal
//! statuses.
//!
//! Every processed request must terminate through exactly one of the paths
//! here, producing exactly one outbound notice or report call and a final
//! [`FinishStatus`]. Advance-kind successes become notices (a durable state
//! change was recorded); everything else - read results, validation
//! failures, host rejections - becomes a report.
//!
//! Rules:
//! - a caller-requested `reject` is never upgraded to `accept`;
//! - a requested `accept` is downgraded to `reject` when the host answers
//!   the report with a status >= 400;
//! - a host-rejected notice is rerouted through the report path with the
//!   host's response text as the error payload;
//! - transport failures on the outbound call itself are logged and yield
//!   `reject` - errors never escape into the dispatch loop.

use serde_json::{Value, json};
use tracing::{error, info};

use crate::actions::ActionError;
use crate::rollup::{FinishStatus, RollupClient};

/// Routes one handler outcome through the notice/report endpoints.
pub struct Reporter<'a> {
    client: &'a RollupClient,
}

impl<'a> Reporter<'a> {
    /// Create a reporter over the host client.
    #[must_use]
    pub const fn new(client: &'a RollupClient) -> Self {
        Self { client }
    }

    /// Resolve an advance-kind outcome: notice on success, report on
    /// rejection.
    pub async fn advance_outcome(&self, result: Result<Value, ActionError>) -> FinishStatus {
        let value = match result {
            Ok(value) => value,
            Err(err) => return self.handle_report(&err.to_payload(), FinishStatus::Reject).await,
        };

        match self.client.notice(&value).await {
            Ok(response) if !response.is_rejection() => {
                info!(status = %response.status, "notice generated");
                FinishStatus::Accept
            }
            Ok(response) => {
                // The host refused to record the state change; surface its
                // answer as the reported error.
                let payload = json!({
                    "error": response.body,
                    "status": response.status.as_u16(),
                });
                self.handle_report(&payload, FinishStatus::Reject).await
            }
            Err(err) => {
                error!(error = %err, "failed to deliver notice");
                let payload = json!({"error": err.to_string()});
                self.handle_report(&payload, FinishStatus::Reject).await
            }
        }
    }

    /// Resolve an inspect-kind outcome: report either way, accepting only
    /// a success the host also accepted.
    pub async fn inspect_outcome(&self, result: Result<Value, ActionError>) -> FinishStatus {
        match result {
            Ok(value) => self.handle_report(&value, FinishStatus::Accept).await,
            Err(err) => self.handle_report(&err.to_payload(), FinishStatus::Reject).await,
        }
    }

    /// Send one report and resolve the final status.
    ///
    /// The requested status is the ceiling: `accept` downgrades to `reject`
    /// when the host answers with a status >= 400, and `reject` stays
    /// `reject` no matter what the host answers.
    pub async fn handle_report(&self, data: &Value, requested: FinishStatus) -> FinishStatus {
        match self.client.report(data).await {
            Ok(response) => {
                info!(status = %response.status, "report generated");
                if response.is_rejection() {
                    FinishStatus::Reject
                } else {
                    requested
                }
            }
            Err(err) => {
                error!(error = %err, "failed to deliver report");
                FinishStatus::Reject
            }
        }
    }
}
