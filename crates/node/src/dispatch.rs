//! Dispatch loop: polls the host, routes each request, feeds the status
//! back.
//!
//! One logical step: submit the previous request's final status to the
//! `finish` endpoint, block until the host hands back the next pending
//! request (or 202 for none), decode it, run the registered action, and
//! resolve the outcome through the report protocol. The resolved status is
//! what the next `finish` call submits.
//!
//! Exactly one request is processed end-to-end - including its outbound
//! notice/report - before the next poll; there is no pipelining and no
//! concurrent handler execution. The loop never terminates on request-level
//! failures: malformed payloads, unknown actions, and handler rejections
//! all resolve to a reported `reject`, and transport failures on the poll
//! itself are logged and retried.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use crate::actions::{Action, ActionExecutor, ActionInput, ActionKind};
use crate::reporter::Reporter;
use crate::rollup::{
    AdvanceInput, FinishStatus, InspectInput, RollupClient, RollupRequest, payload,
};
use crate::store::DomainStore;

/// The decoded document inside an advance payload.
#[derive(Debug, Deserialize)]
struct AdvanceCall {
    action: String,
    #[serde(default)]
    data: Value,
}

/// The node: host client plus the state the actions operate on.
pub struct Node {
    client: RollupClient,
    store: DomainStore,
}

impl Node {
    /// Create a node over a host client and an initial (normally empty)
    /// store.
    #[must_use]
    pub fn new(client: RollupClient, store: DomainStore) -> Self {
        Self { client, store }
    }

    /// The domain store, for inspection in tests.
    #[must_use]
    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    /// Run the dispatch loop. Never completes.
    pub async fn run(mut self) {
        info!("dispatch loop started");
        let mut status = FinishStatus::Accept;
        loop {
            status = self.step(status).await;
        }
    }

    /// One poll round: submit `status`, process the pending request if the
    /// host has one, and return the status for the next round.
    pub async fn step(&mut self, status: FinishStatus) -> FinishStatus {
        match self.client.finish(status).await {
            Ok(Some(request)) => self.process(request).await,
            Ok(None) => {
                debug!("no pending rollup request, trying again");
                status
            }
            Err(err) => {
                warn!(error = %err, "finish poll failed, retrying");
                status
            }
        }
    }

    /// Process one decoded request end-to-end, resolving its final status.
    pub async fn process(&mut self, request: RollupRequest) -> FinishStatus {
        match request {
            RollupRequest::AdvanceState(input) => self.handle_advance(input).await,
            RollupRequest::InspectState(input) => self.handle_inspect(input).await,
        }
    }

    /// Decode and dispatch an advance request: hex payload -> UTF-8 JSON
    /// `{action, data}`.
    async fn handle_advance(&mut self, input: AdvanceInput) -> FinishStatus {
        debug!(
            msg_sender = %input.metadata.msg_sender,
            epoch_index = input.metadata.epoch_index,
            input_index = input.metadata.input_index,
            block_number = input.metadata.block_number,
            timestamp = input.metadata.timestamp,
            "received advance request"
        );

        let call: AdvanceCall = match payload::decode(&input.payload)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()))
        {
            Ok(call) => call,
            Err(err) => {
                error!(error = %err, "malformed advance payload");
                return self.reject_malformed(&err).await;
            }
        };

        let Some(action) = Action::from_name(&call.action) else {
            return self.reject_unknown_action(&call.action).await;
        };

        info!(action = action.name(), "dispatching advance request");
        self.dispatch(action, ActionInput::Fields(call.data)).await
    }

    /// Decode and dispatch an inspect request: hex payload -> UTF-8
    /// `action/arg1/arg2/...`.
    async fn handle_inspect(&mut self, input: InspectInput) -> FinishStatus {
        let raw = match payload::decode(&input.payload) {
            Ok(raw) => raw,
            Err(err) => {
                error!(error = %err, "malformed inspect payload");
                return self.reject_malformed(&err.to_string()).await;
            }
        };

        let mut segments = raw.split('/');
        let name = segments.next().unwrap_or_default();
        let args: Vec<String> = segments.map(str::to_string).collect();

        let Some(action) = Action::from_name(name) else {
            return self.reject_unknown_action(name).await;
        };

        info!(action = action.name(), "dispatching inspect request");
        self.dispatch(action, ActionInput::Args(args)).await
    }

    /// Run the action and resolve its outcome through the wrapper its kind
    /// demands: advance-kind ends in a notice on success, inspect-kind in a
    /// report.
    async fn dispatch(&mut self, action: Action, input: ActionInput) -> FinishStatus {
        let result = ActionExecutor::new(&mut self.store).execute(action, &input);
        let reporter = Reporter::new(&self.client);
        match action.kind() {
            ActionKind::Advance => reporter.advance_outcome(result).await,
            ActionKind::Inspect => reporter.inspect_outcome(result).await,
        }
    }

    /// Reject a request whose action name is not registered, without
    /// invoking any handler.
    async fn reject_unknown_action(&self, name: &str) -> FinishStatus {
        warn!(action = name, "action not registered");
        let payload = json!({"error": format!("Action '{name}' not allowed.")});
        Reporter::new(&self.client)
            .handle_report(&payload, FinishStatus::Reject)
            .await
    }

    async fn reject_malformed(&self, detail: &str) -> FinishStatus {
        let payload = json!({"error": format!("Malformed request payload: {detail}")});
        Reporter::new(&self.client)
            .handle_report(&payload, FinishStatus::Reject)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_call_data_defaults_to_null() {
        let call: AdvanceCall = serde_json::from_str(r#"{"action": "get_users"}"#).unwrap();
        assert_eq!(call.action, "get_users");
        assert!(call.data.is_null());
    }

    #[test]
    fn test_advance_call_rejects_missing_action() {
        assert!(serde_json::from_str::<AdvanceCall>(r#"{"data": {}}"#).is_err());
    }
}
