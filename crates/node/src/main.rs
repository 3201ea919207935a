//! Campus Node - rollup backend for the course marketplace.
//!
//! This binary long-polls the rollup host for advance/inspect requests,
//! dispatches them to the registered actions over the in-memory store, and
//! reports every outcome back through the host's notice/report endpoints.
//!
//! # Architecture
//!
//! - Single-threaded cooperative scheduling: the dispatch loop is the only
//!   control flow, and the host serializes requests
//! - State is volatile and process-lifetime only; restarting the node
//!   starts from an empty store

#![cfg_attr(not(test), forbid(unsafe_code))]

use campus_node::config::NodeConfig;
use campus_node::dispatch::Node;
use campus_node::rollup::RollupClient;
use campus_node::store::DomainStore;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = NodeConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "campus_node=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        rollup_server_url = %config.rollup_server_url,
        "starting campus node"
    );

    let client = RollupClient::new(&config.rollup_server_url);
    let node = Node::new(client, DomainStore::new());

    tokio::select! {
        () = node.run() => {},
        () = shutdown_signal() => {},
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, exiting");
}
