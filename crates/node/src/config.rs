//! Node configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ROLLUP_HTTP_SERVER_URL` - Base URL of the rollup host (the finish,
//!   notice, and report endpoints hang off it)
//!
//! ## Optional
//! - `RUST_LOG` - tracing filter (default: `campus_node=info`)

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Base URL of the rollup host.
    pub rollup_server_url: Url,
}

impl NodeConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let raw = get_required_env("ROLLUP_HTTP_SERVER_URL")?;
        let rollup_server_url = raw.parse::<Url>().map_err(|e| {
            ConfigError::InvalidEnvVar("ROLLUP_HTTP_SERVER_URL".to_string(), e.to_string())
        })?;

        Ok(Self { rollup_server_url })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_required_env_reports_the_key() {
        let err = get_required_env("CAMPUS_TEST_UNSET_VARIABLE").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing environment variable: CAMPUS_TEST_UNSET_VARIABLE"
        );
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = "not a url".parse::<Url>();
        assert!(result.is_err());
    }
}
