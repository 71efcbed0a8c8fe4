//! Error types for season data access.
//!
//! Every failure at the remote data boundary surfaces as a single [`GatewayError`]
//! carrying the endpoint that failed and the underlying cause. Gateways never retry
//! and never partially fail a call: each operation either returns a fully mapped
//! result or one of these errors. Fallback policy belongs to
//! [`SeasonService`](crate::SeasonService).
//!
//! ## Error Categories
//!
//! - **Transport Errors**: DNS, connection, or TLS failures reaching the API
//! - **Status Errors**: the API answered with a non-success HTTP status
//! - **Timeouts**: the request exceeded its configured bound
//! - **Schema Errors**: the payload could not be decoded or had an unexpected shape
//! - **Unavailable**: a non-HTTP gateway could not serve the request
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use paddock::GatewayError;
//!
//! let error = GatewayError::unavailable("/2023/driverStandings.json", "maintenance window");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! assert_eq!(error.endpoint(), "/2023/driverStandings.json");
//! ```

use std::time::Duration;
use thiserror::Error;

use crate::schema::SchemaError;

/// Result type alias for gateway operations.
pub type Result<T, E = GatewayError> = std::result::Result<T, E>;

/// Failure at the remote data boundary.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Request to {endpoint} timed out after {duration:?}")]
    Timeout { endpoint: String, duration: Duration },

    #[error("Unexpected payload from {endpoint}: {source}")]
    Schema {
        endpoint: String,
        #[source]
        source: SchemaError,
    },

    #[error("{endpoint} is unavailable: {reason}")]
    Unavailable { endpoint: String, reason: String },
}

impl GatewayError {
    /// The endpoint path that failed.
    pub fn endpoint(&self) -> &str {
        match self {
            GatewayError::Transport { endpoint, .. }
            | GatewayError::Status { endpoint, .. }
            | GatewayError::Timeout { endpoint, .. }
            | GatewayError::Schema { endpoint, .. }
            | GatewayError::Unavailable { endpoint, .. } => endpoint,
        }
    }

    /// Returns whether a later attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Transport { .. } => true,
            GatewayError::Status { status, .. } => *status == 429 || *status >= 500,
            GatewayError::Timeout { .. } => true,
            GatewayError::Schema { .. } => false,
            GatewayError::Unavailable { .. } => true,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            GatewayError::Transport { .. } => vec![
                "Check network connectivity",
                "Verify the configured base URL",
                "Retry on the next refresh cycle",
            ],
            GatewayError::Status { status, .. } if *status == 429 => vec![
                "Reduce enrichment concurrency",
                "Increase the poll interval",
            ],
            GatewayError::Status { .. } => vec![
                "Verify the season and round exist upstream",
                "Check the API status page",
            ],
            GatewayError::Timeout { .. } => vec![
                "Increase the request timeout",
                "Check upstream latency",
            ],
            GatewayError::Schema { .. } => vec![
                "Check for upstream schema changes",
                "Verify the base URL points at an Ergast-compatible API",
            ],
            GatewayError::Unavailable { .. } => vec!["Retry on the next refresh cycle"],
        }
    }

    /// Helper constructor for schema mismatches.
    pub fn schema(endpoint: impl Into<String>, source: SchemaError) -> Self {
        GatewayError::Schema { endpoint: endpoint.into(), source }
    }

    /// Helper constructor for timeouts.
    pub fn timeout(endpoint: impl Into<String>, duration: Duration) -> Self {
        GatewayError::Timeout { endpoint: endpoint.into(), duration }
    }

    /// Helper constructor for gateways that cannot serve a request.
    pub fn unavailable(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        GatewayError::Unavailable { endpoint: endpoint.into(), reason: reason.into() }
    }

    /// Classify a reqwest failure for `endpoint`.
    pub fn from_reqwest(endpoint: impl Into<String>, source: reqwest::Error, limit: Duration) -> Self {
        let endpoint = endpoint.into();
        if source.is_timeout() {
            GatewayError::Timeout { endpoint, duration: limit }
        } else if let Some(status) = source.status() {
            GatewayError::Status { endpoint, status: status.as_u16() }
        } else {
            GatewayError::Transport { endpoint, source }
        }
    }
}

/// Invalid or unloadable configuration.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Invalid configuration document: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("Invalid base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
          #[test]
          fn messages_always_name_the_endpoint(
            endpoint in "/[a-z0-9]{1,8}/[a-zA-Z]{1,20}\\.json",
            status in 100u16..600u16,
            reason in ".*"
          ) {
            let status_err = GatewayError::Status { endpoint: endpoint.clone(), status };
            let unavailable = GatewayError::unavailable(endpoint.clone(), reason.clone());
            let schema = GatewayError::schema(endpoint.clone(), SchemaError::shape("x", "y"));

            prop_assert!(status_err.to_string().contains(&endpoint));
            prop_assert!(status_err.to_string().contains(&status.to_string()));
            prop_assert!(unavailable.to_string().contains(&reason));
            prop_assert_eq!(schema.endpoint(), endpoint.as_str());
          }

          #[test]
          fn only_throttling_and_server_statuses_retry(status in 100u16..600u16) {
            let err = GatewayError::Status { endpoint: "/current/races.json".to_string(), status };
            prop_assert_eq!(err.is_retryable(), status == 429 || status >= 500);
          }
        }
    }

    #[test]
    fn schema_errors_chain_their_source() {
        let err = GatewayError::schema(
            "/2023/races.json",
            SchemaError::shape("Races.date", "not a date"),
        );
        let source = std::error::Error::source(&err).expect("schema error has a source");
        assert!(source.to_string().contains("Races.date"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<GatewayError>();
        assert_send_sync_static::<ConfigError>();
    }

    #[test]
    fn recovery_suggestions_are_actionable() {
        let errors = [
            GatewayError::timeout("/current/races.json", Duration::from_secs(10)),
            GatewayError::Status { endpoint: "/current/races.json".to_string(), status: 429 },
            GatewayError::unavailable("/current/races.json", "offline"),
        ];
        for error in &errors {
            assert!(error.is_retryable());
            let suggestions = error.recovery_suggestions();
            assert!(!suggestions.is_empty());
            assert!(suggestions.iter().all(|s| s.len() > 5));
        }
    }
}
