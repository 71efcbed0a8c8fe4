//! Configuration for the gateway and the season service.
//!
//! Every field has a default, so an empty YAML document is a valid configuration:
//!
//! ```yaml
//! gateway:
//!   base_url: https://api.jolpi.ca/ergast/f1
//!   page_limit: 100
//!   request_timeout_secs: 10
//!   health_timeout_secs: 5
//! service:
//!   initial_season: "2023"
//!   poll_interval_secs: 300
//!   request_timeout_secs: 10
//!   enrichment_concurrency: 4
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Season;

pub const DEFAULT_BASE_URL: &str = "https://api.jolpi.ca/ergast/f1";

/// Settings for [`JolpicaGateway`](crate::gateways::JolpicaGateway).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base path every endpoint is appended to
    pub base_url: String,
    /// Rows requested per call
    pub page_limit: u32,
    pub request_timeout_secs: u64,
    /// Bound for the liveness probe
    pub health_timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_limit: 100,
            request_timeout_secs: 10,
            health_timeout_secs: 5,
            user_agent: None,
        }
    }
}

impl GatewayConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    /// Base URL without a trailing slash, validated for an http(s) scheme.
    pub fn normalized_base_url(&self) -> Result<String, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::BaseUrl {
                url: self.base_url.clone(),
                reason: "expected an http:// or https:// URL".to_string(),
            });
        }
        Ok(trimmed.to_string())
    }
}

/// Settings for [`SeasonService`](crate::SeasonService).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub initial_season: Season,
    /// Period between background refreshes while online
    pub poll_interval_secs: u64,
    /// Upper bound applied to every gateway call made by the service
    pub request_timeout_secs: u64,
    /// Maximum concurrent per-race result fetches during enrichment
    pub enrichment_concurrency: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            initial_season: Season::Current,
            poll_interval_secs: 300,
            request_timeout_secs: 10,
            enrichment_concurrency: 4,
        }
    }
}

impl ServiceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddockConfig {
    pub gateway: GatewayConfig,
    pub service: ServiceConfig,
}

impl PaddockConfig {
    /// Parse a YAML configuration document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml_str(&yaml)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = PaddockConfig::from_yaml_str("").unwrap();
        assert_eq!(config, PaddockConfig::default());
        assert_eq!(config.service.poll_interval(), Duration::from_secs(300));
        assert_eq!(config.gateway.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = PaddockConfig::from_yaml_str(
            "service:\n  initial_season: \"2021\"\n  poll_interval_secs: 60\n",
        )
        .unwrap();
        assert_eq!(config.service.initial_season, Season::Year(2021));
        assert_eq!(config.service.poll_interval(), Duration::from_secs(60));
        assert_eq!(config.service.enrichment_concurrency, 4);
        assert_eq!(config.gateway.page_limit, 100);
    }

    #[test]
    fn invalid_season_is_rejected() {
        let err = PaddockConfig::from_yaml_str("service:\n  initial_season: soon\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn base_url_is_normalized() {
        let config = GatewayConfig {
            base_url: "http://localhost:8080/ergast/f1/".to_string(),
            ..GatewayConfig::default()
        };
        assert_eq!(config.normalized_base_url().unwrap(), "http://localhost:8080/ergast/f1");

        let bad = GatewayConfig { base_url: "ftp://example".to_string(), ..GatewayConfig::default() };
        assert!(matches!(bad.normalized_base_url(), Err(ConfigError::BaseUrl { .. })));
    }

    #[test]
    fn load_reports_missing_file_with_context() {
        let path = std::env::temp_dir().join("paddock-config-does-not-exist.yaml");
        let err = PaddockConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("reading config file"));
    }

    #[test]
    fn load_reads_yaml_from_disk() {
        let path = std::env::temp_dir().join(format!("paddock-config-{}.yaml", std::process::id()));
        std::fs::write(&path, "gateway:\n  page_limit: 30\n").unwrap();
        let config = PaddockConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.gateway.page_limit, 30);
    }
}
