//! Resilient Formula 1 season data for dashboards.
//!
//! Paddock aggregates driver standings, constructor standings, the race calendar,
//! and season statistics from the public Jolpica (Ergast-compatible) API and
//! keeps serving a complete dataset when that API is slow, partially broken, or
//! offline.
//!
//! # Features
//!
//! - **Always complete**: every field starts as bundled sample data and is only
//!   replaced by live data that arrived intact
//! - **Per-field isolation**: one failed endpoint never discards the others
//! - **Ordered commits**: a slow cycle for an old season cannot overwrite newer data
//! - **Background refresh**: polling while online, immediate refresh on season change
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use paddock::{Paddock, PaddockConfig, Season};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     paddock::logging::init();
//!
//!     let service = Paddock::connect(&PaddockConfig::default()).await?;
//!     service.select_season(Season::Year(2023));
//!
//!     let snapshot = service.wait_until_settled().await;
//!     for driver in &snapshot.drivers {
//!         println!("{:>2}. {} ({})", driver.position, driver.name, driver.points);
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod clock;
pub mod config;
mod error;
pub mod fallback;
pub mod logging;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Remote data
pub mod gateway;
pub mod gateways;
pub mod schema;

// Aggregation
pub mod service;
pub mod simulation;

// Core exports
pub use error::*;
pub use types::*;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{GatewayConfig, PaddockConfig, ServiceConfig};
pub use fallback::FallbackDataset;
pub use gateway::Gateway;
pub use gateways::JolpicaGateway;
pub use service::{
    Notice, NoticeKind, Provenance, SeasonService, SeasonServiceBuilder, SeasonSnapshot, Sources,
};

use std::sync::Arc;

/// Unified entry point for the season data service.
///
/// # Examples
///
/// ```rust,no_run
/// use paddock::{Paddock, PaddockConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), paddock::ConfigError> {
/// let config = PaddockConfig::from_yaml_str("service:\n  poll_interval_secs: 120\n")?;
/// let service = Paddock::connect(&config).await?;
/// # Ok(())
/// # }
/// ```
pub struct Paddock;

impl Paddock {
    /// Start a service backed by the Jolpica API.
    ///
    /// The first refresh cycle starts immediately in the background; the returned
    /// service serves fallback data until live data arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid or the HTTP client
    /// cannot be built.
    pub async fn connect(config: &PaddockConfig) -> Result<SeasonService, ConfigError> {
        let gateway = JolpicaGateway::new(&config.gateway)?;
        Ok(SeasonService::builder(Arc::new(gateway)).config(config.service.clone()).start())
    }
}
