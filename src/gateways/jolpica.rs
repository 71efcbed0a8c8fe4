//! HTTP gateway for the Jolpica (Ergast-compatible) F1 API

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::GatewayConfig;
use crate::error::{ConfigError, GatewayError};
use crate::gateway::Gateway;
use crate::schema::{self, Rosters, SchemaError};
use crate::types::{Constructor, Driver, Race, RaceResult, RoundRef, Season, SeasonStats};
use crate::Result;

/// Gateway backed by the public Jolpica REST API
pub struct JolpicaGateway {
    client: reqwest::Client,

    /// Base path without trailing slash
    base_url: String,

    /// Rows requested per call
    page_limit: u32,

    request_timeout: Duration,
    health_timeout: Duration,

    /// Source of "now" for completed-race counts
    clock: Arc<dyn Clock>,
}

impl JolpicaGateway {
    /// Create a gateway from configuration.
    pub fn new(config: &GatewayConfig) -> std::result::Result<Self, ConfigError> {
        let base_url = config.normalized_base_url()?;

        let mut builder = reqwest::Client::builder().timeout(config.request_timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let client = builder.build().map_err(ConfigError::HttpClient)?;

        info!(base_url = %base_url, "Jolpica gateway configured");

        Ok(Self {
            client,
            base_url,
            page_limit: config.page_limit.max(1),
            request_timeout: config.request_timeout(),
            health_timeout: config.health_timeout(),
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the clock used for date comparisons.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an endpoint and return the raw body of a success response.
    async fn fetch(&self, endpoint: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}?limit={}", self.base_url, endpoint, self.page_limit);
        debug!(%url, "Requesting");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::from_reqwest(endpoint, e, self.request_timeout))?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "Upstream returned an error status");
            return Err(GatewayError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::from_reqwest(endpoint, e, self.request_timeout))?;
        trace!(endpoint, bytes = body.len(), "Response received");
        Ok(body.to_vec())
    }

    /// Fetch an endpoint and run its decoder, tagging schema failures with the endpoint.
    async fn fetch_decoded<T>(
        &self,
        endpoint: &str,
        decode: impl FnOnce(&[u8]) -> std::result::Result<T, SchemaError>,
    ) -> Result<T> {
        let body = self.fetch(endpoint).await?;
        decode(&body).map_err(|e| {
            warn!(endpoint, error = %e, "Payload did not match the expected schema");
            GatewayError::schema(endpoint, e)
        })
    }
}

fn driver_standings_endpoint(season: Season) -> String {
    format!("/{season}/driverStandings.json")
}

fn races_endpoint(season: Season) -> String {
    format!("/{season}/races.json")
}

fn results_endpoint(season: Season, round: RoundRef) -> String {
    format!("/{season}/{round}/results.json")
}

#[async_trait::async_trait]
impl Gateway for JolpicaGateway {
    async fn health(&self) -> bool {
        let url = format!("{}/current/drivers.json?limit=1", self.base_url);
        match self.client.get(&url).timeout(self.health_timeout).send().await {
            Ok(response) => {
                let healthy = response.status().is_success();
                debug!(status = response.status().as_u16(), healthy, "Health probe answered");
                healthy
            }
            Err(e) => {
                debug!(error = %e, "Health probe failed");
                false
            }
        }
    }

    async fn driver_standings(&self, season: Season) -> Result<Vec<Driver>> {
        self.fetch_decoded(&driver_standings_endpoint(season), schema::decode_driver_standings)
            .await
    }

    async fn constructor_standings(&self, season: Season) -> Result<Vec<Constructor>> {
        // Driver standings are the season's driver/constructor pairing source.
        let standings_endpoint = format!("/{season}/constructorStandings.json");
        let roster_endpoint = driver_standings_endpoint(season);

        let (standings, roster_body) =
            futures::try_join!(self.fetch(&standings_endpoint), self.fetch(&roster_endpoint))?;

        let rosters = Rosters::decode(&roster_body)
            .map_err(|e| GatewayError::schema(roster_endpoint.as_str(), e))?;
        schema::decode_constructor_standings(&standings, &rosters)
            .map_err(|e| GatewayError::schema(standings_endpoint.as_str(), e))
    }

    async fn season_races(&self, season: Season) -> Result<Vec<Race>> {
        self.fetch_decoded(&races_endpoint(season), schema::decode_season_races).await
    }

    async fn race_results(&self, season: Season, round: RoundRef) -> Result<Vec<RaceResult>> {
        self.fetch_decoded(&results_endpoint(season, round), schema::decode_race_results).await
    }

    async fn race_with_results(&self, season: Season, round: RoundRef) -> Result<Option<Race>> {
        self.fetch_decoded(&results_endpoint(season, round), schema::decode_race_with_results)
            .await
    }

    async fn season_stats(&self, season: Season) -> Result<SeasonStats> {
        let now = self.clock.now();
        self.fetch_decoded(&races_endpoint(season), |body| schema::decode_season_stats(body, now))
            .await
    }
}
