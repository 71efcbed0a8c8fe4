//! Gateway trait for remote season data

use crate::Result;
use crate::types::{Constructor, Driver, Race, RaceResult, RoundRef, Season, SeasonStats};

/// Trait for remote season data sources
///
/// A gateway translates one external schema family into the domain records and
/// isolates all network-shape knowledge. Implementations are stateless from the
/// caller's perspective and perform no retries: every call either returns a fully
/// mapped value or a [`GatewayError`](crate::GatewayError).
#[async_trait::async_trait]
pub trait Gateway: Send + Sync + 'static {
    /// Minimal liveness probe.
    ///
    /// Returns `true` only on a success response. Never fails; every error is
    /// reported as `false`.
    async fn health(&self) -> bool;

    /// Ranked driver standings. Fails if the standings list is empty.
    async fn driver_standings(&self, season: Season) -> Result<Vec<Driver>>;

    /// Ranked constructor standings with each constructor's driver roster.
    async fn constructor_standings(&self, season: Season) -> Result<Vec<Constructor>>;

    /// Season calendar. Result fields are [`TBD`](crate::types::TBD).
    async fn season_races(&self, season: Season) -> Result<Vec<Race>>;

    /// Classified results of one race. Fails if the race has no results.
    async fn race_results(&self, season: Season, round: RoundRef) -> Result<Vec<RaceResult>>;

    /// One race with winner and fastest lap resolved.
    ///
    /// Returns `Ok(None)` when the round does not exist.
    async fn race_with_results(&self, season: Season, round: RoundRef) -> Result<Option<Race>>;

    /// Season summary figures as of the gateway's clock.
    async fn season_stats(&self, season: Season) -> Result<SeasonStats>;
}
