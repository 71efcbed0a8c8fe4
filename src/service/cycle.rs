//! One refresh cycle: health probe, primary fetches, and race enrichment

use std::future::Future;
use std::time::Duration;

use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::types::{Constructor, Driver, Race, RoundRef, Season, SeasonStats};
use crate::Result;

/// Per-field results of a cycle; `None` keeps the previous value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CycleOutcome {
    pub online: bool,
    pub drivers: Option<Vec<Driver>>,
    pub constructors: Option<Vec<Constructor>>,
    pub races: Option<Vec<Race>>,
    pub season_stats: Option<SeasonStats>,
}

impl CycleOutcome {
    pub(crate) fn offline() -> Self {
        Self { online: false, drivers: None, constructors: None, races: None, season_stats: None }
    }
}

/// Everything a cycle needs from the service.
pub(crate) struct CycleContext<'a> {
    pub gateway: &'a dyn Gateway,
    pub clock: &'a dyn Clock,
    pub request_timeout: Duration,
    pub enrichment_concurrency: usize,
}

/// Bound a gateway call; expiry is reported as a timeout for `operation`.
pub(crate) async fn guarded<T>(
    operation: &'static str,
    limit: Duration,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::timeout(operation, limit)),
    }
}

fn accept_list<T>(field: &str, result: Result<Vec<T>>) -> Option<Vec<T>> {
    match result {
        Ok(list) if !list.is_empty() => {
            debug!(field, count = list.len(), "Live data accepted");
            Some(list)
        }
        Ok(_) => {
            warn!(field, "Live data empty, keeping previous value");
            None
        }
        Err(e) => {
            warn!(field, error = %e, "Fetch failed, keeping previous value");
            None
        }
    }
}

/// Probe health, then run the four primary fetches concurrently.
///
/// Each fetch settles independently; a failure in one never cancels the others.
pub(crate) async fn fetch_primary(ctx: &CycleContext<'_>, season: Season) -> CycleOutcome {
    let healthy =
        tokio::time::timeout(ctx.request_timeout, ctx.gateway.health()).await.unwrap_or(false);
    if !healthy {
        warn!(%season, "Live API unavailable, serving current data");
        return CycleOutcome::offline();
    }

    info!(%season, "Fetching live season data");
    let limit = ctx.request_timeout;
    let (drivers, constructors, races, season_stats) = futures::join!(
        guarded("driver_standings", limit, ctx.gateway.driver_standings(season)),
        guarded("constructor_standings", limit, ctx.gateway.constructor_standings(season)),
        guarded("season_races", limit, ctx.gateway.season_races(season)),
        guarded("season_stats", limit, ctx.gateway.season_stats(season)),
    );

    let season_stats = match season_stats {
        Ok(stats) => {
            debug!(field = "season stats", "Live data accepted");
            Some(stats)
        }
        Err(e) => {
            warn!(field = "season stats", error = %e, "Fetch failed, keeping previous value");
            None
        }
    };

    CycleOutcome {
        online: true,
        drivers: accept_list("driver standings", drivers),
        constructors: accept_list("constructor standings", constructors),
        races: accept_list("season races", races),
        season_stats,
    }
}

/// Attach results to every race that has already started.
///
/// Runs at most `enrichment_concurrency` lookups at once and keeps calendar order.
/// A failed or empty lookup keeps that race's schedule-only record.
pub(crate) async fn enrich(ctx: &CycleContext<'_>, season: Season, races: Vec<Race>) -> Vec<Race> {
    let now = ctx.clock.now();
    let limit = ctx.request_timeout;

    futures::stream::iter(races)
        .map(|race| async move {
            if !race.is_past(now) {
                return race;
            }
            let round = RoundRef::Number(race.round);
            match guarded("race_with_results", limit, ctx.gateway.race_with_results(season, round))
                .await
            {
                Ok(Some(enriched)) => enriched,
                Ok(None) => race,
                Err(e) => {
                    debug!(%season, round = race.round, error = %e, "Keeping schedule-only race");
                    race
                }
            }
        })
        .buffered(ctx.enrichment_concurrency.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::test_utils::{DetailReply, ScriptedGateway, sample};
    use crate::types::TBD;

    fn context<'a>(gateway: &'a ScriptedGateway, clock: &'a FixedClock) -> CycleContext<'a> {
        CycleContext {
            gateway,
            clock,
            request_timeout: Duration::from_secs(10),
            enrichment_concurrency: 2,
        }
    }

    #[tokio::test]
    async fn unhealthy_gateway_yields_offline_outcome() {
        let gateway = ScriptedGateway::offline();
        let clock = sample::clock_2023_03_20();
        let outcome = fetch_primary(&context(&gateway, &clock), Season::Year(2023)).await;

        assert_eq!(outcome, CycleOutcome::offline());
        assert_eq!(gateway.drivers.calls(), 0);
    }

    #[tokio::test]
    async fn empty_lists_are_not_accepted() {
        let gateway = ScriptedGateway::online();
        gateway.drivers.set(Some(Vec::new()));
        let clock = sample::clock_2023_03_20();
        let outcome = fetch_primary(&context(&gateway, &clock), Season::Year(2023)).await;

        assert!(outcome.online);
        assert!(outcome.drivers.is_none());
        assert!(outcome.constructors.is_some());
    }

    #[tokio::test]
    async fn enrichment_keeps_order_and_skips_future_races() {
        let gateway = ScriptedGateway::online();
        gateway.set_detail(1, DetailReply::Found(sample::enriched_race(1)));
        gateway.set_detail(2, DetailReply::Fail);
        let clock = sample::clock_2023_03_20();

        let races = enrich(&context(&gateway, &clock), Season::Year(2023), sample::live_races()).await;

        let rounds: Vec<u32> = races.iter().map(|r| r.round).collect();
        assert_eq!(rounds, vec![1, 2, 3]);
        assert_eq!(races[0].winner, "Max Verstappen");
        assert_eq!(races[1].winner, TBD);
        assert_eq!(races[2].winner, TBD);
        assert_eq!(gateway.detail_calls(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_calls_time_out() {
        let result: Result<u32> = guarded("slow", Duration::from_secs(1), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(1)
        })
        .await;

        assert!(matches!(result, Err(GatewayError::Timeout { .. })));
    }
}
