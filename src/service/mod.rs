//! Season data service
//!
//! [`SeasonService`] keeps one published [`SeasonSnapshot`] of drivers,
//! constructors, races and season statistics. The snapshot starts out as the
//! bundled fallback data and is replaced field by field as live fetches succeed.
//!
//! A background worker runs a refresh cycle when the service starts, whenever
//! the selected season changes, and on a fixed interval while the live API is
//! reachable. Each cycle:
//!
//! 1. probes API health; if unhealthy, keeps the current data and posts an advisory
//! 2. fetches the four primary datasets concurrently, each with its own timeout
//! 3. attaches results to races that have already taken place
//! 4. commits only if no newer cycle has committed and its season is still selected
//!
//! Consumers read with [`SeasonService::snapshot`] or subscribe to
//! [`SeasonService::updates`].

mod cycle;
mod state;
mod worker;


use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::ServiceConfig;
use crate::fallback::FallbackDataset;
use crate::gateway::Gateway;
use crate::simulation;
use crate::types::{Race, RaceResult, RoundRef, Season, TelemetryData};

pub use state::{Notice, NoticeKind, OFFLINE_ADVISORY, Provenance, SeasonSnapshot, Sources};

use cycle::guarded;
use worker::Shared;

/// Configures and starts a [`SeasonService`].
pub struct SeasonServiceBuilder {
    gateway: Arc<dyn Gateway>,
    config: ServiceConfig,
    clock: Arc<dyn Clock>,
    fallback: FallbackDataset,
}

impl SeasonServiceBuilder {
    pub fn config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Clock used to decide which races have already taken place.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn fallback(mut self, fallback: FallbackDataset) -> Self {
        self.fallback = fallback;
        self
    }

    /// Spawn the background worker and return the service handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> SeasonService {
        let shared = Arc::new(Shared::new(
            self.gateway,
            self.clock,
            Arc::new(self.fallback),
            self.config,
        ));
        let state = shared.state.subscribe();
        let seasons = shared.season.subscribe();
        let cancel = CancellationToken::new();

        info!(season = %shared.selected_season(), "Starting season service");
        let worker = tokio::spawn(worker::worker_task(Arc::clone(&shared), seasons, cancel.clone()));

        SeasonService { shared, state, cancel, worker: Mutex::new(Some(worker)) }
    }
}

/// Handle to a running season data service.
///
/// Dropping the handle cancels the background worker.
pub struct SeasonService {
    shared: Arc<Shared>,
    state: watch::Receiver<Arc<SeasonSnapshot>>,
    cancel: CancellationToken,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl SeasonService {
    pub fn builder(gateway: Arc<dyn Gateway>) -> SeasonServiceBuilder {
        SeasonServiceBuilder {
            gateway,
            config: ServiceConfig::default(),
            clock: Arc::new(SystemClock),
            fallback: FallbackDataset::bundled(),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<SeasonSnapshot> {
        Arc::clone(&self.state.borrow())
    }

    /// Stream of snapshots, starting with the current one.
    pub fn updates(&self) -> WatchStream<Arc<SeasonSnapshot>> {
        WatchStream::new(self.state.clone())
    }

    /// Wait until no refresh cycle is in flight and return that snapshot.
    pub async fn wait_until_settled(&self) -> Arc<SeasonSnapshot> {
        let mut state = self.state.clone();
        let settled = match state.wait_for(|snapshot| !snapshot.is_loading).await {
            Ok(snapshot) => Arc::clone(&snapshot),
            Err(_) => self.snapshot(),
        };
        settled
    }

    /// Run a refresh cycle for the selected season and wait for it to finish.
    ///
    /// Does nothing once the service has been shut down.
    pub async fn refresh(&self) {
        if self.cancel.is_cancelled() {
            warn!("Refresh requested after shutdown, ignoring");
            return;
        }
        let season = self.shared.selected_season();
        self.shared.run_cycle(season).await;
    }

    /// Select a different season; the worker refreshes for it immediately.
    ///
    /// Does nothing once the service has been shut down.
    pub fn select_season(&self, season: Season) {
        if self.cancel.is_cancelled() {
            warn!(%season, "Season selected after shutdown, ignoring");
            return;
        }
        if self.shared.select_season(season) {
            info!(%season, "Season selected");
        }
    }

    pub fn selected_season(&self) -> Season {
        self.shared.selected_season()
    }

    /// Classification for one race, live when reachable and synthesized otherwise.
    pub async fn race_results(&self, season: Season, round: RoundRef) -> Vec<RaceResult> {
        if self.snapshot().is_online {
            let call = self.shared.gateway.race_results(season, round);
            match guarded("race_results", self.shared.config.request_timeout(), call).await {
                Ok(results) => return results,
                Err(e) => {
                    warn!(%season, %round, error = %e, "Falling back to bundled race results")
                }
            }
        }
        self.shared.fallback.race_results(round)
    }

    /// One race with its results, from the live API or the bundled races.
    ///
    /// While online, a round the API does not know is `None`; the bundled races
    /// are used only when offline or when the lookup fails.
    pub async fn race_details(&self, season: Season, round: RoundRef) -> Option<Race> {
        if self.snapshot().is_online {
            let call = self.shared.gateway.race_with_results(season, round);
            match guarded("race_with_results", self.shared.config.request_timeout(), call).await {
                Ok(race) => return race,
                Err(e) => {
                    warn!(%season, %round, error = %e, "Falling back to bundled race details")
                }
            }
        }
        self.shared.fallback.race(round)
    }

    /// Synthetic telemetry for the current top drivers.
    pub fn simulated_telemetry(&self) -> Vec<TelemetryData> {
        simulation::simulate_telemetry(&self.snapshot().drivers, &mut rand::thread_rng())
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// In-flight cycles are aborted; the last committed snapshot stays readable.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let worker = self.worker.lock().ok().and_then(|mut slot| slot.take());
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                warn!("Season worker ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for SeasonService {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
