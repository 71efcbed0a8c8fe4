//! Shared service state and the background refresh task

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use futures::FutureExt;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use super::cycle::{self, CycleContext, CycleOutcome};
use super::state::{Notice, Provenance, SeasonSnapshot};
use crate::clock::Clock;
use crate::config::ServiceConfig;
use crate::fallback::FallbackDataset;
use crate::gateway::Gateway;
use crate::types::{Race, Season};

/// Shown when a cycle dies without a usable message.
const GENERIC_FAILURE: &str = "Failed to fetch F1 data";

/// State shared between the service handle, the worker, and in-flight cycles.
pub(crate) struct Shared {
    pub gateway: Arc<dyn Gateway>,
    pub clock: Arc<dyn Clock>,
    pub fallback: Arc<FallbackDataset>,
    pub config: ServiceConfig,
    pub state: watch::Sender<Arc<SeasonSnapshot>>,
    pub season: watch::Sender<Season>,

    /// Generation handed to the most recently started cycle
    started: AtomicU64,
    /// Generation of the most recently committed cycle
    committed: AtomicU64,
    in_flight: AtomicUsize,
}

/// Marks a cycle as running; dropping it recomputes the loading flag.
struct InFlight<'a> {
    shared: &'a Shared,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.shared.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.shared.state.send_if_modified(|snapshot| {
            let loading = self.shared.in_flight.load(Ordering::SeqCst) > 0;
            if snapshot.is_loading == loading {
                return false;
            }
            Arc::make_mut(snapshot).is_loading = loading;
            true
        });
    }
}

impl Shared {
    pub(crate) fn new(
        gateway: Arc<dyn Gateway>,
        clock: Arc<dyn Clock>,
        fallback: Arc<FallbackDataset>,
        config: ServiceConfig,
    ) -> Self {
        let season = config.initial_season;
        let (state, _) = watch::channel(Arc::new(SeasonSnapshot::initial(&fallback, season)));
        let (season, _) = watch::channel(season);

        Self {
            gateway,
            clock,
            fallback,
            config,
            state,
            season,
            started: AtomicU64::new(0),
            committed: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub(crate) fn snapshot(&self) -> Arc<SeasonSnapshot> {
        Arc::clone(&self.state.borrow())
    }

    pub(crate) fn selected_season(&self) -> Season {
        *self.season.borrow()
    }

    /// Switch the selected season; returns false when it was already selected.
    pub(crate) fn select_season(&self, season: Season) -> bool {
        let changed = self.season.send_if_modified(|current| {
            if *current == season {
                return false;
            }
            *current = season;
            true
        });
        if changed {
            self.state.send_modify(|snapshot| {
                let snapshot = Arc::make_mut(snapshot);
                snapshot.selected_season = season;
                snapshot.is_loading = true;
            });
        }
        changed
    }

    fn context(&self) -> CycleContext<'_> {
        CycleContext {
            gateway: self.gateway.as_ref(),
            clock: self.clock.as_ref(),
            request_timeout: self.config.request_timeout(),
            enrichment_concurrency: self.config.enrichment_concurrency,
        }
    }

    fn begin(&self) -> InFlight<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|snapshot| {
            let snapshot = Arc::make_mut(snapshot);
            snapshot.is_loading = true;
            snapshot.error = None;
        });
        InFlight { shared: self }
    }

    /// Run one full refresh cycle for `season` and commit it unless superseded.
    pub(crate) async fn run_cycle(&self, season: Season) {
        let generation = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = self.begin();
        debug!(generation, %season, "Refresh cycle started");

        match AssertUnwindSafe(self.collect(season)).catch_unwind().await {
            Ok(outcome) => self.commit(generation, season, outcome),
            Err(panic) => {
                self.record_failure(generation, season, panic_message(panic.as_ref()))
            }
        }
    }

    async fn collect(&self, season: Season) -> CycleOutcome {
        let ctx = self.context();
        let mut outcome = cycle::fetch_primary(&ctx, season).await;
        if outcome.online {
            let candidates = outcome.races.take().or_else(|| self.retained_live_races(season));
            if let Some(races) = candidates {
                outcome.races = Some(cycle::enrich(&ctx, season, races).await);
            }
        }
        outcome
    }

    /// The published race list, if it is live data for `season`.
    fn retained_live_races(&self, season: Season) -> Option<Vec<Race>> {
        let snapshot = self.snapshot();
        (snapshot.sources.races == Provenance::Live(season)).then(|| snapshot.races.clone())
    }

    /// Whether a cycle for `season` may still write to the published snapshot.
    fn is_current(&self, generation: u64, season: Season) -> bool {
        if season != *self.season.borrow() {
            debug!(generation, %season, "Discarding cycle for a deselected season");
            return false;
        }
        if generation < self.committed.load(Ordering::SeqCst) {
            debug!(generation, "Discarding cycle superseded by a newer commit");
            return false;
        }
        true
    }

    fn commit(&self, generation: u64, season: Season, outcome: CycleOutcome) {
        let committed = self.state.send_if_modified(|snapshot| {
            if !self.is_current(generation, season) {
                return false;
            }
            self.committed.store(generation, Ordering::SeqCst);
            Arc::make_mut(snapshot).apply(season, outcome);
            true
        });

        if committed {
            info!(generation, %season, "Refresh cycle committed");
        }
    }

    fn record_failure(&self, generation: u64, season: Season, message: String) {
        error!(generation, %season, %message, "Refresh cycle failed");
        self.state.send_if_modified(|snapshot| {
            if !self.is_current(generation, season) {
                return false;
            }
            Arc::make_mut(snapshot).error = Some(Notice::failure(message));
            true
        });
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        GENERIC_FAILURE.to_string()
    }
}

fn spawn_cycle(cycles: &mut JoinSet<()>, shared: &Arc<Shared>, season: Season) {
    let shared = Arc::clone(shared);
    cycles.spawn(async move { shared.run_cycle(season).await });
}

/// Background task: initial load, season changes, and periodic polling.
pub(crate) async fn worker_task(
    shared: Arc<Shared>,
    mut seasons: watch::Receiver<Season>,
    cancel: CancellationToken,
) {
    info!("Season worker started");
    let mut cycles = JoinSet::new();
    let period = shared.config.poll_interval();
    let mut poll = tokio::time::interval_at(Instant::now() + period, period);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let initial = *seasons.borrow_and_update();
    spawn_cycle(&mut cycles, &shared, initial);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Season worker cancelled");
                break;
            }
            changed = seasons.changed() => {
                if changed.is_err() {
                    debug!("Season selector dropped, shutting down");
                    break;
                }
                let season = *seasons.borrow_and_update();
                info!(%season, "Season changed, refreshing");
                poll.reset();
                spawn_cycle(&mut cycles, &shared, season);
            }
            _ = poll.tick() => {
                if shared.snapshot().is_online {
                    debug!("Auto-refreshing live data");
                    spawn_cycle(&mut cycles, &shared, shared.selected_season());
                } else {
                    trace!("Offline, skipping scheduled refresh");
                }
            }
            Some(joined) = cycles.join_next(), if !cycles.is_empty() => {
                if let Err(e) = joined {
                    if e.is_panic() {
                        error!("Refresh task panicked: {}", e);
                    }
                }
            }
        }
    }

    cycles.abort_all();
    while cycles.join_next().await.is_some() {}
    info!("Season worker stopped");
}
