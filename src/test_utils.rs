//! Test utilities: upstream payload fixtures, sample records, and a scripted gateway
//!
//! Shared by unit tests, integration tests, and benchmarks.

#![cfg(any(test, feature = "benchmark"))]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::types::{Constructor, Driver, Race, RaceResult, RoundRef, Season, SeasonStats};
use crate::Result;

/// Recorded upstream payloads, trimmed to a few entries each.
pub mod fixtures {
    pub const DRIVER_STANDINGS_2023: &str =
        include_str!("../tests/fixtures/driver_standings_2023.json");
    pub const CONSTRUCTOR_STANDINGS_2023: &str =
        include_str!("../tests/fixtures/constructor_standings_2023.json");
    /// A season with no races run yet
    pub const EMPTY_STANDINGS: &str = include_str!("../tests/fixtures/empty_standings.json");
    /// Rounds 1-3 of 2023 (5 March, 19 March, 2 April)
    pub const SEASON_RACES_2023: &str = include_str!("../tests/fixtures/season_races_2023.json");
    pub const RACE_RESULTS_2023_R1: &str =
        include_str!("../tests/fixtures/race_results_2023_r1.json");
    pub const RACE_WITHOUT_RESULTS: &str =
        include_str!("../tests/fixtures/race_without_results.json");
    /// A round that does not exist
    pub const EMPTY_RACES: &str = include_str!("../tests/fixtures/empty_races.json");
}

/// Live-looking records distinct from the bundled fallback.
pub mod sample {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::clock::FixedClock;
    use crate::types::{Constructor, Driver, FastestLap, Race, SeasonStats, TBD};

    pub fn driver(id: &str, name: &str, team: &str, position: u32, points: u32) -> Driver {
        Driver {
            id: id.to_string(),
            name: name.to_string(),
            team: team.to_string(),
            nationality: String::new(),
            number: None,
            points,
            wins: 0,
            podiums: 0,
            position,
            team_color: crate::types::team_color("red_bull").to_string(),
        }
    }

    pub fn live_drivers() -> Vec<Driver> {
        vec![
            driver("max_verstappen", "Max Verstappen", "Red Bull", 1, 575),
            driver("perez", "Sergio Pérez", "Red Bull", 2, 285),
        ]
    }

    pub fn live_constructors() -> Vec<Constructor> {
        vec![Constructor {
            id: "red_bull".to_string(),
            name: "Red Bull".to_string(),
            nationality: "Austrian".to_string(),
            points: 860,
            wins: 21,
            position: 1,
            color: crate::types::team_color("red_bull").to_string(),
            drivers: vec!["Max Verstappen".to_string(), "Sergio Pérez".to_string()],
        }]
    }

    pub fn race(round: u32, name: &str, date: (i32, u32, u32)) -> Race {
        Race {
            id: round.to_string(),
            name: name.to_string(),
            country: String::new(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            round,
            circuit: String::new(),
            winner: TBD.to_string(),
            winner_time: TBD.to_string(),
            fastest_lap: TBD.to_string(),
            fastest_lap_time: TBD.to_string(),
        }
    }

    /// Schedule-only rounds 1-3 of 2023.
    pub fn live_races() -> Vec<Race> {
        vec![
            race(1, "Bahrain Grand Prix", (2023, 3, 5)),
            race(2, "Saudi Arabian Grand Prix", (2023, 3, 19)),
            race(3, "Australian Grand Prix", (2023, 4, 2)),
        ]
    }

    /// Round `round` of [`live_races`] with results attached.
    pub fn enriched_race(round: u32) -> Race {
        let mut race = live_races()
            .into_iter()
            .find(|race| race.round == round)
            .unwrap_or_else(|| race(round, "Grand Prix", (2023, 3, 5)));
        race.winner = "Max Verstappen".to_string();
        race.winner_time = "1:33:56.736".to_string();
        race.fastest_lap = "Guanyu Zhou".to_string();
        race.fastest_lap_time = "1:36.546".to_string();
        race
    }

    pub fn live_stats() -> SeasonStats {
        SeasonStats {
            total_races: 24,
            completed_races: 2,
            avg_lap_time: 91.2,
            fastest_lap: FastestLap {
                driver: "Max Verstappen".to_string(),
                time: "1:19.828".to_string(),
                race: "Australian Grand Prix".to_string(),
            },
            total_distance: 610,
        }
    }

    /// Noon UTC on 20 March 2023: rounds 1 and 2 have run, round 3 has not.
    pub fn clock_2023_03_20() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2023, 3, 20, 12, 0, 0).unwrap())
    }
}

/// One scripted reply: wait `delay`, then answer with `reply` or fail.
#[derive(Debug, Clone)]
pub struct Step<T> {
    pub delay: Duration,
    pub reply: Option<T>,
}

/// Replies for one gateway operation.
///
/// Queued steps are consumed first; after that every call gets the standing reply.
#[derive(Debug)]
pub struct Script<T> {
    queue: Mutex<VecDeque<Step<T>>>,
    standing: Mutex<Step<T>>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    pub fn new(reply: Option<T>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            standing: Mutex::new(Step { delay: Duration::ZERO, reply }),
            calls: AtomicUsize::new(0),
        }
    }

    /// Replace the standing reply; `None` makes every call fail.
    pub fn set(&self, reply: Option<T>) {
        self.standing.lock().unwrap().reply = reply;
    }

    /// Delay every standing reply.
    pub fn set_delay(&self, delay: Duration) {
        self.standing.lock().unwrap().delay = delay;
    }

    /// Queue a one-shot reply.
    pub fn push(&self, delay: Duration, reply: Option<T>) {
        self.queue.lock().unwrap().push_back(Step { delay, reply });
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn next(&self, operation: &str) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let queued = self.queue.lock().unwrap().pop_front();
        let step = queued.unwrap_or_else(|| self.standing.lock().unwrap().clone());
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }
        step.reply.ok_or_else(|| GatewayError::unavailable(operation, "scripted failure"))
    }
}

/// Scripted reply for a single-race lookup.
#[derive(Debug, Clone)]
pub enum DetailReply {
    Found(Race),
    Missing,
    Fail,
}

/// In-memory [`Gateway`] whose replies are scripted per operation.
#[derive(Debug)]
pub struct ScriptedGateway {
    pub health: Script<bool>,
    pub drivers: Script<Vec<Driver>>,
    pub constructors: Script<Vec<Constructor>>,
    pub races: Script<Vec<Race>>,
    pub stats: Script<SeasonStats>,
    pub results: Script<Vec<RaceResult>>,
    details: Mutex<HashMap<u32, DetailReply>>,
    detail_calls: Mutex<Vec<u32>>,
    seasons: Mutex<Vec<Season>>,
    panic_on_standings: Mutex<Option<Season>>,
}

impl ScriptedGateway {
    /// Healthy gateway answering with [`sample`] data.
    pub fn online() -> Self {
        Self {
            health: Script::new(Some(true)),
            drivers: Script::new(Some(sample::live_drivers())),
            constructors: Script::new(Some(sample::live_constructors())),
            races: Script::new(Some(sample::live_races())),
            stats: Script::new(Some(sample::live_stats())),
            results: Script::new(None),
            details: Mutex::new(HashMap::new()),
            detail_calls: Mutex::new(Vec::new()),
            seasons: Mutex::new(Vec::new()),
            panic_on_standings: Mutex::new(None),
        }
    }

    /// Gateway whose health probe always fails.
    pub fn offline() -> Self {
        let gateway = Self::online();
        gateway.health.set(Some(false));
        gateway
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.health.set(Some(healthy));
    }

    pub fn set_detail(&self, round: u32, reply: DetailReply) {
        self.details.lock().unwrap().insert(round, reply);
    }

    /// Rounds passed to `race_with_results`, sorted.
    pub fn detail_calls(&self) -> Vec<u32> {
        let mut calls = self.detail_calls.lock().unwrap().clone();
        calls.sort_unstable();
        calls
    }

    /// Seasons requested from driver standings, in call order.
    pub fn seasons_requested(&self) -> Vec<Season> {
        self.seasons.lock().unwrap().clone()
    }

    /// Make `driver_standings` for `season` panic instead of answering.
    pub fn panic_on_standings(&self, season: Season) {
        *self.panic_on_standings.lock().unwrap() = Some(season);
    }
}

#[async_trait::async_trait]
impl Gateway for ScriptedGateway {
    async fn health(&self) -> bool {
        self.health.next("health").await.unwrap_or(false)
    }

    async fn driver_standings(&self, season: Season) -> Result<Vec<Driver>> {
        self.seasons.lock().unwrap().push(season);
        if *self.panic_on_standings.lock().unwrap() == Some(season) {
            panic!("standings decoder exploded");
        }
        self.drivers.next("driver_standings").await
    }

    async fn constructor_standings(&self, _season: Season) -> Result<Vec<Constructor>> {
        self.constructors.next("constructor_standings").await
    }

    async fn season_races(&self, _season: Season) -> Result<Vec<Race>> {
        self.races.next("season_races").await
    }

    async fn race_results(&self, _season: Season, _round: RoundRef) -> Result<Vec<RaceResult>> {
        self.results.next("race_results").await
    }

    async fn race_with_results(&self, _season: Season, round: RoundRef) -> Result<Option<Race>> {
        let number = match round {
            RoundRef::Number(number) => number,
            RoundRef::Last => 0,
        };
        self.detail_calls.lock().unwrap().push(number);
        let reply = self.details.lock().unwrap().get(&number).cloned();
        match reply.unwrap_or(DetailReply::Missing) {
            DetailReply::Found(race) => Ok(Some(race)),
            DetailReply::Missing => Ok(None),
            DetailReply::Fail => Err(GatewayError::unavailable("race_with_results", "scripted failure")),
        }
    }

    async fn season_stats(&self, _season: Season) -> Result<SeasonStats> {
        self.stats.next("season_stats").await
    }
}
