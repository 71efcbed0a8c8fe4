//! Published service state

use serde::{Deserialize, Serialize};

use super::cycle::CycleOutcome;
use crate::fallback::FallbackDataset;
use crate::types::{Constructor, Driver, Race, Season, SeasonStats};

/// Advisory shown while the live API is unreachable.
pub const OFFLINE_ADVISORY: &str = "Live data temporarily unavailable. Showing demo data.";

/// Where a field's current value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "season")]
pub enum Provenance {
    Fallback,
    Live(Season),
}

/// Per-field provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sources {
    pub drivers: Provenance,
    pub constructors: Provenance,
    pub races: Provenance,
    pub season_stats: Provenance,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            drivers: Provenance::Fallback,
            constructors: Provenance::Fallback,
            races: Provenance::Fallback,
            season_stats: Provenance::Fallback,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    /// Non-fatal, expected condition such as running on demo data
    Advisory,
    /// A refresh cycle failed unexpectedly
    Failure,
}

/// User-facing message attached to the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn advisory(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Advisory, message: message.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Failure, message: message.into() }
    }

    pub fn is_advisory(&self) -> bool {
        self.kind == NoticeKind::Advisory
    }
}

/// Read-only view of the season dataset and service status.
///
/// Snapshots are replaced wholesale on every commit; holders of an older
/// `Arc<SeasonSnapshot>` keep seeing the values they were handed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSnapshot {
    pub drivers: Vec<Driver>,
    pub constructors: Vec<Constructor>,
    pub races: Vec<Race>,
    pub season_stats: SeasonStats,
    /// True while any refresh cycle is in flight
    pub is_loading: bool,
    pub error: Option<Notice>,
    pub is_online: bool,
    pub selected_season: Season,
    pub sources: Sources,
}

impl SeasonSnapshot {
    /// Snapshot shown before the first cycle completes.
    pub(crate) fn initial(fallback: &FallbackDataset, season: Season) -> Self {
        Self {
            drivers: fallback.drivers.clone(),
            constructors: fallback.constructors.clone(),
            races: fallback.races.clone(),
            season_stats: fallback.season_stats.clone(),
            is_loading: true,
            error: None,
            is_online: false,
            selected_season: season,
            sources: Sources::default(),
        }
    }

    /// Reconcile a finished cycle into this snapshot, one field at a time.
    pub(crate) fn apply(&mut self, season: Season, outcome: CycleOutcome) {
        self.is_online = outcome.online;
        if !outcome.online {
            self.error = Some(Notice::advisory(OFFLINE_ADVISORY));
            return;
        }
        self.error = None;

        let live = Provenance::Live(season);
        if let Some(drivers) = outcome.drivers {
            self.drivers = drivers;
            self.sources.drivers = live;
        }
        if let Some(constructors) = outcome.constructors {
            self.constructors = constructors;
            self.sources.constructors = live;
        }
        if let Some(races) = outcome.races {
            self.races = races;
            self.sources.races = live;
        }
        if let Some(stats) = outcome.season_stats {
            self.season_stats = stats;
            self.sources.season_stats = live;
        }
    }
}
