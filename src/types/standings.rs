//! Championship standings records

use serde::{Deserialize, Serialize};

/// A driver's cumulative championship record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    /// Team the driver currently races for
    pub team: String,
    pub nationality: String,
    /// Permanent car number; historic drivers may not have one
    pub number: Option<u32>,
    pub points: u32,
    pub wins: u32,
    /// Estimated from wins when sourced from the live API
    pub podiums: u32,
    pub position: u32,
    pub team_color: String,
}

/// A constructor's cumulative championship record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    pub id: String,
    pub name: String,
    pub nationality: String,
    pub points: u32,
    pub wins: u32,
    pub position: u32,
    pub color: String,
    /// Driver names in championship order
    pub drivers: Vec<String>,
}

/// Podium estimate used when only a win count is known.
pub fn estimate_podiums(wins: u32) -> u32 {
    (f64::from(wins) * 1.8).floor() as u32
}
