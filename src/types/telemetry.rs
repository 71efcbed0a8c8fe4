//! Synthetic on-track records

use serde::{Deserialize, Serialize};

/// A simulated car telemetry sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct TelemetryData {
    pub driver: String,
    /// km/h
    pub speed: f64,
    /// Percent
    pub throttle: f64,
    /// Percent
    pub brake: f64,
    pub gear: u8,
    pub rpm: f64,
    pub drs: bool,
    pub lap: u32,
    pub sector: u8,
    pub team_color: String,
}

/// A simulated lap time for one driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct LapTime {
    pub lap: u32,
    pub driver: String,
    pub time_ms: f64,
    pub position: u32,
    pub team_color: String,
}
