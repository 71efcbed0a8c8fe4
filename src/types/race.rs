//! Calendar, result and season summary records

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder for race fields that are unknown until results are published.
pub const TBD: &str = "TBD";

/// A race weekend on the season calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct Race {
    /// Round number rendered as a string
    pub id: String,
    pub name: String,
    pub country: String,
    pub date: NaiveDate,
    pub round: u32,
    pub circuit: String,
    pub winner: String,
    pub winner_time: String,
    pub fastest_lap: String,
    pub fastest_lap_time: String,
}

impl Race {
    /// Whether the race date has started relative to `now` (midnight UTC).
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.date.and_time(NaiveTime::MIN).and_utc() < now
    }

    /// Whether results have been attached to this race.
    pub fn has_results(&self) -> bool {
        self.winner != TBD
    }
}

/// One classified finisher of a race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct RaceResult {
    pub position: u32,
    pub driver: String,
    pub team: String,
    /// Elapsed time, gap, or finishing status when no time was recorded
    pub time: String,
    pub points: u32,
    pub team_color: String,
}

/// Fastest lap of the season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct FastestLap {
    pub driver: String,
    pub time: String,
    pub race: String,
}

/// Season-level summary figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct SeasonStats {
    pub total_races: u32,
    pub completed_races: u32,
    /// Seconds
    pub avg_lap_time: f64,
    pub fastest_lap: FastestLap,
    /// Kilometres
    pub total_distance: u32,
}

/// Championship points for positions 1 through 10.
pub const POINTS_TABLE: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Points awarded for a finishing position; zero outside the top ten.
pub fn points_for_position(position: u32) -> u32 {
    position
        .checked_sub(1)
        .and_then(|index| POINTS_TABLE.get(index as usize))
        .copied()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn race_on(date: NaiveDate) -> Race {
        Race {
            id: "1".to_string(),
            name: "Bahrain Grand Prix".to_string(),
            country: "Bahrain".to_string(),
            date,
            round: 1,
            circuit: "Bahrain International Circuit".to_string(),
            winner: TBD.to_string(),
            winner_time: TBD.to_string(),
            fastest_lap: TBD.to_string(),
            fastest_lap_time: TBD.to_string(),
        }
    }

    #[test]
    fn race_day_counts_as_past_after_midnight_utc() {
        let race = race_on(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        let before = Utc.with_ymd_and_hms(2024, 3, 2, 23, 59, 59).unwrap();
        let during = Utc.with_ymd_and_hms(2024, 3, 3, 15, 0, 0).unwrap();

        assert!(!race.is_past(before));
        assert!(race.is_past(during));
        assert!(!race.has_results());
    }

    #[test]
    fn points_table_edges() {
        assert_eq!(points_for_position(0), 0);
        assert_eq!(points_for_position(1), 25);
        assert_eq!(points_for_position(10), 1);
        assert_eq!(points_for_position(11), 0);
    }

    #[test]
    fn race_date_serializes_iso() {
        let race = race_on(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        let json = serde_json::to_value(&race).unwrap();
        assert_eq!(json["date"], "2024-03-03");
        assert_eq!(json["winnerTime"], TBD);
    }
}
