//! Core domain records for season data.
//!
//! Every record here is an immutable value produced either by mapping an upstream
//! payload (see [`crate::schema`]) or by the bundled fallback dataset
//! (see [`crate::fallback`]). Both sources produce exactly the same shapes, so
//! consumers never need to know which one populated a field.
//!
//! ## Records
//!
//! - [`Driver`] and [`Constructor`] carry championship standings
//! - [`Race`] is a calendar entry, optionally enriched with its winner and fastest lap
//! - [`RaceResult`] is one classified finisher
//! - [`SeasonStats`] summarizes the season so far
//! - [`TelemetryData`] and [`LapTime`] are synthetic records for visualization
//!
//! ## Selectors
//!
//! [`Season`] and [`RoundRef`] address upstream endpoints and render exactly as
//! the upstream path segments (`current`, `2023`, `last`, `5`).
//!
//! ```rust
//! use paddock::types::{RoundRef, Season};
//!
//! let season: Season = "2023".parse().unwrap();
//! assert_eq!(season.to_string(), "2023");
//! assert_eq!(RoundRef::default().to_string(), "last");
//! ```

mod race;
mod season;
mod standings;
mod team;
mod telemetry;

pub use race::{FastestLap, POINTS_TABLE, Race, RaceResult, SeasonStats, TBD, points_for_position};
pub use season::{RoundRef, Season, SelectorError};
pub use standings::{Constructor, Driver, estimate_podiums};
pub use team::{NEUTRAL_COLOR, team_color};
pub use telemetry::{LapTime, TelemetryData};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn season_display_round_trips(year in 1950u16..2100u16) {
            let season = Season::Year(year);
            let parsed: Season = season.to_string().parse().unwrap();
            prop_assert_eq!(parsed, season);
        }

        #[test]
        fn round_display_round_trips(round in 1u32..40u32) {
            let parsed: RoundRef = RoundRef::Number(round).to_string().parse().unwrap();
            prop_assert_eq!(parsed, RoundRef::Number(round));
        }

        #[test]
        fn points_never_exceed_winner(position in 0u32..100u32) {
            let points = points_for_position(position);
            prop_assert!(points <= POINTS_TABLE[0]);
            if position > 10 || position == 0 {
                prop_assert_eq!(points, 0);
            }
        }
    }
}
