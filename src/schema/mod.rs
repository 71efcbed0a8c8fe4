//! # Upstream Payload Decoding
//!
//! This module validates and maps the Jolpica (Ergast-compatible) JSON schema family
//! onto the domain records in [`crate::types`]. Every endpoint has one decoder that
//! returns a tagged [`Result`], so a malformed or unexpectedly shaped payload is a
//! typed [`SchemaError`] rather than a panic or a silently empty list.
//!
//! ## Envelope
//!
//! Every response is wrapped in an `MRData` object carrying pagination metadata
//! next to exactly one table:
//!
//! ```text
//! { "MRData": { "limit": "30", "offset": "0", "total": "22",
//!               "StandingsTable": { "StandingsLists": [ ... ] } } }
//! ```
//!
//! [`Envelope`] models the wrapper generically and flattens the table into `T`.
//!
//! ## Numeric Fields
//!
//! Upstream encodes every number as a string. Integer fields use leading-integer
//! semantics, so half points such as `"12.5"` decode as `12`. A field with no
//! leading digits is a [`SchemaError::Shape`].
//!
//! ## Decoders
//!
//! | Endpoint | Decoder |
//! |---|---|
//! | `/{season}/driverStandings.json` | [`decode_driver_standings`] |
//! | `/{season}/constructorStandings.json` | [`decode_constructor_standings`] |
//! | `/{season}/races.json` | [`decode_season_races`], [`decode_season_stats`] |
//! | `/{season}/{round}/results.json` | [`decode_race_results`], [`decode_race_with_results`] |

use serde::Deserialize;

mod driver;
mod race;
mod standings;

pub use driver::{WireConstructor, WireDriver};
pub use race::{
    Circuit, ElapsedTime, LapClock, Location, RacePayload, RaceTable, WireFastestLap, WireRace,
    WireResult, decode_race_results, decode_race_with_results, decode_season_races,
    decode_season_stats,
};
pub use standings::{
    ConstructorStanding, DriverStanding, Rosters, StandingsList, StandingsPayload,
    StandingsTable, decode_constructor_standings, decode_driver_standings,
};

/// Error produced when an upstream payload does not match the expected schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected shape at {path}: {details}")]
    Shape { path: String, details: String },
}

impl SchemaError {
    /// Helper constructor for shape mismatches.
    pub fn shape(path: impl Into<String>, details: impl Into<String>) -> Self {
        SchemaError::Shape { path: path.into(), details: details.into() }
    }
}

/// The `MRData` wrapper shared by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "MRData")]
    pub mr_data: MrData<T>,
}

/// Pagination metadata plus the endpoint-specific table.
#[derive(Debug, Clone, Deserialize)]
pub struct MrData<T> {
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub total: Option<String>,
    #[serde(flatten)]
    pub table: T,
}

/// Parse a JSON body into an envelope around `T`.
pub(crate) fn parse_envelope<'de, T: Deserialize<'de>>(
    body: &'de [u8],
) -> Result<MrData<T>, SchemaError> {
    let envelope: Envelope<T> = serde_json::from_slice(body)?;
    Ok(envelope.mr_data)
}

/// Parse the leading integer of an upstream numeric string.
pub(crate) fn leading_int(path: &str, raw: &str) -> Result<u32, SchemaError> {
    let trimmed = raw.trim();
    let end = trimmed.find(|c: char| !c.is_ascii_digit()).unwrap_or(trimmed.len());
    trimmed[..end]
        .parse::<u32>()
        .map_err(|_| SchemaError::shape(path, format!("expected an integer, found '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn leading_int_truncates_fractions() {
        assert_eq!(leading_int("points", "12.5").unwrap(), 12);
        assert_eq!(leading_int("points", " 25 ").unwrap(), 25);
        assert!(leading_int("points", "").is_err());
        assert!(leading_int("position", "R").is_err());
    }

    #[test]
    fn malformed_json_is_a_typed_error() {
        let err = decode_season_races(b"<html>").unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    proptest! {
        #[test]
        fn leading_int_accepts_any_suffix(value in 0u32..100_000u32, suffix in "[.a-z ]{0,4}") {
            let raw = format!("{value}{suffix}");
            prop_assert_eq!(leading_int("field", &raw).unwrap(), value);
        }
    }
}
