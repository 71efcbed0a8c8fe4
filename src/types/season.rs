//! Season and round selectors used to address upstream endpoints

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A championship season, either a literal year or the upstream "current" alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Season {
    /// Whatever season the upstream API considers current
    #[default]
    Current,
    /// A specific championship year
    Year(u16),
}

/// Error returned when a season or round selector cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} selector '{input}'")]
pub struct SelectorError {
    kind: &'static str,
    input: String,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Current => f.write_str("current"),
            Season::Year(year) => write!(f, "{year}"),
        }
    }
}

impl FromStr for Season {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("current") {
            return Ok(Season::Current);
        }
        trimmed
            .parse::<u16>()
            .map(Season::Year)
            .map_err(|_| SelectorError { kind: "season", input: s.to_string() })
    }
}

impl From<Season> for String {
    fn from(season: Season) -> Self {
        season.to_string()
    }
}

impl TryFrom<String> for Season {
    type Error = SelectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A round within a season: a 1-based calendar position or the most recent race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RoundRef {
    Number(u32),
    /// The latest race with results
    #[default]
    Last,
}

impl fmt::Display for RoundRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundRef::Number(round) => write!(f, "{round}"),
            RoundRef::Last => f.write_str("last"),
        }
    }
}

impl FromStr for RoundRef {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("last") {
            return Ok(RoundRef::Last);
        }
        match trimmed.parse::<u32>() {
            Ok(round) if round > 0 => Ok(RoundRef::Number(round)),
            _ => Err(SelectorError { kind: "round", input: s.to_string() }),
        }
    }
}

impl From<u32> for RoundRef {
    fn from(round: u32) -> Self {
        RoundRef::Number(round)
    }
}

impl From<RoundRef> for String {
    fn from(round: RoundRef) -> Self {
        round.to_string()
    }
}

impl TryFrom<String> for RoundRef {
    type Error = SelectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_parses_current_alias_and_years() {
        assert_eq!("current".parse::<Season>(), Ok(Season::Current));
        assert_eq!("Current".parse::<Season>(), Ok(Season::Current));
        assert_eq!("2023".parse::<Season>(), Ok(Season::Year(2023)));
        assert!("twenty".parse::<Season>().is_err());
    }

    #[test]
    fn round_rejects_zero() {
        assert!("0".parse::<RoundRef>().is_err());
        assert_eq!("last".parse::<RoundRef>(), Ok(RoundRef::Last));
        assert_eq!("7".parse::<RoundRef>(), Ok(RoundRef::Number(7)));
    }

    #[test]
    fn selectors_serialize_as_strings() {
        assert_eq!(serde_json::to_string(&Season::Year(2021)).unwrap(), "\"2021\"");
        assert_eq!(serde_json::to_string(&RoundRef::Last).unwrap(), "\"last\"");
        let season: Season = serde_json::from_str("\"current\"").unwrap();
        assert_eq!(season, Season::Current);
    }
}
