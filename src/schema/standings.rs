//! Driver and constructor standings tables

use std::collections::HashMap;

use serde::Deserialize;

use super::{SchemaError, WireConstructor, WireDriver, leading_int, parse_envelope};
use crate::types::{Constructor, Driver, estimate_podiums, team_color};

#[derive(Debug, Clone, Deserialize)]
pub struct StandingsPayload {
    #[serde(rename = "StandingsTable")]
    pub standings_table: StandingsTable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandingsTable {
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(rename = "StandingsLists", default)]
    pub standings_lists: Vec<StandingsList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandingsList {
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(rename = "DriverStandings", default)]
    pub driver_standings: Vec<DriverStanding>,
    #[serde(rename = "ConstructorStandings", default)]
    pub constructor_standings: Vec<ConstructorStanding>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverStanding {
    /// Absent for drivers upstream has not classified yet
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub position_text: Option<String>,
    pub points: String,
    pub wins: String,
    #[serde(rename = "Driver")]
    pub driver: WireDriver,
    #[serde(rename = "Constructors", default)]
    pub constructors: Vec<WireConstructor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorStanding {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub position_text: Option<String>,
    pub points: String,
    pub wins: String,
    #[serde(rename = "Constructor")]
    pub constructor: WireConstructor,
}

fn first_list(body: &[u8]) -> Result<Option<StandingsList>, SchemaError> {
    let data = parse_envelope::<StandingsPayload>(body)?;
    Ok(data.table.standings_table.standings_lists.into_iter().next())
}

/// Ranked position, falling back to list order when upstream omits it.
fn rank(path: &str, position: Option<&str>, index: usize) -> Result<u32, SchemaError> {
    match position {
        Some(raw) => leading_int(path, raw),
        None => Ok(index as u32 + 1),
    }
}

impl DriverStanding {
    fn to_driver(&self, index: usize) -> Result<Driver, SchemaError> {
        let wins = leading_int("DriverStandings.wins", &self.wins)?;
        let team = self.constructors.first();
        Ok(Driver {
            id: self.driver.driver_id.clone(),
            name: self.driver.full_name(),
            team: team.map(|c| c.name.clone()).unwrap_or_else(|| "Unknown".to_string()),
            nationality: self.driver.nationality.clone().unwrap_or_default(),
            number: self.driver.number()?,
            points: leading_int("DriverStandings.points", &self.points)?,
            wins,
            podiums: estimate_podiums(wins),
            position: rank("DriverStandings.position", self.position.as_deref(), index)?,
            team_color: team.map_or(crate::types::NEUTRAL_COLOR, |c| team_color(&c.constructor_id))
                .to_string(),
        })
    }
}

/// Decode `/{season}/driverStandings.json`.
///
/// Fails when the first standings list is missing or empty.
pub fn decode_driver_standings(body: &[u8]) -> Result<Vec<Driver>, SchemaError> {
    let list = first_list(body)?
        .ok_or_else(|| SchemaError::shape("StandingsTable.StandingsLists", "no standings list"))?;
    if list.driver_standings.is_empty() {
        return Err(SchemaError::shape("StandingsLists[0].DriverStandings", "empty standings"));
    }
    list.driver_standings.iter().enumerate().map(|(index, entry)| entry.to_driver(index)).collect()
}

/// Driver rosters per constructor id, derived from the season's driver standings.
///
/// A driver who raced for several constructors in one season is listed under each
/// of them. Names keep championship order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rosters {
    by_constructor: HashMap<String, Vec<String>>,
}

impl Rosters {
    /// Build rosters from a driver standings payload.
    ///
    /// An empty standings table (no race run yet) produces empty rosters.
    pub fn decode(body: &[u8]) -> Result<Self, SchemaError> {
        let mut rosters = Rosters::default();
        let Some(list) = first_list(body)? else {
            return Ok(rosters);
        };
        for entry in &list.driver_standings {
            let name = entry.driver.full_name();
            for constructor in &entry.constructors {
                let roster =
                    rosters.by_constructor.entry(constructor.constructor_id.clone()).or_default();
                if !roster.contains(&name) {
                    roster.push(name.clone());
                }
            }
        }
        Ok(rosters)
    }

    pub fn drivers_for(&self, constructor_id: &str) -> &[String] {
        self.by_constructor.get(constructor_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Decode `/{season}/constructorStandings.json`, attaching drivers from `rosters`.
pub fn decode_constructor_standings(
    body: &[u8],
    rosters: &Rosters,
) -> Result<Vec<Constructor>, SchemaError> {
    let list = first_list(body)?
        .ok_or_else(|| SchemaError::shape("StandingsTable.StandingsLists", "no standings list"))?;
    if list.constructor_standings.is_empty() {
        return Err(SchemaError::shape("StandingsLists[0].ConstructorStandings", "empty standings"));
    }
    list.constructor_standings
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let id = &entry.constructor.constructor_id;
            Ok(Constructor {
                id: id.clone(),
                name: entry.constructor.name.clone(),
                nationality: entry.constructor.nationality.clone().unwrap_or_default(),
                points: leading_int("ConstructorStandings.points", &entry.points)?,
                wins: leading_int("ConstructorStandings.wins", &entry.wins)?,
                position: rank("ConstructorStandings.position", entry.position.as_deref(), index)?,
                color: team_color(id).to_string(),
                drivers: rosters.drivers_for(id).to_vec(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn driver_standings_map_to_ranked_drivers() {
        let drivers = decode_driver_standings(fixtures::DRIVER_STANDINGS_2023.as_bytes()).unwrap();

        assert_eq!(drivers.len(), 4);
        assert_eq!(drivers[0].id, "max_verstappen");
        assert_eq!(drivers[0].name, "Max Verstappen");
        assert_eq!(drivers[0].team, "Red Bull");
        assert_eq!(drivers[0].team_color, "#1E3A8A");
        assert_eq!(drivers[0].podiums, 34);
        assert_eq!(drivers[0].number, Some(33));
        let positions: Vec<u32> = drivers.iter().map(|d| d.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn unmapped_constructor_uses_neutral_color() {
        let drivers = decode_driver_standings(fixtures::DRIVER_STANDINGS_2023.as_bytes()).unwrap();
        let de_vries = drivers.iter().find(|d| d.id == "de_vries").unwrap();
        assert_eq!(de_vries.team_color, crate::types::NEUTRAL_COLOR);
    }

    #[test]
    fn empty_standings_list_is_a_shape_error() {
        let err = decode_driver_standings(fixtures::EMPTY_STANDINGS.as_bytes()).unwrap_err();
        assert!(matches!(err, SchemaError::Shape { .. }));
    }

    #[test]
    fn rosters_follow_actual_pairings() {
        let rosters = Rosters::decode(fixtures::DRIVER_STANDINGS_2023.as_bytes()).unwrap();
        assert_eq!(rosters.drivers_for("red_bull"), ["Max Verstappen", "Sergio Pérez"]);
        assert_eq!(rosters.drivers_for("mercedes"), ["Lewis Hamilton"]);
        assert!(rosters.drivers_for("williams").is_empty());
    }

    #[test]
    fn constructor_standings_attach_rosters() {
        let rosters = Rosters::decode(fixtures::DRIVER_STANDINGS_2023.as_bytes()).unwrap();
        let constructors = decode_constructor_standings(
            fixtures::CONSTRUCTOR_STANDINGS_2023.as_bytes(),
            &rosters,
        )
        .unwrap();

        assert_eq!(constructors.len(), 3);
        assert_eq!(constructors[0].id, "red_bull");
        assert_eq!(constructors[0].points, 860);
        assert_eq!(constructors[0].drivers, vec!["Max Verstappen", "Sergio Pérez"]);
        assert_eq!(constructors[1].drivers, vec!["Lewis Hamilton"]);
        assert_eq!(constructors[2].position, 3);
    }

    #[test]
    fn rosters_tolerate_empty_season() {
        let rosters = Rosters::decode(fixtures::EMPTY_STANDINGS.as_bytes()).unwrap();
        assert_eq!(rosters, Rosters::default());
    }
}
