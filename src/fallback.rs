//! Bundled sample dataset used when live data is unavailable.
//!
//! The dataset mirrors the shapes produced by the live gateway exactly, so the
//! service can substitute it field by field without special cases.

use chrono::NaiveDate;

use crate::types::{
    Constructor, Driver, FastestLap, Race, RaceResult, RoundRef, SeasonStats, points_for_position,
};

const RED_BULL: &str = "#1E3A8A";
const MERCEDES: &str = "#00D2BE";
const FERRARI: &str = "#DC2626";
const MCLAREN: &str = "#F97316";
const ASTON_MARTIN: &str = "#16A34A";

/// Finishing time shown for the winner of every synthesized result.
const WINNER_TIME: &str = "1:31:44.742";
/// Synthesized gap between consecutive finishers, in seconds.
const GAP_SECS: f64 = 12.5;

/// Static season data served while the live API is unreachable.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackDataset {
    pub drivers: Vec<Driver>,
    pub constructors: Vec<Constructor>,
    pub races: Vec<Race>,
    pub season_stats: SeasonStats,
}

impl Default for FallbackDataset {
    fn default() -> Self {
        Self::bundled()
    }
}

impl FallbackDataset {
    /// The bundled 2024 sample data.
    pub fn bundled() -> Self {
        Self {
            drivers: bundled_drivers(),
            constructors: bundled_constructors(),
            races: bundled_races(),
            season_stats: SeasonStats {
                total_races: 24,
                completed_races: 5,
                avg_lap_time: 91.2,
                fastest_lap: FastestLap {
                    driver: "Oscar Piastri".to_string(),
                    time: "1:19.828".to_string(),
                    race: "Australian Grand Prix".to_string(),
                },
                total_distance: 19840,
            },
        }
    }

    /// Synthesized classification for any round.
    ///
    /// The top ten fallback drivers finish in standings order with the standard
    /// points table; the round does not influence the result.
    pub fn race_results(&self, _round: RoundRef) -> Vec<RaceResult> {
        self.drivers
            .iter()
            .take(10)
            .enumerate()
            .map(|(index, driver)| {
                let position = index as u32 + 1;
                RaceResult {
                    position,
                    driver: driver.name.clone(),
                    team: driver.team.clone(),
                    time: if index == 0 {
                        WINNER_TIME.to_string()
                    } else {
                        format!("+{:.3}", index as f64 * GAP_SECS)
                    },
                    points: points_for_position(position),
                    team_color: driver.team_color.clone(),
                }
            })
            .collect()
    }

    /// Look up a bundled race by round; [`RoundRef::Last`] is the final bundled race.
    pub fn race(&self, round: RoundRef) -> Option<Race> {
        match round {
            RoundRef::Number(number) => {
                let id = number.to_string();
                self.races.iter().find(|race| race.id == id).cloned()
            }
            RoundRef::Last => self.races.last().cloned(),
        }
    }
}

struct DriverSeed {
    name: &'static str,
    team: &'static str,
    nationality: &'static str,
    number: u32,
    points: u32,
    wins: u32,
    podiums: u32,
    color: &'static str,
}

const DRIVERS: [DriverSeed; 10] = [
    DriverSeed { name: "Max Verstappen", team: "Red Bull Racing", nationality: "Netherlands", number: 1, points: 575, wins: 19, podiums: 21, color: RED_BULL },
    DriverSeed { name: "Sergio Pérez", team: "Red Bull Racing", nationality: "Mexico", number: 11, points: 285, wins: 2, podiums: 8, color: RED_BULL },
    DriverSeed { name: "Lewis Hamilton", team: "Mercedes", nationality: "United Kingdom", number: 44, points: 234, wins: 3, podiums: 7, color: MERCEDES },
    DriverSeed { name: "Fernando Alonso", team: "Aston Martin", nationality: "Spain", number: 14, points: 206, wins: 1, podiums: 8, color: ASTON_MARTIN },
    DriverSeed { name: "Carlos Sainz Jr.", team: "Ferrari", nationality: "Spain", number: 55, points: 200, wins: 1, podiums: 6, color: FERRARI },
    DriverSeed { name: "George Russell", team: "Mercedes", nationality: "United Kingdom", number: 63, points: 175, wins: 1, podiums: 4, color: MERCEDES },
    DriverSeed { name: "Charles Leclerc", team: "Ferrari", nationality: "Monaco", number: 16, points: 165, wins: 2, podiums: 5, color: FERRARI },
    DriverSeed { name: "Lando Norris", team: "McLaren", nationality: "United Kingdom", number: 4, points: 115, wins: 0, podiums: 3, color: MCLAREN },
    DriverSeed { name: "Lance Stroll", team: "Aston Martin", nationality: "Canada", number: 18, points: 74, wins: 0, podiums: 1, color: ASTON_MARTIN },
    DriverSeed { name: "Oscar Piastri", team: "McLaren", nationality: "Australia", number: 81, points: 97, wins: 0, podiums: 2, color: MCLAREN },
];

fn bundled_drivers() -> Vec<Driver> {
    DRIVERS
        .iter()
        .enumerate()
        .map(|(index, seed)| Driver {
            id: (index + 1).to_string(),
            name: seed.name.to_string(),
            team: seed.team.to_string(),
            nationality: seed.nationality.to_string(),
            number: Some(seed.number),
            points: seed.points,
            wins: seed.wins,
            podiums: seed.podiums,
            position: index as u32 + 1,
            team_color: seed.color.to_string(),
        })
        .collect()
}

fn bundled_constructors() -> Vec<Constructor> {
    let seeds: [(&str, &str, u32, u32, &str, [&str; 2]); 5] = [
        ("Red Bull Racing", "Austria", 860, 21, RED_BULL, ["Max Verstappen", "Sergio Pérez"]),
        ("Mercedes", "Germany", 409, 4, MERCEDES, ["Lewis Hamilton", "George Russell"]),
        ("Ferrari", "Italy", 365, 3, FERRARI, ["Charles Leclerc", "Carlos Sainz Jr."]),
        ("Aston Martin", "United Kingdom", 280, 1, ASTON_MARTIN, ["Fernando Alonso", "Lance Stroll"]),
        ("McLaren", "United Kingdom", 212, 0, MCLAREN, ["Lando Norris", "Oscar Piastri"]),
    ];
    seeds
        .iter()
        .enumerate()
        .map(|(index, (name, nationality, points, wins, color, drivers))| Constructor {
            id: (index + 1).to_string(),
            name: name.to_string(),
            nationality: nationality.to_string(),
            points: *points,
            wins: *wins,
            position: index as u32 + 1,
            color: color.to_string(),
            drivers: drivers.iter().map(|d| d.to_string()).collect(),
        })
        .collect()
}

fn bundled_races() -> Vec<Race> {
    let seeds: [(&str, &str, (i32, u32, u32), &str, &str, &str, &str, &str); 5] = [
        ("Bahrain Grand Prix", "Bahrain", (2024, 3, 3), "Bahrain International Circuit", "Max Verstappen", "1:31:44.742", "Charles Leclerc", "1:30.252"),
        ("Saudi Arabian Grand Prix", "Saudi Arabia", (2024, 3, 17), "Jeddah Corniche Circuit", "Max Verstappen", "1:20:43.273", "Lewis Hamilton", "1:29.734"),
        ("Australian Grand Prix", "Australia", (2024, 3, 31), "Albert Park Circuit", "Carlos Sainz Jr.", "1:20:26.843", "Oscar Piastri", "1:19.828"),
        ("Japanese Grand Prix", "Japan", (2024, 4, 14), "Suzuka Circuit", "Max Verstappen", "1:54:23.566", "Lewis Hamilton", "1:30.983"),
        ("Chinese Grand Prix", "China", (2024, 4, 28), "Shanghai International Circuit", "Max Verstappen", "1:40:52.554", "Fernando Alonso", "1:32.947"),
    ];
    seeds
        .iter()
        .enumerate()
        .map(|(index, (name, country, (y, m, d), circuit, winner, winner_time, fastest, fastest_time))| {
            let round = index as u32 + 1;
            Race {
                id: round.to_string(),
                name: name.to_string(),
                country: country.to_string(),
                date: NaiveDate::from_ymd_opt(*y, *m, *d).unwrap_or_default(),
                round,
                circuit: circuit.to_string(),
                winner: winner.to_string(),
                winner_time: winner_time.to_string(),
                fastest_lap: fastest.to_string(),
                fastest_lap_time: fastest_time.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bundled_rankings_are_dense_and_ids_unique() {
        let data = FallbackDataset::bundled();

        let positions: Vec<u32> = data.drivers.iter().map(|d| d.position).collect();
        assert_eq!(positions, (1..=10).collect::<Vec<_>>());
        let mut ids: Vec<&str> = data.constructors.iter().map(|c| c.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), data.constructors.len());
        assert!(data.races.windows(2).all(|pair| pair[0].round < pair[1].round));
    }

    #[test]
    fn synthesized_results_follow_points_table() {
        let results = FallbackDataset::bundled().race_results(RoundRef::Number(3));

        assert_eq!(results.len(), 10);
        assert_eq!(results[0].time, "1:31:44.742");
        assert_eq!(results[1].time, "+12.500");
        assert_eq!(results[9].time, "+112.500");
        let points: Vec<u32> = results.iter().map(|r| r.points).collect();
        assert_eq!(points, vec![25, 18, 15, 12, 10, 8, 6, 4, 2, 1]);
    }

    #[test]
    fn race_lookup_by_round() {
        let data = FallbackDataset::bundled();
        assert_eq!(data.race(RoundRef::Number(2)).unwrap().name, "Saudi Arabian Grand Prix");
        assert_eq!(data.race(RoundRef::Last).unwrap().name, "Chinese Grand Prix");
        assert!(data.race(RoundRef::Number(23)).is_none());
    }

    proptest! {
        #[test]
        fn results_ignore_the_round(round in 1u32..64u32) {
            let data = FallbackDataset::bundled();
            prop_assert_eq!(data.race_results(RoundRef::Number(round)), data.race_results(RoundRef::Last));
            let positions: Vec<u32> = data.race_results(RoundRef::Number(round)).iter().map(|r| r.position).collect();
            prop_assert_eq!(positions, (1..=10).collect::<Vec<_>>());
        }
    }
}
