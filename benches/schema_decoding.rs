//! Benchmarks for upstream payload decoding
//!
//! Tests decoding performance for:
//! - Driver and constructor standings, including roster pairing
//! - Season schedules and derived season statistics
//! - Race results and single-race enrichment
//!
//! Platform: Cross-platform (uses recorded payload fixtures, CI-safe)

use chrono::{TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use paddock::schema::{self, Rosters};
use paddock::test_utils::fixtures;
use std::hint::black_box;

fn bench_standings(c: &mut Criterion) {
    let mut group = c.benchmark_group("standings");

    group.bench_function("driver_standings", |b| {
        b.iter(|| {
            let drivers =
                schema::decode_driver_standings(black_box(fixtures::DRIVER_STANDINGS_2023.as_bytes()))
                    .unwrap();
            black_box(drivers)
        })
    });

    group.bench_function("rosters", |b| {
        b.iter(|| {
            let rosters =
                Rosters::decode(black_box(fixtures::DRIVER_STANDINGS_2023.as_bytes())).unwrap();
            black_box(rosters)
        })
    });

    let rosters = Rosters::decode(fixtures::DRIVER_STANDINGS_2023.as_bytes()).unwrap();
    group.bench_function("constructor_standings", |b| {
        b.iter(|| {
            let constructors = schema::decode_constructor_standings(
                black_box(fixtures::CONSTRUCTOR_STANDINGS_2023.as_bytes()),
                &rosters,
            )
            .unwrap();
            black_box(constructors)
        })
    });

    group.finish();
}

fn bench_races(c: &mut Criterion) {
    let mut group = c.benchmark_group("races");
    let now = Utc.with_ymd_and_hms(2023, 3, 20, 12, 0, 0).unwrap();

    group.bench_function("season_races", |b| {
        b.iter(|| {
            let races =
                schema::decode_season_races(black_box(fixtures::SEASON_RACES_2023.as_bytes()))
                    .unwrap();
            black_box(races)
        })
    });

    group.bench_function("season_stats", |b| {
        b.iter(|| {
            let stats =
                schema::decode_season_stats(black_box(fixtures::SEASON_RACES_2023.as_bytes()), now)
                    .unwrap();
            black_box(stats)
        })
    });

    group.bench_function("race_results", |b| {
        b.iter(|| {
            let results =
                schema::decode_race_results(black_box(fixtures::RACE_RESULTS_2023_R1.as_bytes()))
                    .unwrap();
            black_box(results)
        })
    });

    group.bench_function("race_with_results", |b| {
        b.iter(|| {
            let race = schema::decode_race_with_results(black_box(
                fixtures::RACE_RESULTS_2023_R1.as_bytes(),
            ))
            .unwrap();
            black_box(race)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_standings, bench_races);
criterion_main!(benches);
