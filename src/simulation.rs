//! Synthetic telemetry and lap times for visualization.
//!
//! Nothing here is sourced from the API. Values are random within plausible
//! ranges and exist purely so charts have something moving to draw.

use std::time::Duration;

use futures::{Stream, StreamExt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio_stream::wrappers::IntervalStream;

use crate::types::{Driver, LapTime, TelemetryData};

const TELEMETRY_DRIVERS: usize = 6;
const LAP_TIME_DRIVERS: usize = 8;

/// One telemetry sample for each of the leading drivers.
pub fn simulate_telemetry<R: Rng>(drivers: &[Driver], rng: &mut R) -> Vec<TelemetryData> {
    drivers
        .iter()
        .take(TELEMETRY_DRIVERS)
        .map(|driver| TelemetryData {
            driver: driver.name.clone(),
            speed: rng.gen_range(250.0..330.0),
            throttle: rng.gen_range(0.0..100.0),
            brake: rng.gen_range(0.0..100.0),
            gear: rng.gen_range(1..=8),
            rpm: rng.gen_range(8000.0..12000.0),
            drs: rng.gen_bool(0.3),
            lap: rng.gen_range(1..=60),
            sector: rng.gen_range(1..=3),
            team_color: driver.team_color.clone(),
        })
        .collect()
}

/// Lap-by-lap times for the leading drivers.
///
/// Each driver starts from a base time that grows by half a second per grid slot,
/// then accumulates tyre wear and sheds fuel weight as the laps count up.
pub fn simulate_lap_times<R: Rng>(
    drivers: &[Driver],
    laps: u32,
    rng: &mut R,
) -> Vec<LapTime> {
    let mut data = Vec::with_capacity(drivers.len().min(LAP_TIME_DRIVERS) * laps as usize);

    for (slot, driver) in drivers.iter().take(LAP_TIME_DRIVERS).enumerate() {
        let base = 90_000.0 + slot as f64 * 500.0;
        for lap in 1..=laps {
            let variation = rng.gen_range(-1000.0..1000.0);
            let tyre_wear = f64::from(lap) * 50.0;
            let fuel_effect = f64::from(60u32.saturating_sub(lap)) * 20.0;

            data.push(LapTime {
                lap,
                driver: driver.name.clone(),
                time_ms: base + variation + tyre_wear + fuel_effect,
                position: slot as u32 + 1,
                team_color: driver.team_color.clone(),
            });
        }
    }

    data
}

/// A stream that yields a fresh telemetry batch every `period`.
///
/// The first batch is emitted immediately.
pub fn telemetry_feed(
    drivers: Vec<Driver>,
    period: Duration,
) -> impl Stream<Item = Vec<TelemetryData>> + Send + 'static {
    let mut rng = StdRng::from_entropy();
    IntervalStream::new(tokio::time::interval(period))
        .map(move |_| simulate_telemetry(&drivers, &mut rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FallbackDataset;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn telemetry_stays_in_range() {
        let drivers = FallbackDataset::bundled().drivers;
        let samples = simulate_telemetry(&drivers, &mut seeded());

        assert_eq!(samples.len(), 6);
        for sample in &samples {
            assert!((250.0..330.0).contains(&sample.speed));
            assert!((1..=8).contains(&sample.gear));
            assert!((8000.0..12000.0).contains(&sample.rpm));
            assert!((1..=3).contains(&sample.sector));
        }
        assert_eq!(samples[0].driver, drivers[0].name);
    }

    #[test]
    fn lap_times_cover_top_eight() {
        let drivers = FallbackDataset::bundled().drivers;
        let laps = simulate_lap_times(&drivers, 60, &mut seeded());

        assert_eq!(laps.len(), 8 * 60);
        assert!(laps.iter().all(|lap| lap.position <= 8));
        let first = &laps[0];
        // base + fuel, within noise
        assert!((first.time_ms - (90_000.0 + 50.0 + 59.0 * 20.0)).abs() <= 1000.0);
    }

    #[test]
    fn short_driver_list_is_fine() {
        let drivers = FallbackDataset::bundled().drivers[..2].to_vec();
        assert_eq!(simulate_telemetry(&drivers, &mut seeded()).len(), 2);
        assert!(simulate_lap_times(&[], 10, &mut seeded()).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn feed_emits_per_period() {
        let drivers = FallbackDataset::bundled().drivers;
        let feed = telemetry_feed(drivers, Duration::from_millis(500));
        let batches: Vec<_> = feed.take(3).collect().await;

        assert_eq!(batches.len(), 3);
        assert!(batches.iter().all(|batch| batch.len() == 6));
    }
}
