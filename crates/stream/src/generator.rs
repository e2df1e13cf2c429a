use pulse_core::Sample;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::f64::consts::TAU;

/// Whether a generated sample carries the time-correlated sinusoidal drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulation {
    /// Plain uniform noise, used for the backfilled history.
    Flat,
    /// Uniform noise plus a slow sine / cosine wave keyed on the timestamp.
    Sinusoidal,
}

/// Day labels for the heatmap rows, Monday first.
pub const HEATMAP_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
/// Upper bound of the heatmap colour domain.
pub const HEATMAP_MAX: f64 = 130.0;

/// One heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatCell {
    /// Index into [`HEATMAP_DAYS`].
    pub day:   u8,
    pub hour:  u8,
    pub value: f64,
}

/// Synthetic response-time heatmap: 7 days × 24 hours, row-major by day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub cells: Vec<HeatCell>,
}

impl Heatmap {
    pub fn get(&self, day: u8, hour: u8) -> Option<&HeatCell> {
        self.cells.get(usize::from(day) * 24 + usize::from(hour))
    }
}

/// Produces synthetic metric samples from an injected random source.
///
/// The generator is a pure function of its inputs: the caller supplies the
/// timestamp and owns the RNG, so seeding the RNG makes output reproducible.
#[derive(Debug, Clone)]
pub struct SampleGenerator<R = StdRng> {
    rng: R,
}

impl SampleGenerator<StdRng> {
    /// Seeded generator when `seed` is set, OS entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> SampleGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Live sample at `t` (milliseconds since epoch), with drift.
    pub fn generate(&mut self, t: i64) -> Sample {
        self.sample_at(t, Modulation::Sinusoidal)
    }

    /// Backfill sample at `t`, without drift.
    pub fn historical(&mut self, t: i64) -> Sample {
        self.sample_at(t, Modulation::Flat)
    }

    pub fn sample_at(&mut self, t: i64, modulation: Modulation) -> Sample {
        let x = t as f64;
        let wave = |amplitude: f64, phase: f64| match modulation {
            Modulation::Flat       => 0.0,
            Modulation::Sinusoidal => amplitude * phase,
        };

        let users         = f64::from(self.rng.gen_range(500u32..1500)) + wave(200.0, (x / 10_000.0).sin());
        let revenue       = self.rng.gen_range(1_000.0..6_000.0) + wave(1_000.0, (x / 15_000.0).cos());
        let connections   = f64::from(self.rng.gen_range(100u32..300)) + wave(50.0, (x / 8_000.0).sin());
        let throughput    = f64::from(self.rng.gen_range(500u32..1500)) + wave(300.0, (x / 12_000.0).cos());
        let errors        = self.rng.gen_range(0u32..10);
        let response_time = self.rng.gen_range(50.0..250.0) + wave(30.0, (x / 5_000.0).sin());

        Sample {
            timestamp: t,
            users: to_count(users),
            revenue: to_amount(revenue),
            connections: to_count(connections),
            throughput: to_count(throughput),
            errors,
            response_time: to_amount(response_time),
        }
    }

    /// Per-tick drift for the headline counters: `(users, revenue)` with
    /// users in `-5..5` and revenue in `[-50, 50)`.
    pub fn counter_drift(&mut self) -> (i64, f64) {
        (self.rng.gen_range(-5i64..5), self.rng.gen_range(-50.0..50.0))
    }

    /// Fresh heatmap: `uniform[0, 100) + 30·sin(hour / 24 · 2π)` per cell.
    pub fn heatmap(&mut self) -> Heatmap {
        let mut cells = Vec::with_capacity(HEATMAP_DAYS.len() * 24);
        for day in 0..HEATMAP_DAYS.len() as u8 {
            for hour in 0..24u8 {
                let diurnal = (f64::from(hour) / 24.0 * TAU).sin() * 30.0;
                let value = self.rng.gen_range(0.0..100.0) + diurnal;
                cells.push(HeatCell { day, hour, value });
            }
        }
        Heatmap { cells }
    }
}

/// Round to a non-negative integer count.
fn to_count(value: f64) -> u32 {
    if value.is_finite() {
        value.round().max(0.0) as u32
    } else {
        0
    }
}

/// Clamp to a non-negative finite amount.
fn to_amount(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_in_bounds(s: &Sample) {
        assert!((300..=1700).contains(&s.users), "users {}", s.users);
        assert!(s.revenue.is_finite() && (0.0..=7_000.0).contains(&s.revenue));
        assert!((50..=350).contains(&s.connections), "connections {}", s.connections);
        assert!((200..=1800).contains(&s.throughput), "throughput {}", s.throughput);
        assert!(s.errors < 10);
        assert!(s.response_time.is_finite() && (20.0..=280.0).contains(&s.response_time));
    }

    #[test]
    fn same_seed_same_output() {
        let mut a = SampleGenerator::from_seed(Some(42));
        let mut b = SampleGenerator::from_seed(Some(42));
        for t in [0, 1_000, 2_000, 1_700_000_000_000] {
            assert_eq!(a.generate(t), b.generate(t));
        }
    }

    #[test]
    fn timestamp_is_passed_through() {
        let mut generator = SampleGenerator::from_seed(Some(1));
        assert_eq!(generator.generate(123_456).timestamp, 123_456);
        assert_eq!(generator.historical(-60_000).timestamp, -60_000);
    }

    #[test]
    fn historical_samples_use_flat_ranges() {
        let mut generator = SampleGenerator::from_seed(Some(9));
        for i in 0..500 {
            let s = generator.historical(i * 60_000);
            assert!((500..1500).contains(&s.users));
            assert!((1_000.0..6_000.0).contains(&s.revenue));
            assert!((100..300).contains(&s.connections));
            assert!((500..1500).contains(&s.throughput));
            assert!((50.0..250.0).contains(&s.response_time));
        }
    }

    #[test]
    fn counter_drift_is_bounded() {
        let mut generator = SampleGenerator::from_seed(Some(3));
        for _ in 0..1_000 {
            let (users, revenue) = generator.counter_drift();
            assert!((-5..5).contains(&users));
            assert!((-50.0..50.0).contains(&revenue));
        }
    }

    #[test]
    fn heatmap_is_seven_by_twenty_four() {
        let mut generator = SampleGenerator::from_seed(Some(5));
        let heatmap = generator.heatmap();
        assert_eq!(heatmap.cells.len(), 168);

        let cell = heatmap.get(6, 23).unwrap();
        assert_eq!((cell.day, cell.hour), (6, 23));
        assert!(heatmap.cells.iter().all(|c| c.value >= -30.0 && c.value < HEATMAP_MAX));
    }

    proptest! {
        #[test]
        fn generated_fields_are_non_negative_and_finite(seed in any::<u64>(), t in 0i64..4_102_444_800_000) {
            let mut generator = SampleGenerator::from_seed(Some(seed));
            let s = generator.generate(t);
            assert_in_bounds(&s);
        }
    }
}
