//! Benchmark support utilities for the ranking pipeline.
//!
//! Provides deterministic candidate generation around a fixed origin so
//! benchmark runs are reproducible.

use destinate_core::{Candidate, Location};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Origin used for every benchmark request (central Jakarta).
pub const ORIGIN: (f64, f64) = (-6.2088, 106.8456);

/// Maximum offset from the origin in degrees; roughly 550 km.
const SPREAD_DEGREES: f64 = 5.0;

/// Generate `count` valid candidates scattered around [`ORIGIN`].
///
/// Prices, ratings, and review counts are drawn from realistic ranges with a
/// seeded RNG.
#[must_use]
pub fn generate_candidates(count: usize, seed: u64) -> Vec<Candidate> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .filter_map(|i| {
            #[expect(clippy::float_arithmetic, reason = "Required for coordinate offset")]
            let latitude = ORIGIN.0 + rng.gen_range(-SPREAD_DEGREES..SPREAD_DEGREES);
            #[expect(clippy::float_arithmetic, reason = "Required for coordinate offset")]
            let longitude = ORIGIN.1 + rng.gen_range(-SPREAD_DEGREES..SPREAD_DEGREES);
            let location = Location::new(latitude, longitude).ok()?;
            Candidate::new(
                format!("destination-{i}"),
                rng.gen_range(0.0..500_000.0),
                rng.gen_range(1.0..=5.0),
                rng.gen_range(0.0..50_000.0),
                location,
            )
            .ok()
        })
        .collect()
}

/// Benchmark origin as a validated location.
#[must_use]
pub fn origin() -> Option<Location> {
    Location::new(ORIGIN.0, ORIGIN.1).ok()
}
