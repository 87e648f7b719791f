//! Deterministic per-trial RNG seeding.
//!
//! Trials must be reproducible given `run_seed`, yet
//! independent of each other. Each trial derives its own seed from
//! `run_seed` and its 0-based trial index via a SplitMix64 mixing step, then
//! uses that to seed a [`ChaCha8Rng`]. No RNG state is shared across trials.

use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;

/// SplitMix64 mixing step (Steele, Lea & Flood 2014). Used only to derive
/// independent per-trial seeds from a single run seed, never as the trial's
/// own random source.
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derives a reproducible RNG for trial `trial_index` (0-based) of a run
/// seeded by `run_seed`.
pub fn trial_rng(run_seed: u64, trial_index: u32) -> ChaCha8Rng {
    let mixed = splitmix64(run_seed ^ trial_index as u64);
    ChaCha8Rng::seed_from_u64(mixed)
}
