//! Per-hash-function seeds, generated once when a filter is created.

use crate::consts::{SEED_BASE, SEED_STEP};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// How a fresh filter picks its `k` seeds. Both policies are deterministic;
/// a loaded filter always keeps the seeds stored in its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// 17, 34, 51, ...
    #[default]
    Arithmetic,
    /// `k` values drawn from `StdRng` seeded with the given value.
    Prng(u64),
}

impl SeedPolicy {
    pub fn generate(self, k: u32) -> Vec<u32> {
        match self {
            SeedPolicy::Arithmetic => generate_seeds(k),
            SeedPolicy::Prng(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                (0..k).map(|_| rng.random::<u32>()).collect()
            }
        }
    }
}

/// Arithmetic sequence starting at `SEED_BASE`, stepping by `SEED_STEP`.
/// Distinct for every `k` the header can hold (k <= u16::MAX).
pub fn generate_seeds(k: u32) -> Vec<u32> {
    (0..k).map(|i| SEED_BASE.wrapping_add(i.wrapping_mul(SEED_STEP))).collect()
}
