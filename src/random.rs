//! Seeded RNG construction.
//!
//! Every stochastic operation in this crate takes `&mut impl Rng` explicitly,
//! so a run is reproducible from its seed alone.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
