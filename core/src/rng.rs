//! Deterministic, reproducible RNG streams.
//!
//! Every stream is derived from a single caller-supplied base seed and a
//! stream index by hashing the pair with a fixed, versioned hash, so two
//! runs given the same base seed always draw the same sequence of streams
//! regardless of wall-clock time or thread scheduling.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use std::hash::{Hash, Hasher};

/// Derives a reproducible `ChaCha8Rng` for the `index`-th independent stream
/// drawn from `base_seed` (e.g. the `index`-th heuristic seed, or the
/// `index`-th population slot needing a forced mutation).
pub fn stream(base_seed: u64, index: u64) -> ChaCha8Rng {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    // A fixed domain-separation tag keeps this stream derivation distinct
    // from any other (base_seed, index)-keyed hash elsewhere in the engine.
    (0xC0_147_157_u64, base_seed, index).hash(&mut hasher);
    let seed = hasher.finish();
    ChaCha8Rng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_and_index_is_deterministic() {
        let mut a = stream(42, 3);
        let mut b = stream(42, 3);
        let xs: Vec<u32> = (0..10).map(|_| a.random()).collect();
        let ys: Vec<u32> = (0..10).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_index_diverges() {
        let mut a = stream(42, 0);
        let mut b = stream(42, 1);
        let x: u32 = a.random();
        let y: u32 = b.random();
        assert_ne!(x, y);
    }
}
