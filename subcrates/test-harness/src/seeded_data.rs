//! Reproducible pseudo-random data (ChaCha20, seeded).

use rand::{
    distributions::Standard,
    prelude::{Rng, SeedableRng},
    seq::SliceRandom,
};
use rand_chacha::ChaCha20Rng;

/// Returns `size_bytes` pseudo-random bytes; the same `seed` always yields the same bytes.
pub fn seeded_random_bytes(seed: u64, size_bytes: usize) -> Vec<u8> {
    ChaCha20Rng::seed_from_u64(seed)
        .sample_iter::<u8, _>(Standard)
        .take(size_bytes)
        .collect()
}

/// Shuffles `items` in place, reproducibly for a given `seed`.
pub fn shuffle_seeded<T>(items: &mut [T], seed: u64) {
    items.shuffle(&mut ChaCha20Rng::seed_from_u64(seed));
}
