//! Seeded random byte fixtures.
//!
//! Every generator takes an explicit seed and uses `ChaCha8Rng`, so a
//! failing test reproduces with the same data.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Block sizes that straddle chunk boundaries at every growth step:
/// just under 4x the minimum chunk, ~12x, a power of two, and
/// one short of 2 MiB.
pub const SIZE_LIST: [usize; 4] = [1001, 3003, 0x8000, 0x1F_FFFF];

/// `len` random bytes from `seed`.
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = vec![0u8; len];
    rng.fill_bytes(&mut out);
    out
}

/// One random block per entry in `sizes`, each from its own derived seed.
pub fn random_blocks(sizes: &[usize], seed: u64) -> Vec<Vec<u8>> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &len)| random_bytes(len, seed.wrapping_add(i as u64)))
        .collect()
}

/// Concatenate blocks in order.
pub fn concat(blocks: &[Vec<u8>]) -> Vec<u8> {
    blocks.concat()
}
