//! Benchmark workloads for the seqmem buffer.
//!
//! Provides the accumulate-then-flatten workload used by the benches and
//! examples, built two ways for comparison:
//!
//! - [`fill_sequence_buffer`]: chunked [`SequenceBuffer`] writes
//! - [`fill_vec`]: a plain growable `Vec<u8>`, which reallocates and
//!   copies as it grows

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use seqmem::SequenceBuffer;
use seqmem_test_utils::{random_blocks, SIZE_LIST};

/// Seed shared by every benchmark workload.
pub const BENCH_SEED: u64 = 0x5EED;

/// The reference workload: one random block per [`SIZE_LIST`] entry.
pub fn reference_blocks() -> Vec<Vec<u8>> {
    random_blocks(&SIZE_LIST, BENCH_SEED)
}

/// `count` random blocks of `len` bytes each, for many-small-writes runs.
pub fn small_blocks(count: usize, len: usize) -> Vec<Vec<u8>> {
    random_blocks(&vec![len; count], BENCH_SEED)
}

/// Write every block into a fresh [`SequenceBuffer`].
///
/// # Panics
///
/// Panics if the blocks exceed the default buffer limits, which the
/// benchmark workloads never do.
pub fn fill_sequence_buffer(blocks: &[Vec<u8>]) -> SequenceBuffer<u8> {
    let mut buf = SequenceBuffer::new();
    for block in blocks {
        buf.write_range(block, 0, block.len())
            .expect("benchmark workload fits default limits");
    }
    buf
}

/// Write every block into a fresh `Vec<u8>`.
pub fn fill_vec(blocks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    for block in blocks {
        out.extend_from_slice(block);
    }
    out
}
