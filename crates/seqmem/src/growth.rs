//! Chunk sizing policy.
//!
//! Each new chunk is twice the larger of the previous chunk and the
//! pending write, so a single large write allocates one proportionally
//! large chunk instead of a run of small ones. Near the element ceiling the
//! new chunk is clamped to whatever headroom is left.

/// Outcome of sizing the next chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkGrowth {
    /// Length of the chunk to allocate, in elements. Always non-zero.
    pub len: usize,
    /// `true` if doubling was cut short by the element ceiling.
    pub clamped: bool,
}

/// Size the chunk that follows a full one.
///
/// - `hint`: elements still pending in the current write.
/// - `prev_len`: length of the chunk that just filled up.
/// - `stored`: elements already held by the buffer.
/// - `max_len`: the buffer's element ceiling.
///
/// Returns `None` when no headroom is left (`stored >= max_len`).
pub fn next_chunk_len(
    hint: usize,
    prev_len: usize,
    stored: usize,
    max_len: usize,
) -> Option<ChunkGrowth> {
    let headroom = max_len.checked_sub(stored).filter(|&h| h > 0)?;
    let doubled = hint
        .max(prev_len)
        .checked_mul(2)
        .filter(|&len| len <= headroom);
    Some(match doubled {
        Some(len) => ChunkGrowth {
            len,
            clamped: false,
        },
        None => ChunkGrowth {
            len: headroom,
            clamped: true,
        },
    })
}
