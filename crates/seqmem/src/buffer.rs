//! The append-only sequence buffer.
//!
//! [`SequenceBuffer`] is the user-facing type: it validates input, feeds
//! the [`ChunkList`] write path, and produces flattened copies or
//! zero-copy [`SequenceView`]s of everything written so far.

use std::fmt;

use crate::chunk::ChunkList;
use crate::config::BufferConfig;
use crate::error::BufferError;
use crate::view::SequenceView;

/// Number of elements [`Extend`] collects before each bulk write.
const EXTEND_BATCH: usize = 64;

/// Largest slice length addressable for `T` (`isize::MAX` bytes).
fn max_slice_len<T>() -> usize {
    match std::mem::size_of::<T>() {
        0 => usize::MAX,
        size => isize::MAX as usize / size,
    }
}

/// Snapshot of a buffer's cursor state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferStats {
    /// Number of allocated chunks.
    pub chunk_count: usize,
    /// Index of the chunk being written.
    pub chunk_index: usize,
    /// Total length of all chunks before the current one.
    pub committed: usize,
    /// Next free offset within the current chunk.
    pub write_pos: usize,
    /// Free elements left in the current chunk.
    pub free_in_chunk: usize,
}

/// A growable, append-only buffer backed by independently allocated chunks.
///
/// Growing never copies existing data: when the current chunk fills up a
/// new, larger chunk is appended after it. Content comes back out either
/// as one contiguous `Vec` ([`to_vec`](Self::to_vec)) or as a borrowed
/// scatter/gather [`SequenceView`] ([`view`](Self::view)).
///
/// # Example
///
/// ```
/// use seqmem::SequenceBuffer;
///
/// let mut buf = SequenceBuffer::<u8>::new();
/// buf.write(b"hello, ")?;
/// buf.write_range(b"xxworldxx", 2, 5)?;
///
/// assert_eq!(buf.to_vec(), b"hello, world");
/// assert_eq!(buf.view(), b"hello, world".to_vec());
/// # Ok::<(), seqmem::BufferError>(())
/// ```
pub struct SequenceBuffer<T> {
    chunks: ChunkList<T>,
    config: BufferConfig,
}

impl<T: Copy + Default> SequenceBuffer<T> {
    /// Create a buffer whose first chunk holds [`BufferConfig::MIN_CAPACITY`] elements.
    pub fn new() -> Self {
        Self::with_capacity(BufferConfig::MIN_CAPACITY)
    }

    /// Create a buffer with the given first-chunk capacity.
    ///
    /// Capacities below [`BufferConfig::MIN_CAPACITY`] are clamped up.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds the largest slice length for `T`, the
    /// same condition under which `Vec::with_capacity` panics. Use
    /// [`Self::try_with_capacity`] or [`Self::with_config`] to get a
    /// [`BufferError`] instead.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::with_config(BufferConfig::new(capacity)) {
            Ok(buffer) => buffer,
            Err(err) => panic!("capacity {capacity} exceeds the slice limit: {err}"),
        }
    }

    /// Create a buffer from a signed or otherwise fallible capacity.
    ///
    /// Returns [`BufferError::CapacityOutOfRange`] for values that do not
    /// convert to `usize`, such as negative integers.
    pub fn try_with_capacity<C: TryInto<usize>>(capacity: C) -> Result<Self, BufferError> {
        let capacity = capacity
            .try_into()
            .map_err(|_| BufferError::CapacityOutOfRange)?;
        Self::with_config(BufferConfig::new(capacity))
    }

    /// Create a buffer from a validated configuration.
    pub fn with_config(config: BufferConfig) -> Result<Self, BufferError> {
        config.validate()?;
        let first_len = config.clamped_capacity();
        let max_len = config.max_len.min(max_slice_len::<T>());
        if first_len > max_len {
            return Err(BufferError::InvalidConfig {
                reason: format!("initial capacity {first_len} exceeds element limit {max_len}"),
            });
        }
        Ok(Self {
            chunks: ChunkList::new(first_len, config.max_chunks, max_len),
            config,
        })
    }

    /// Append every element of `src`.
    ///
    /// Fills the current chunk's free tail, then allocates new chunks for
    /// whatever remains. A write that fits the free tail never allocates.
    ///
    /// Returns [`BufferError::CapacityExceeded`] if the buffer cannot grow;
    /// in that case a prefix of `src` may already be stored and the buffer
    /// should be discarded.
    pub fn write(&mut self, src: &[T]) -> Result<(), BufferError> {
        self.chunks.append(src)
    }

    /// Append `count` elements of `src` starting at `offset`.
    ///
    /// The range is checked before anything is copied; an out-of-bounds
    /// range returns [`BufferError::InvalidRange`] and leaves the buffer
    /// untouched.
    pub fn write_range(
        &mut self,
        src: &[T],
        offset: usize,
        count: usize,
    ) -> Result<(), BufferError> {
        let end = offset
            .checked_add(count)
            .filter(|&end| end <= src.len())
            .ok_or(BufferError::InvalidRange {
                offset,
                count,
                source_len: src.len(),
            })?;
        self.write(&src[offset..end])
    }

    /// Append the content of another buffer's view, segment by segment.
    pub fn write_view(&mut self, view: &SequenceView<'_, T>) -> Result<(), BufferError> {
        for chunk in view {
            self.write(chunk)?;
        }
        Ok(())
    }
}

impl<T: Copy> SequenceBuffer<T> {
    /// Copy everything written so far into one new contiguous `Vec`.
    ///
    /// Each call returns an independent copy; the buffer is unchanged.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.chunks.len());
        for (_, chunk) in self.chunks.filled() {
            out.extend_from_slice(chunk);
        }
        out
    }
}

impl<T> SequenceBuffer<T> {
    /// Borrow everything written so far as a zero-copy scatter/gather view.
    pub fn view(&self) -> SequenceView<'_, T> {
        SequenceView::from_chunks(&self.chunks)
    }

    /// Number of elements written.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Number of allocated chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.chunk_count()
    }

    /// Total allocated elements across all chunks.
    pub fn capacity(&self) -> usize {
        self.chunks.capacity()
    }

    /// Free elements left in the current chunk.
    pub fn remaining_in_chunk(&self) -> usize {
        self.chunks.remaining_in_chunk()
    }

    /// Maximum number of elements this buffer may hold.
    pub fn max_len(&self) -> usize {
        self.chunks.max_len()
    }

    /// Memory usage of all chunks in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.chunks.memory_bytes()
    }

    /// `true` once a write has failed with [`BufferError::CapacityExceeded`].
    pub fn is_exhausted(&self) -> bool {
        self.chunks.is_exhausted()
    }

    /// The configuration the buffer was built with.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Current cursor state.
    pub fn stats(&self) -> BufferStats {
        BufferStats {
            chunk_count: self.chunks.chunk_count(),
            chunk_index: self.chunks.current_index(),
            committed: self.chunks.committed(),
            write_pos: self.chunks.write_pos(),
            free_in_chunk: self.chunks.remaining_in_chunk(),
        }
    }
}

impl<T: Copy + Default> SequenceBuffer<T> {
    fn extend_batch(&mut self, items: &[T]) {
        if let Err(err) = self.write(items) {
            panic!("{err}");
        }
    }
}

impl<T: Copy + Default> Default for SequenceBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SequenceBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceBuffer")
            .field("len", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

/// Extending panics if the buffer runs out of capacity, as `Vec` does.
impl<T: Copy + Default> Extend<T> for SequenceBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut batch = [T::default(); EXTEND_BATCH];
        let mut filled = 0;
        for item in iter {
            batch[filled] = item;
            filled += 1;
            if filled == EXTEND_BATCH {
                self.extend_batch(&batch);
                filled = 0;
            }
        }
        self.extend_batch(&batch[..filled]);
    }
}

impl<'a, T: Copy + Default + 'a> Extend<&'a T> for SequenceBuffer<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        Extend::<T>::extend(self, iter.into_iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_minimum_capacity() {
        let buf = SequenceBuffer::<u8>::new();
        assert_eq!(buf.capacity(), 256);
        assert_eq!(buf.chunk_count(), 1);
        assert!(buf.is_empty());
    }

    #[test]
    #[should_panic(expected = "exceeds the slice limit")]
    fn oversized_capacity_panics() {
        let _ = SequenceBuffer::<u64>::with_capacity(usize::MAX);
    }

    #[test]
    fn oversized_capacity_is_an_error_when_fallible() {
        let err = SequenceBuffer::<u64>::try_with_capacity(usize::MAX).unwrap_err();
        assert!(matches!(err, BufferError::InvalidConfig { .. }));
    }

    #[test]
    fn small_capacity_is_clamped() {
        let buf = SequenceBuffer::<u8>::with_capacity(0);
        assert_eq!(buf.capacity(), 256);
        let buf = SequenceBuffer::<u8>::with_capacity(4096);
        assert_eq!(buf.capacity(), 4096);
    }

    #[test]
    fn negative_capacity_is_rejected() {
        let result = SequenceBuffer::<u8>::try_with_capacity(-1i64);
        assert!(matches!(result, Err(BufferError::CapacityOutOfRange)));
        let buf = SequenceBuffer::<u8>::try_with_capacity(10i32).unwrap();
        assert_eq!(buf.capacity(), 256);
    }

    #[test]
    fn config_above_type_limit_is_rejected() {
        let config = BufferConfig::new(usize::MAX / 2);
        let result = SequenceBuffer::<u64>::with_config(config);
        assert!(matches!(result, Err(BufferError::InvalidConfig { .. })));
    }

    #[test]
    fn max_len_is_narrowed_to_slice_limit() {
        let buf = SequenceBuffer::<u32>::new();
        assert_eq!(buf.max_len(), isize::MAX as usize / 4);
        let config = BufferConfig::default().max_len(1000);
        let buf = SequenceBuffer::<u8>::with_config(config).unwrap();
        assert_eq!(buf.max_len(), 1000);
    }

    #[test]
    fn write_range_copies_only_the_range() {
        let mut buf = SequenceBuffer::<u8>::new();
        buf.write_range(&[9, 1, 2, 3, 9], 1, 3).unwrap();
        assert_eq!(buf.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn write_range_out_of_bounds_leaves_state_unchanged() {
        let mut buf = SequenceBuffer::<u8>::new();
        buf.write(&[1, 2]).unwrap();
        let before = buf.stats();

        let err = buf.write_range(&[0; 4], 1, 4).unwrap_err();
        assert_eq!(
            err,
            BufferError::InvalidRange {
                offset: 1,
                count: 4,
                source_len: 4,
            }
        );
        assert_eq!(buf.stats(), before);
    }

    #[test]
    fn write_range_offset_overflow_is_invalid_range() {
        let mut buf = SequenceBuffer::<u8>::new();
        let result = buf.write_range(&[0; 4], usize::MAX, 2);
        assert!(matches!(result, Err(BufferError::InvalidRange { .. })));
    }

    #[test]
    fn zero_length_write_is_noop() {
        let mut buf = SequenceBuffer::<u8>::new();
        buf.write(&[1; 256]).unwrap();
        let before = buf.stats();
        buf.write(&[]).unwrap();
        buf.write_range(&[1, 2, 3], 3, 0).unwrap();
        assert_eq!(buf.stats(), before);
        assert_eq!(buf.chunk_count(), 1);
    }

    #[test]
    fn stats_track_cursor() {
        let mut buf = SequenceBuffer::<u8>::new();
        buf.write(&[0; 300]).unwrap();
        let stats = buf.stats();
        assert_eq!(stats.chunk_count, 2);
        assert_eq!(stats.chunk_index, 1);
        assert_eq!(stats.committed, 256);
        assert_eq!(stats.write_pos, 44);
        assert_eq!(stats.free_in_chunk, 512 - 44);
        assert_eq!(stats.committed + stats.write_pos, buf.len());
    }

    #[test]
    fn write_view_copies_between_buffers() {
        let data: Vec<u16> = (0..2000).collect();
        let mut src = SequenceBuffer::<u16>::new();
        src.write(&data).unwrap();

        let mut dst = SequenceBuffer::<u16>::new();
        dst.write(&[7, 7]).unwrap();
        dst.write_view(&src.view()).unwrap();

        let mut expected = vec![7, 7];
        expected.extend_from_slice(&data);
        assert_eq!(dst.to_vec(), expected);
    }

    #[test]
    fn extend_batches_elements() {
        let mut buf = SequenceBuffer::<u32>::new();
        buf.extend(0..1000u32);
        buf.extend(&[5, 6]);
        let mut expected: Vec<u32> = (0..1000).collect();
        expected.extend_from_slice(&[5, 6]);
        assert_eq!(buf.to_vec(), expected);
    }

    #[test]
    #[should_panic(expected = "buffer too long")]
    fn extend_panics_when_exhausted() {
        let config = BufferConfig::default().max_chunks(1);
        let mut buf = SequenceBuffer::<u8>::with_config(config).unwrap();
        buf.extend(std::iter::repeat(1u8).take(300));
    }

    #[test]
    fn exhausted_buffer_keeps_failing() {
        let config = BufferConfig::default().max_chunks(2);
        let mut buf = SequenceBuffer::<u8>::with_config(config).unwrap();
        buf.write(&[0; 256]).unwrap();
        buf.write(&[0; 1]).unwrap();
        buf.write(&[0; 511]).unwrap();
        assert_eq!(buf.capacity(), 768);
        assert!(!buf.is_exhausted());

        assert!(buf.write(&[1]).is_err());
        assert!(buf.is_exhausted());
        assert!(buf.write(&[1]).is_err());
        assert_eq!(buf.len(), 768);
    }

    #[test]
    fn debug_reports_len() {
        let mut buf = SequenceBuffer::<u8>::new();
        buf.write(b"abc").unwrap();
        let text = format!("{buf:?}");
        assert!(text.contains("len: 3"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn to_vec_is_concatenation(
                parts in proptest::collection::vec(
                    proptest::collection::vec(any::<u8>(), 0..700),
                    0..24,
                ),
            ) {
                let mut buf = SequenceBuffer::<u8>::new();
                for part in &parts {
                    buf.write(part).unwrap();
                }
                let expected: Vec<u8> = parts.concat();
                prop_assert_eq!(buf.len(), expected.len());
                prop_assert_eq!(buf.to_vec(), expected);
            }

            #[test]
            fn view_matches_to_vec(
                sizes in proptest::collection::vec(0usize..2000, 1..16),
                capacity in 0usize..600,
            ) {
                let mut buf = SequenceBuffer::<u16>::with_capacity(capacity);
                let mut next = 0u16;
                for size in sizes {
                    let part: Vec<u16> = (0..size)
                        .map(|_| {
                            next = next.wrapping_add(1);
                            next
                        })
                        .collect();
                    buf.write(&part).unwrap();
                }
                let view = buf.view();
                prop_assert_eq!(view.to_vec(), buf.to_vec());
                prop_assert!(view.segments().iter().all(|s| !s.is_empty()));
            }

            #[test]
            fn cursor_invariant_holds(
                sizes in proptest::collection::vec(0usize..5000, 0..20),
            ) {
                let mut buf = SequenceBuffer::<u8>::new();
                let mut total = 0;
                for size in sizes {
                    buf.write(&vec![0xAB; size]).unwrap();
                    total += size;
                    let stats = buf.stats();
                    prop_assert_eq!(stats.committed + stats.write_pos, total);
                    prop_assert_eq!(stats.chunk_index + 1, stats.chunk_count);
                    prop_assert!(stats.chunk_count <= BufferConfig::DEFAULT_MAX_CHUNKS);
                }
            }

            #[test]
            fn slice_matches_flat_range(
                len in 1usize..3000,
                a in 0usize..3000,
                b in 0usize..3000,
            ) {
                let data: Vec<u32> = (0..len as u32).collect();
                let mut buf = SequenceBuffer::<u32>::new();
                for part in data.chunks(211) {
                    buf.write(part).unwrap();
                }
                let (lo, hi) = (a.min(b).min(len), a.max(b).min(len));
                let view = buf.view();
                prop_assert_eq!(view.slice(lo..hi).to_vec(), data[lo..hi].to_vec());
                if lo < len {
                    prop_assert_eq!(view.get(lo), Some(&data[lo]));
                }
            }
        }
    }
}
