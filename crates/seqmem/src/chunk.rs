//! Fixed-length chunks and the bounded chunk list behind a buffer.
//!
//! A [`Chunk`] is a contiguous `Box<[T]>` allocated once at its final
//! length. A [`ChunkList`] owns an ordered run of chunks plus the write
//! cursor, and appends a new chunk (never reallocating an old one) when the
//! current chunk is full.

use tracing::{debug, trace, warn};

use crate::error::BufferError;
use crate::growth::next_chunk_len;

/// A single fixed-length storage block.
///
/// Chunks are never resized or moved once allocated, so slices into a
/// chunk stay valid for as long as the owning list is alive.
pub struct Chunk<T> {
    /// Backing storage. Allocated to full length at creation.
    data: Box<[T]>,
}

impl<T: Copy + Default> Chunk<T> {
    /// Allocate a chunk of `len` default-initialised elements.
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![T::default(); len].into_boxed_slice(),
        }
    }
}

impl<T> Chunk<T> {
    /// Length of the chunk in elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` for a zero-length chunk.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The whole chunk as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The first `len` elements of the chunk.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the chunk length.
    pub fn prefix(&self, len: usize) -> &[T] {
        &self.data[..len]
    }
}

/// An ordered, bounded list of [`Chunk`]s with a write cursor.
///
/// Only the last chunk is ever written. Every earlier chunk is full and
/// counted in `committed`, so `committed + write_pos` is always the number
/// of elements stored.
pub struct ChunkList<T> {
    chunks: Vec<Chunk<T>>,
    max_chunks: usize,
    max_len: usize,
    /// Next free offset within the last chunk.
    write_pos: usize,
    /// Total length of every chunk before the last one.
    committed: usize,
    /// Set once growth has failed; the list never grows again.
    exhausted: bool,
}

impl<T: Copy + Default> ChunkList<T> {
    /// Create a chunk list with one pre-allocated chunk of `first_len`.
    pub fn new(first_len: usize, max_chunks: usize, max_len: usize) -> Self {
        let mut chunks = Vec::with_capacity(max_chunks.min(64));
        chunks.push(Chunk::new(first_len));
        trace!(index = 0, len = first_len, "allocated first chunk");
        Self {
            chunks,
            max_chunks,
            max_len,
            write_pos: 0,
            committed: 0,
            exhausted: false,
        }
    }

    /// Copy all of `src` onto the end of the list, growing as needed.
    ///
    /// Each chunk receives at most one bulk copy per call. On
    /// `CapacityExceeded` the elements that fitted before growth failed
    /// remain stored.
    pub fn append(&mut self, mut src: &[T]) -> Result<(), BufferError> {
        loop {
            let take = src.len().min(self.remaining_in_chunk());
            let start = self.write_pos;
            let last = self.chunks.len() - 1;
            self.chunks[last].data[start..start + take].copy_from_slice(&src[..take]);
            self.write_pos += take;
            src = &src[take..];

            if src.is_empty() {
                return Ok(());
            }
            self.grow(src.len())?;
        }
    }

    /// Seal the full last chunk and allocate its successor.
    ///
    /// `hint` is the number of elements still waiting to be written.
    fn grow(&mut self, hint: usize) -> Result<(), BufferError> {
        let stored = self.len();
        let prev_len = self.current_chunk().len();
        let growth = if self.exhausted || self.chunks.len() >= self.max_chunks {
            None
        } else {
            next_chunk_len(hint, prev_len, stored, self.max_len)
        };

        let Some(growth) = growth else {
            self.exhausted = true;
            warn!(
                pending = hint,
                stored,
                chunks = self.chunks.len(),
                "buffer cannot grow further"
            );
            return Err(BufferError::CapacityExceeded {
                requested: hint,
                committed: stored,
                chunk_count: self.chunks.len(),
            });
        };

        if growth.clamped {
            debug!(len = growth.len, stored, "chunk clamped to remaining headroom");
        }
        self.committed = stored;
        self.write_pos = 0;
        self.chunks.push(Chunk::new(growth.len));
        trace!(
            index = self.chunks.len() - 1,
            len = growth.len,
            committed = self.committed,
            "allocated chunk"
        );
        Ok(())
    }
}

impl<T> ChunkList<T> {
    /// Number of elements stored.
    pub fn len(&self) -> usize {
        self.committed + self.write_pos
    }

    /// `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of allocated chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Index of the chunk being written.
    pub fn current_index(&self) -> usize {
        self.chunks.len() - 1
    }

    /// Next free offset within the current chunk.
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Total length of all chunks before the current one.
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Free elements left in the current chunk.
    pub fn remaining_in_chunk(&self) -> usize {
        self.current_chunk().len() - self.write_pos
    }

    /// Total allocated elements across all chunks.
    pub fn capacity(&self) -> usize {
        self.committed + self.current_chunk().len()
    }

    /// Maximum number of elements this list may hold.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// `true` once a growth attempt has failed.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Memory usage of all chunks in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.capacity() * std::mem::size_of::<T>()
    }

    /// Iterate the stored content chunk by chunk.
    ///
    /// Yields `(running_index, slice)` pairs: every committed chunk in full,
    /// then the used prefix of the current chunk. Empty slices are skipped.
    pub fn filled(&self) -> impl Iterator<Item = (usize, &[T])> + '_ {
        let last = self.current_index();
        let mut running = 0usize;
        self.chunks.iter().enumerate().filter_map(move |(i, chunk)| {
            let slice = if i == last {
                chunk.prefix(self.write_pos)
            } else {
                chunk.as_slice()
            };
            let start = running;
            running += slice.len();
            (!slice.is_empty()).then_some((start, slice))
        })
    }

    fn current_chunk(&self) -> &Chunk<T> {
        &self.chunks[self.chunks.len() - 1]
    }
}
