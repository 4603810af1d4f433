//! Buffer configuration parameters.

use crate::error::BufferError;

/// Configuration for a [`SequenceBuffer`](crate::SequenceBuffer).
///
/// Controls the first chunk's size and the two growth limits.
/// Validated at construction; all values are immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferConfig {
    /// Length of the first chunk in elements.
    ///
    /// Default: 256. Smaller values are clamped up to [`Self::MIN_CAPACITY`].
    pub initial_capacity: usize,

    /// Maximum number of chunks the buffer may allocate.
    ///
    /// Default: 24. Must be at least 1.
    pub max_chunks: usize,

    /// Maximum total number of elements the buffer may hold.
    ///
    /// Default: `usize::MAX`, which the buffer narrows to the largest slice
    /// length addressable for its element type (`isize::MAX` bytes).
    pub max_len: usize,
}

impl BufferConfig {
    /// Smallest first-chunk length, in elements.
    pub const MIN_CAPACITY: usize = 256;

    /// Default maximum chunk count.
    pub const DEFAULT_MAX_CHUNKS: usize = 24;

    /// Default element ceiling (narrowed per element type).
    pub const DEFAULT_MAX_LEN: usize = usize::MAX;

    /// Create a config with the given initial capacity and default limits.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_chunks: Self::DEFAULT_MAX_CHUNKS,
            max_len: Self::DEFAULT_MAX_LEN,
        }
    }

    /// Set the maximum chunk count.
    pub fn max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }

    /// Set the maximum total element count.
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Initial capacity after clamping to [`Self::MIN_CAPACITY`].
    pub fn clamped_capacity(&self) -> usize {
        self.initial_capacity.max(Self::MIN_CAPACITY)
    }

    /// Check that the limits leave room for at least the first chunk.
    pub fn validate(&self) -> Result<(), BufferError> {
        if self.max_chunks == 0 {
            return Err(BufferError::InvalidConfig {
                reason: "max_chunks must be at least 1".into(),
            });
        }
        let first = self.clamped_capacity();
        if self.max_len < first {
            return Err(BufferError::InvalidConfig {
                reason: format!("max_len {} is below the first chunk length {first}", self.max_len),
            });
        }
        Ok(())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new(Self::MIN_CAPACITY)
    }
}
