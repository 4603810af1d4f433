//! Buffer error types.

use std::error::Error;
use std::fmt;
use std::io;

/// Errors that can occur during buffer construction and writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// The requested initial capacity is negative or does not fit in `usize`.
    CapacityOutOfRange,
    /// `offset + count` runs past the end of the source slice.
    ///
    /// Detected before any element is copied.
    InvalidRange {
        /// Start of the requested range in the source.
        offset: usize,
        /// Number of elements requested.
        count: usize,
        /// Length of the source slice.
        source_len: usize,
    },
    /// A [`BufferConfig`](crate::BufferConfig) failed validation.
    InvalidConfig {
        /// Human-readable description of the rejected setting.
        reason: String,
    },
    /// The buffer cannot grow: the chunk ceiling or the maximum element
    /// length has been reached.
    ///
    /// Fatal. The failing write may already have stored a prefix of its
    /// input, so the buffer must be discarded rather than retried.
    CapacityExceeded {
        /// Elements still pending when growth failed.
        requested: usize,
        /// Elements stored in the buffer at the time of failure.
        committed: usize,
        /// Number of chunks allocated at the time of failure.
        chunk_count: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOutOfRange => write!(f, "capacity must be non-negative"),
            Self::InvalidRange {
                offset,
                count,
                source_len,
            } => {
                write!(
                    f,
                    "invalid range: offset {offset} + count {count} exceeds source length {source_len}"
                )
            }
            Self::InvalidConfig { reason } => write!(f, "invalid buffer config: {reason}"),
            Self::CapacityExceeded {
                requested,
                committed,
                chunk_count,
            } => {
                write!(
                    f,
                    "buffer too long: {requested} elements pending with {committed} stored in {chunk_count} chunks"
                )
            }
        }
    }
}

impl Error for BufferError {}

impl From<BufferError> for io::Error {
    fn from(err: BufferError) -> Self {
        let kind = match err {
            BufferError::CapacityExceeded { .. } => io::ErrorKind::OutOfMemory,
            _ => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_exceeded_maps_to_out_of_memory() {
        let err = BufferError::CapacityExceeded {
            requested: 10,
            committed: 20,
            chunk_count: 24,
        };
        let io_err: io::Error = err.clone().into();
        assert_eq!(io_err.kind(), io::ErrorKind::OutOfMemory);
        let inner = io_err.get_ref().and_then(|e| e.downcast_ref::<BufferError>());
        assert_eq!(inner, Some(&err));
    }

    #[test]
    fn invalid_range_maps_to_invalid_input() {
        let io_err: io::Error = BufferError::InvalidRange {
            offset: 4,
            count: 8,
            source_len: 10,
        }
        .into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn display_names_the_range() {
        let msg = BufferError::InvalidRange {
            offset: 1,
            count: 2,
            source_len: 2,
        }
        .to_string();
        assert!(msg.contains("offset 1"));
        assert!(msg.contains("length 2"));
    }
}
