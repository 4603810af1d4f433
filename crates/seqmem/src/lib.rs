//! Chunked, append-only sequence buffers with zero-copy views.
//!
//! A [`SequenceBuffer`] accumulates elements without ever copying what it
//! already holds: when the current chunk fills up, a new and larger chunk
//! is appended after it. The content can then be flattened into one `Vec`
//! or borrowed as a scatter/gather [`SequenceView`] for consumers that
//! accept discontiguous storage (vectored I/O, another buffer).
//!
//! # Architecture
//!
//! ```text
//! SequenceBuffer<T> (validation, flatten, view construction)
//! └── ChunkList<T> (write cursor + growth, ≤ max_chunks chunks)
//!     └── Chunk<T>[] (Box<[T]>, allocated once, never moved)
//!
//! SequenceView<'a, T> ── borrows ──▶ filled prefix of every chunk
//! ```
//!
//! # Growth
//!
//! The next chunk is `max(pending, previous_chunk) * 2` elements, clamped to
//! the remaining element headroom. Running out of chunks or headroom is a
//! fatal [`BufferError::CapacityExceeded`]; see [`growth`].
//!
//! # Safety
//!
//! No `unsafe`. All copies go through `copy_from_slice`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod chunk;
pub mod config;
pub mod error;
pub mod growth;
mod io;
pub mod view;

// Public re-exports for the primary API surface.
pub use buffer::{BufferStats, SequenceBuffer};
pub use config::BufferConfig;
pub use error::BufferError;
pub use io::ViewReader;
pub use view::{Segment, SequenceView};
