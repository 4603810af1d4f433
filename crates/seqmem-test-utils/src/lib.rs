//! Test utilities and fixtures for seqmem development.
//!
//! Provides seeded random data ([`fixtures`]), a helper to reassemble
//! chunked content ([`flatten_chunks`]), and a [`RecordingSink`] mock
//! writer for code that drains views through `std::io::Write`.
//!
//! Must not depend on `seqmem`: it is a dev-dependency of that crate.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::io::{self, IoSlice, Write};

pub mod fixtures;

pub use fixtures::{concat, random_blocks, random_bytes, SIZE_LIST};

/// Concatenate chunks, in order, into one `Vec`.
///
/// Mirrors what a consumer of a scatter/gather view does when it copies
/// every segment out in sequence.
pub fn flatten_chunks<'a, T, I>(chunks: I) -> Vec<T>
where
    T: Copy + 'a,
    I: IntoIterator<Item = &'a [T]>,
{
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend_from_slice(chunk);
    }
    out
}

/// Mock [`Write`] sink that records every call.
///
/// Accepts at most `max_per_call` bytes per write (0 means unlimited), so
/// callers' partial-write handling gets exercised.
pub struct RecordingSink {
    data: Vec<u8>,
    max_per_call: usize,
    calls: usize,
    vectored_calls: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::with_limit(0)
    }

    /// Sink that accepts at most `max_per_call` bytes per call.
    pub fn with_limit(max_per_call: usize) -> Self {
        Self {
            data: Vec::new(),
            max_per_call,
            calls: 0,
            vectored_calls: 0,
        }
    }

    /// Everything written so far.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Total number of `write`/`write_vectored` calls.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Number of `write_vectored` calls.
    pub fn vectored_calls(&self) -> usize {
        self.vectored_calls
    }

    fn budget(&self) -> usize {
        match self.max_per_call {
            0 => usize::MAX,
            n => n,
        }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for RecordingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        let n = buf.len().min(self.budget());
        self.data.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        self.calls += 1;
        self.vectored_calls += 1;
        let mut budget = self.budget();
        let mut written = 0;
        for buf in bufs {
            let n = buf.len().min(budget);
            self.data.extend_from_slice(&buf[..n]);
            written += n;
            budget -= n;
            if budget == 0 {
                break;
            }
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
