//! `std::io` adapters for byte buffers.
//!
//! A `SequenceBuffer<u8>` is a [`Write`] sink, so serializers can stream
//! into it directly. A `SequenceView<'_, u8>` can be handed to a vectored
//! writer as [`IoSlice`]s, drained into any [`Write`], or read back through
//! a [`ViewReader`].

use std::io::{self, BufRead, IoSlice, Read, Write};

use crate::buffer::SequenceBuffer;
use crate::error::BufferError;
use crate::view::SequenceView;

/// A failed growth may leave a prefix of the write stored. `Write` requires
/// an `Err` to mean nothing was written, so a stored prefix is reported as a
/// short write and the error surfaces on the next call.
fn short_write(stored: usize, err: BufferError) -> io::Result<usize> {
    match err {
        BufferError::CapacityExceeded { .. } if stored > 0 => Ok(stored),
        err => Err(err.into()),
    }
}

impl Write for SequenceBuffer<u8> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let before = self.len();
        match SequenceBuffer::write(self, buf) {
            Ok(()) => Ok(buf.len()),
            Err(err) => short_write(self.len() - before, err),
        }
    }

    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        let before = self.len();
        for buf in bufs {
            if let Err(err) = SequenceBuffer::write(self, buf) {
                return short_write(self.len() - before, err);
            }
        }
        Ok(self.len() - before)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        SequenceBuffer::write(self, buf)?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> SequenceView<'a, u8> {
    /// One [`IoSlice`] per segment, for `write_vectored`.
    pub fn io_slices(&self) -> Vec<IoSlice<'a>> {
        self.chunks().map(IoSlice::new).collect()
    }

    /// Write the whole view to `writer` using vectored writes.
    ///
    /// Retries on [`io::ErrorKind::Interrupted`] and returns the number of
    /// bytes written, which is always [`Self::len`] on success.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<usize> {
        let mut slices = self.io_slices();
        let mut remaining = &mut slices[..];
        while !remaining.is_empty() {
            match writer.write_vectored(remaining) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write whole view",
                    ));
                }
                Ok(n) => IoSlice::advance_slices(&mut remaining, n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(self.len())
    }

    /// A [`Read`] + [`BufRead`] cursor over the view.
    pub fn reader(&self) -> ViewReader<'a> {
        ViewReader {
            view: self.clone(),
            segment: 0,
            offset: 0,
            position: 0,
        }
    }
}

/// Sequential reader over a byte [`SequenceView`].
///
/// [`BufRead::fill_buf`] hands out the rest of the current segment without
/// copying.
pub struct ViewReader<'a> {
    view: SequenceView<'a, u8>,
    /// Index of the segment being read.
    segment: usize,
    /// Read offset within that segment.
    offset: usize,
    /// Bytes consumed so far.
    position: usize,
}

impl ViewReader<'_> {
    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.view.len() - self.position
    }
}

impl Read for ViewReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let src = self.fill_buf()?;
        let n = src.len().min(buf.len());
        buf[..n].copy_from_slice(&src[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for ViewReader<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self
            .view
            .segments()
            .get(self.segment)
            .map(|s| &s.as_slice()[self.offset..])
            .unwrap_or(&[]))
    }

    fn consume(&mut self, amt: usize) {
        let amt = amt.min(self.remaining());
        self.position += amt;
        self.offset += amt;
        while let Some(seg) = self.view.segments().get(self.segment) {
            if self.offset < seg.len() {
                break;
            }
            self.offset -= seg.len();
            self.segment += 1;
        }
    }
}
