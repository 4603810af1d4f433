//! Read-only scatter/gather view of a buffer's content.
//!
//! [`SequenceView`] borrows every filled chunk of a
//! [`SequenceBuffer`](crate::SequenceBuffer) without copying. It is the
//! primary interface for consumers that accept discontiguous storage, such
//! as vectored writers.

use std::fmt;
use std::ops::{Bound, RangeBounds};

use smallvec::SmallVec;

use crate::chunk::ChunkList;

/// One contiguous region of a [`SequenceView`].
///
/// Borrows a chunk (or a prefix of one) directly and records where its
/// content starts in the logical sequence.
pub struct Segment<'a, T> {
    data: &'a [T],
    running_index: usize,
}

impl<'a, T> Segment<'a, T> {
    /// The segment's elements.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Offset of the segment's first element within the view.
    pub fn running_index(&self) -> usize {
        self.running_index
    }

    /// Number of elements in the segment.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` for a zero-length segment. Views never hold one.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Clone for Segment<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Segment<'_, T> {}

impl<T> fmt::Debug for Segment<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("running_index", &self.running_index)
            .field("len", &self.data.len())
            .finish()
    }
}

/// A zero-copy, ordered chain of segments covering a buffer's content.
///
/// Read in order, the segments reproduce exactly what
/// [`SequenceBuffer::to_vec`](crate::SequenceBuffer::to_vec) returns.
/// Every segment is non-empty, and segment `n + 1` starts where segment `n`
/// ends.
///
/// # Lifetime
///
/// `'a` is the borrow of the buffer. The view cannot outlive it, and the
/// buffer cannot be written while the view is alive. Chunks never move, so
/// data read through a view stays at the same address after later writes.
pub struct SequenceView<'a, T> {
    segments: SmallVec<[Segment<'a, T>; 4]>,
    len: usize,
}

impl<'a, T> SequenceView<'a, T> {
    /// The canonical empty view.
    pub fn empty() -> Self {
        Self {
            segments: SmallVec::new(),
            len: 0,
        }
    }

    /// Build a view over the filled part of `chunks`.
    pub(crate) fn from_chunks(chunks: &'a ChunkList<T>) -> Self {
        let segments: SmallVec<[Segment<'a, T>; 4]> = chunks
            .filled()
            .map(|(running_index, data)| Segment {
                data,
                running_index,
            })
            .collect();
        Self {
            segments,
            len: chunks.len(),
        }
    }

    /// View a single contiguous slice.
    pub fn from_slice(data: &'a [T]) -> Self {
        let mut segments = SmallVec::new();
        if !data.is_empty() {
            segments.push(Segment {
                data,
                running_index: 0,
            });
        }
        Self {
            segments,
            len: data.len(),
        }
    }

    /// Total number of elements covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the view covers nothing.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `true` if the whole view is one contiguous slice.
    pub fn is_single_segment(&self) -> bool {
        self.segments.len() <= 1
    }

    /// Number of segments in the chain.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The segments, in order.
    pub fn segments(&self) -> &[Segment<'a, T>] {
        &self.segments
    }

    /// Iterate the segments as plain slices.
    pub fn chunks(&self) -> Chunks<'_, 'a, T> {
        Chunks {
            inner: self.segments.iter(),
        }
    }

    /// The first segment's slice, or an empty slice for an empty view.
    pub fn first_chunk(&self) -> &'a [T] {
        self.segments.first().map(|s| s.data).unwrap_or(&[])
    }

    /// Element at logical position `index`.
    ///
    /// Locates the owning segment by binary search over running offsets.
    pub fn get(&self, index: usize) -> Option<&'a T> {
        if index >= self.len {
            return None;
        }
        let pos = self
            .segments
            .partition_point(|s| s.running_index <= index)
            - 1;
        let segment = &self.segments[pos];
        segment.data.get(index - segment.running_index)
    }

    /// A sub-view over `range`, still without copying.
    ///
    /// Running offsets in the returned view are relative to `range.start`.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or extends past [`Self::len`].
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> SequenceView<'a, T> {
        let start = match range.start_bound() {
            Bound::Included(&s) => Some(s),
            Bound::Excluded(&s) => s.checked_add(1),
            Bound::Unbounded => Some(0),
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.checked_add(1),
            Bound::Excluded(&e) => Some(e),
            Bound::Unbounded => Some(self.len),
        };
        let (start, end) = match (start, end) {
            (Some(start), Some(end)) if start <= end && end <= self.len => (start, end),
            _ => panic!(
                "range ({:?}, {:?}) out of bounds for view of length {}",
                range.start_bound(),
                range.end_bound(),
                self.len
            ),
        };

        let mut segments = SmallVec::new();
        for seg in &self.segments {
            let seg_end = seg.running_index + seg.data.len();
            let lo = start.max(seg.running_index);
            let hi = end.min(seg_end);
            if lo < hi {
                segments.push(Segment {
                    data: &seg.data[lo - seg.running_index..hi - seg.running_index],
                    running_index: lo - start,
                });
            }
        }
        SequenceView {
            segments,
            len: end - start,
        }
    }

    /// Iterate every element in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.segments.iter().flat_map(|s| s.data.iter())
    }
}

impl<T: Copy> SequenceView<'_, T> {
    /// Copy the content into a new contiguous `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        for chunk in self.chunks() {
            out.extend_from_slice(chunk);
        }
        out
    }

    /// Copy the content into `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst.len()` differs from [`Self::len`].
    pub fn copy_to_slice(&self, dst: &mut [T]) {
        assert_eq!(
            dst.len(),
            self.len,
            "destination length does not match view length"
        );
        for seg in &self.segments {
            let at = seg.running_index;
            dst[at..at + seg.data.len()].copy_from_slice(seg.data);
        }
    }
}

impl<T> Clone for SequenceView<'_, T> {
    fn clone(&self) -> Self {
        Self {
            segments: self.segments.clone(),
            len: self.len,
        }
    }
}

impl<T> Default for SequenceView<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for SequenceView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq<[T]> for SequenceView<'_, T> {
    fn eq(&self, other: &[T]) -> bool {
        self.len == other.len()
            && self
                .segments
                .iter()
                .all(|s| s.data == &other[s.running_index..s.running_index + s.data.len()])
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for SequenceView<'_, T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        *self == other[..]
    }
}

impl<T: PartialEq> PartialEq for SequenceView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<'v, 'a, T> IntoIterator for &'v SequenceView<'a, T> {
    type Item = &'a [T];
    type IntoIter = Chunks<'v, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks()
    }
}

/// Iterator over a view's segments as slices.
///
/// Created by [`SequenceView::chunks`].
pub struct Chunks<'v, 'a, T> {
    inner: std::slice::Iter<'v, Segment<'a, T>>,
}

impl<'a, T> Iterator for Chunks<'_, 'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|s| s.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Chunks<'_, '_, T> {}
