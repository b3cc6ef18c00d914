//! Subscripting (§4.6): integer indexing returns a new `Str`; slice
//! indexing returns a `Strs` whose output layout is determined by input
//! layout and step.

use std::fmt;
use std::sync::Arc;

use crate::alloc::default_allocator;
use crate::error::{Error, Result};
use crate::view::{ParentBytes, Str};

use super::layout::{ColumnarParent, Span, Strs};

/// Wraps a `ColumnarParent` so it can also serve as a `Str`'s parent
/// (`ParentBytes::as_bytes` delegates to `ColumnarParent::data`).
struct ColumnarAsBytes(Arc<dyn ColumnarParent>);

impl fmt::Debug for ColumnarAsBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ColumnarAsBytes").field(&self.0).finish()
    }
}

impl ParentBytes for ColumnarAsBytes {
    fn as_bytes(&self) -> &[u8] {
        self.0.data()
    }
}

/// A `ColumnarParent` that narrows an existing one to a sub-range of
/// offsets, sharing the same underlying data buffer. Backs the "tape view,
/// offsets pointer shifted" rule in §4.6.
struct OffsetWindow32 {
    parent: Arc<dyn ColumnarParent>,
    offset_from: usize,
    offset_to: usize,
}

impl fmt::Debug for OffsetWindow32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OffsetWindow32")
            .field("from", &self.offset_from)
            .field("to", &self.offset_to)
            .finish()
    }
}

impl ColumnarParent for OffsetWindow32 {
    fn data(&self) -> &[u8] {
        self.parent.data()
    }
    fn offsets32(&self) -> Option<&[u32]> {
        self.parent.offsets32().map(|o| &o[self.offset_from..=self.offset_to])
    }
}

struct OffsetWindow64 {
    parent: Arc<dyn ColumnarParent>,
    offset_from: usize,
    offset_to: usize,
}

impl fmt::Debug for OffsetWindow64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OffsetWindow64")
            .field("from", &self.offset_from)
            .field("to", &self.offset_to)
            .finish()
    }
}

impl ColumnarParent for OffsetWindow64 {
    fn data(&self) -> &[u8] {
        self.parent.data()
    }
    fn offsets64(&self) -> Option<&[u64]> {
        self.parent.offsets64().map(|o| &o[self.offset_from..=self.offset_to])
    }
}

fn normalize_index(i: i64, len: usize) -> Result<usize> {
    let resolved = if i < 0 { len as i64 + i } else { i };
    if resolved < 0 || resolved as usize >= len {
        return Err(Error::IndexOutOfRange { index: i, len });
    }
    Ok(resolved as usize)
}

/// Python-style slice-index resolution: negative bounds count from the
/// end, `step` may be negative, and out-of-range bounds clamp rather than
/// error.
fn resolve_slice_indices(start: Option<i64>, stop: Option<i64>, step: i64, len: usize) -> Vec<usize> {
    let len_i = len as i64;
    let normalize = |v: i64| -> i64 {
        let v = if v < 0 { v + len_i } else { v };
        if step > 0 {
            v.clamp(0, len_i)
        } else {
            v.clamp(-1, len_i - 1)
        }
    };
    let default_start = if step > 0 { 0 } else { len_i - 1 };
    let default_stop = if step > 0 { len_i } else { -1 };
    let start = start.map(normalize).unwrap_or(default_start);
    let stop = stop.map(normalize).unwrap_or(default_stop);

    let mut indices = Vec::new();
    let mut i = start;
    if step > 0 {
        while i < stop {
            indices.push(i as usize);
            i += step;
        }
    } else {
        while i > stop {
            indices.push(i as usize);
            i += step;
        }
    }
    indices
}

impl Strs {
    /// Builds a `Span` for element `idx` without copying bytes, regardless
    /// of the active layout.
    pub(crate) fn span_at(&self, idx: usize) -> Span {
        match self {
            Strs::U32TapeOwned { tape, .. } => {
                let (a, b) = (tape.offsets[idx] as usize, tape.offsets[idx + 1] as usize);
                Span { parent: Arc::clone(tape) as Arc<dyn ParentBytes>, start: a, len: b - a }
            }
            Strs::U64TapeOwned { tape, .. } => {
                let (a, b) = (tape.offsets[idx] as usize, tape.offsets[idx + 1] as usize);
                Span { parent: Arc::clone(tape) as Arc<dyn ParentBytes>, start: a, len: b - a }
            }
            Strs::U32TapeView { parent } => {
                let offsets = parent.offsets32().expect("U32TapeView without 32-bit offsets");
                let (a, b) = (offsets[idx] as usize, offsets[idx + 1] as usize);
                let wrapped: Arc<dyn ParentBytes> = Arc::new(ColumnarAsBytes(Arc::clone(parent)));
                Span { parent: wrapped, start: a, len: b - a }
            }
            Strs::U64TapeView { parent } => {
                let offsets = parent.offsets64().expect("U64TapeView without 64-bit offsets");
                let (a, b) = (offsets[idx] as usize, offsets[idx + 1] as usize);
                let wrapped: Arc<dyn ParentBytes> = Arc::new(ColumnarAsBytes(Arc::clone(parent)));
                Span { parent: wrapped, start: a, len: b - a }
            }
            Strs::Fragmented { spans, .. } => spans[idx].clone(),
        }
    }

    /// Integer indexing: normalizes a negative index and returns a new
    /// `Str` view over the i-th element.
    pub fn get(&self, i: i64) -> Result<Str> {
        let idx = normalize_index(i, self.count())?;
        let span = self.span_at(idx);
        Ok(Str::from_parent_range(span.parent, span.start as i64, (span.start + span.len) as i64))
    }

    /// Slice indexing. `step` must be nonzero. Layout of the result follows
    /// §4.6's table: a contiguous (`step == 1`) slice preserves a tape
    /// layout's shape where possible; any other step yields `Fragmented`.
    pub fn slice(&self, start: Option<i64>, stop: Option<i64>, step: i64) -> Result<Strs> {
        if step == 0 {
            return Err(Error::InvalidArgument("slice step cannot be zero".to_string()));
        }
        let len = self.count();
        let indices = resolve_slice_indices(start, stop, step, len);
        if indices.is_empty() {
            return Ok(Strs::Fragmented { spans: Vec::new(), allocator: default_allocator() });
        }
        if step == 1 {
            let from = indices[0];
            let to = indices[indices.len() - 1] + 1;
            return Ok(self.contiguous_slice(from, to));
        }
        let spans = indices.iter().map(|&idx| self.span_at(idx)).collect();
        Ok(Strs::Fragmented { spans, allocator: default_allocator() })
    }

    fn contiguous_slice(&self, from: usize, to: usize) -> Strs {
        match self {
            Strs::U32TapeOwned { tape, .. } => Strs::U32TapeView {
                parent: Arc::new(OffsetWindow32 {
                    parent: Arc::clone(tape) as Arc<dyn ColumnarParent>,
                    offset_from: from,
                    offset_to: to,
                }),
            },
            Strs::U64TapeOwned { tape, .. } => Strs::U64TapeView {
                parent: Arc::new(OffsetWindow64 {
                    parent: Arc::clone(tape) as Arc<dyn ColumnarParent>,
                    offset_from: from,
                    offset_to: to,
                }),
            },
            Strs::U32TapeView { parent } => Strs::U32TapeView {
                parent: Arc::new(OffsetWindow32 { parent: Arc::clone(parent), offset_from: from, offset_to: to }),
            },
            Strs::U64TapeView { parent } => Strs::U64TapeView {
                parent: Arc::new(OffsetWindow64 { parent: Arc::clone(parent), offset_from: from, offset_to: to }),
            },
            Strs::Fragmented { spans, allocator } => Strs::Fragmented {
                spans: spans[from..to].to_vec(),
                allocator: Arc::clone(allocator),
            },
        }
    }

    /// Linear-scan membership test using kernel `equal` on exact-length
    /// matches.
    pub fn contains(&self, needle: &[u8]) -> bool {
        (0..self.count()).any(|i| crate::kernel::equal(self.bytes_at(i), needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strs::construct::from_sequence_copy;

    fn sample() -> Strs {
        let items: Vec<&[u8]> = vec![b"a", b"b", b"c", b"d", b"e"];
        from_sequence_copy(items.into_iter())
    }

    #[test]
    fn get_normalizes_negative_index() {
        let s = sample();
        assert_eq!(s.get(-1).unwrap().as_slice(), b"e");
        assert_eq!(s.get(0).unwrap().as_slice(), b"a");
        assert!(s.get(5).is_err());
        assert!(s.get(-6).is_err());
    }

    #[test]
    fn contiguous_slice_preserves_tape_view_layout() {
        let s = sample();
        let sliced = s.slice(Some(1), Some(4), 1).unwrap();
        assert_eq!(sliced.count(), 3);
        assert_eq!(sliced.bytes_at(0), b"b");
        assert_eq!(sliced.bytes_at(2), b"d");
        assert!(matches!(sliced, Strs::U32TapeView { .. }));
    }

    #[test]
    fn stepped_slice_yields_fragmented() {
        let s = sample();
        let sliced = s.slice(None, None, 2).unwrap();
        assert_eq!(sliced.count(), 3);
        assert_eq!(sliced.bytes_at(0), b"a");
        assert_eq!(sliced.bytes_at(1), b"c");
        assert_eq!(sliced.bytes_at(2), b"e");
        assert!(matches!(sliced, Strs::Fragmented { .. }));
    }

    #[test]
    fn negative_step_reverses_order() {
        let s = sample();
        let sliced = s.slice(None, None, -1).unwrap();
        let got: Vec<u8> = (0..sliced.count()).map(|i| sliced.bytes_at(i)[0]).collect();
        assert_eq!(got, vec![b'e', b'd', b'c', b'b', b'a']);
    }

    #[test]
    fn empty_slice_result_is_fragmented_with_zero_spans() {
        let s = sample();
        let sliced = s.slice(Some(3), Some(3), 1).unwrap();
        assert!(sliced.is_empty());
        assert!(matches!(sliced, Strs::Fragmented { .. }));
    }

    #[test]
    fn zero_step_rejected() {
        let s = sample();
        assert!(s.slice(None, None, 0).is_err());
    }

    #[test]
    fn membership_scan() {
        let s = sample();
        assert!(s.contains(b"c"));
        assert!(!s.contains(b"z"));
    }
}
