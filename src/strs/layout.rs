//! The five-variant tagged union at the heart of `Strs` (§3, §4.4).

use std::fmt;
use std::sync::Arc;

use crate::alloc::Allocator;
use crate::view::ParentBytes;

/// A parent that additionally exposes an Arrow-style tape: a contiguous
/// data buffer plus a monotonically non-decreasing offsets array. This is
/// the Rust shape of "a columnar array capsule" (§4.4, §6) — the parent of
/// a `U32TapeView`/`U64TapeView`.
pub trait ColumnarParent: fmt::Debug + Send + Sync {
    fn data(&self) -> &[u8];
    fn offsets32(&self) -> Option<&[u32]> {
        None
    }
    fn offsets64(&self) -> Option<&[u64]> {
        None
    }
}

impl fmt::Debug for dyn ColumnarParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnarParent").field("bytes", &self.data().len()).finish()
    }
}

/// An owned columnar buffer pair, used both as the storage behind
/// `*TapeOwned` variants and as the parent behind a view constructed from
/// in-process buffers (as opposed to a foreign Arrow capsule).
#[derive(Debug)]
pub struct OwnedTape32 {
    pub data: Vec<u8>,
    pub offsets: Vec<u32>,
}

impl ColumnarParent for OwnedTape32 {
    fn data(&self) -> &[u8] {
        &self.data
    }
    fn offsets32(&self) -> Option<&[u32]> {
        Some(&self.offsets)
    }
}

impl ParentBytes for OwnedTape32 {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[derive(Debug)]
pub struct OwnedTape64 {
    pub data: Vec<u8>,
    pub offsets: Vec<u64>,
}

impl ColumnarParent for OwnedTape64 {
    fn data(&self) -> &[u8] {
        &self.data
    }
    fn offsets64(&self) -> Option<&[u64]> {
        Some(&self.offsets)
    }
}

impl ParentBytes for OwnedTape64 {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// One `(parent, start, length)` span into a parent's bytes, used by the
/// `Fragmented` layout. Each span carries its own parent handle rather than
/// the collection sharing one: this lets `Fragmented` represent both "many
/// spans into one haystack" (split engines clone the same `Arc` cheaply
/// into every span) and "one span per independently owned string" (built
/// from a sequence of unrelated sources) without two different shapes.
#[derive(Clone)]
pub struct Span {
    pub parent: Arc<dyn ParentBytes>,
    pub start: usize,
    pub len: usize,
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Span").field("start", &self.start).field("len", &self.len).finish()
    }
}

/// The five-variant string-collection layout.
///
/// Implementations must not expose the variant tag to callers directly;
/// all public operations on `Strs` pattern-match internally.
pub enum Strs {
    U32TapeOwned { tape: Arc<OwnedTape32>, allocator: Arc<dyn Allocator> },
    U64TapeOwned { tape: Arc<OwnedTape64>, allocator: Arc<dyn Allocator> },
    U32TapeView { parent: Arc<dyn ColumnarParent> },
    U64TapeView { parent: Arc<dyn ColumnarParent> },
    Fragmented { spans: Vec<Span>, allocator: Arc<dyn Allocator> },
}

impl fmt::Debug for Strs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::strs::repr::debug_bounded(self, f)
    }
}

impl Strs {
    /// Number of strings in the collection.
    pub fn count(&self) -> usize {
        match self {
            Strs::U32TapeOwned { tape, .. } => tape.offsets.len().saturating_sub(1),
            Strs::U64TapeOwned { tape, .. } => tape.offsets.len().saturating_sub(1),
            Strs::U32TapeView { parent } => {
                parent.offsets32().map(|o| o.len().saturating_sub(1)).unwrap_or(0)
            }
            Strs::U64TapeView { parent } => {
                parent.offsets64().map(|o| o.len().saturating_sub(1)).unwrap_or(0)
            }
            Strs::Fragmented { spans, .. } => spans.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Raw bytes for the i-th element, without bounds-checking against a
    /// public index-normalization policy (callers use `subscript::get`).
    pub(crate) fn bytes_at(&self, i: usize) -> &[u8] {
        match self {
            Strs::U32TapeOwned { tape, .. } => {
                let (a, b) = (tape.offsets[i] as usize, tape.offsets[i + 1] as usize);
                &tape.data[a..b]
            }
            Strs::U64TapeOwned { tape, .. } => {
                let (a, b) = (tape.offsets[i] as usize, tape.offsets[i + 1] as usize);
                &tape.data[a..b]
            }
            Strs::U32TapeView { parent } => {
                let offsets = parent.offsets32().expect("U32TapeView parent without 32-bit offsets");
                let (a, b) = (offsets[i] as usize, offsets[i + 1] as usize);
                &parent.data()[a..b]
            }
            Strs::U64TapeView { parent } => {
                let offsets = parent.offsets64().expect("U64TapeView parent without 64-bit offsets");
                let (a, b) = (offsets[i] as usize, offsets[i + 1] as usize);
                &parent.data()[a..b]
            }
            Strs::Fragmented { spans, .. } => {
                let span = &spans[i];
                &span.parent.as_bytes()[span.start..span.start + span.len]
            }
        }
    }

    /// Total byte length across all elements, used to choose 32- vs 64-bit
    /// offset width during construction/migration.
    pub fn total_bytes(&self) -> u64 {
        (0..self.count()).map(|i| self.bytes_at(i).len() as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::default_allocator;

    fn owned32(strings: &[&[u8]]) -> Strs {
        let mut data = Vec::new();
        let mut offsets = vec![0u32];
        for s in strings {
            data.extend_from_slice(s);
            offsets.push(data.len() as u32);
        }
        Strs::U32TapeOwned {
            tape: Arc::new(OwnedTape32 { data, offsets }),
            allocator: default_allocator(),
        }
    }

    #[test]
    fn count_and_bytes_at_match_input() {
        let s = owned32(&[b"a", b"bb", b"ccc"]);
        assert_eq!(s.count(), 3);
        assert_eq!(s.bytes_at(0), b"a");
        assert_eq!(s.bytes_at(1), b"bb");
        assert_eq!(s.bytes_at(2), b"ccc");
    }

    #[test]
    fn empty_fragmented_has_zero_count() {
        let s = Strs::Fragmented { spans: vec![], allocator: default_allocator() };
        assert!(s.is_empty());
        assert_eq!(s.total_bytes(), 0);
    }
}
