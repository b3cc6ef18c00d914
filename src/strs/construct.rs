//! Constructors (§4.4): build a `Strs` from a columnar array capsule
//! (handled separately in `crate::arrow`, since that path is Arrow-specific),
//! from an ordered sequence of strings, or from a finite iterable.

use std::sync::Arc;

use crate::alloc::default_allocator;
use crate::config::OFFSET_WIDTH_PROMOTION_THRESHOLD;
use crate::error::{Error, Result};
use crate::view::Str;

use super::layout::{OwnedTape32, OwnedTape64, Span, Strs};

/// An empty collection. Either requested mode yields the same thing: a
/// `Fragmented` layout with zero spans.
pub fn empty() -> Strs {
    Strs::Fragmented { spans: Vec::new(), allocator: default_allocator() }
}

/// Builds a `Fragmented` view over an existing random-access sequence of
/// `Str` views, without copying their bytes. Each element's own parent is
/// cloned into its span, so the returned collection keeps every element's
/// backing memory alive independently.
pub fn from_sequence_view(items: &[Str]) -> Strs {
    let spans = items
        .iter()
        .map(|s| {
            let (parent, start, len) = s.parent_and_range();
            Span { parent, start, len }
        })
        .collect();
    Strs::Fragmented { spans, allocator: default_allocator() }
}

/// Copies an ordered sequence of byte strings into an owned tape, choosing
/// 32- or 64-bit offsets based on total byte length.
pub fn from_sequence_copy<'a>(items: impl ExactSizeIterator<Item = &'a [u8]>) -> Strs {
    let count = items.len();
    let mut data = Vec::new();
    let mut lengths = Vec::with_capacity(count);
    for item in items {
        data.extend_from_slice(item);
        lengths.push(item.len());
    }
    build_owned_tape(data, &lengths)
}

/// Incrementally copies a finite, one-shot iterable into an owned tape,
/// promoting 32-bit offsets to 64-bit as soon as the running total crosses
/// the threshold.
pub fn from_iterable_copy<I>(items: I) -> Strs
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut data = Vec::new();
    let mut lengths = Vec::new();
    for item in items {
        let bytes = item.as_ref();
        data.extend_from_slice(bytes);
        lengths.push(bytes.len());
    }
    build_owned_tape(data, &lengths)
}

/// Rejected: a one-shot iterable cannot retain per-element references
/// safely, so "view" mode is unsupported for it (§4.4 table).
pub fn from_iterable_view_rejected() -> Error {
    Error::Unsupported("view mode is not supported for a one-shot iterable".to_string())
}

fn build_owned_tape(data: Vec<u8>, lengths: &[usize]) -> Strs {
    let total: u64 = lengths.iter().map(|&l| l as u64).sum();
    let allocator = default_allocator();
    if total < OFFSET_WIDTH_PROMOTION_THRESHOLD {
        let mut offsets = Vec::with_capacity(lengths.len() + 1);
        offsets.push(0u32);
        let mut running = 0u32;
        for &l in lengths {
            running += l as u32;
            offsets.push(running);
        }
        Strs::U32TapeOwned { tape: Arc::new(OwnedTape32 { data, offsets }), allocator }
    } else {
        let mut offsets = Vec::with_capacity(lengths.len() + 1);
        offsets.push(0u64);
        let mut running = 0u64;
        for &l in lengths {
            running += l as u64;
            offsets.push(running);
        }
        Strs::U64TapeOwned { tape: Arc::new(OwnedTape64 { data, offsets }), allocator }
    }
}

/// Builds an owned tape from borrowed byte slices, forcing the 64-bit
/// variant regardless of total size. Used by tests exercising the 2^32
/// boundary without allocating gigabytes of real data.
#[cfg(test)]
pub(crate) fn force_u64_tape(data: Vec<u8>, offsets: Vec<u64>) -> Strs {
    Strs::U64TapeOwned { tape: Arc::new(OwnedTape64 { data, offsets }), allocator: default_allocator() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_fragmented_with_zero_spans() {
        let s = empty();
        assert!(s.is_empty());
        assert!(matches!(s, Strs::Fragmented { .. }));
    }

    #[test]
    fn from_sequence_copy_round_trips_bytes() {
        let items: Vec<&[u8]> = vec![b"a", b"bb", b"ccc"];
        let s = from_sequence_copy(items.iter().copied());
        assert_eq!(s.count(), 3);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(s.bytes_at(i), *item);
        }
        assert!(matches!(s, Strs::U32TapeOwned { .. }));
    }

    #[test]
    fn from_sequence_view_shares_backing_memory() {
        let items = vec![Str::from_owned(b"hello".to_vec()), Str::from_owned(b"world".to_vec())];
        let s = from_sequence_view(&items);
        assert_eq!(s.count(), 2);
        assert_eq!(s.bytes_at(0), b"hello");
        assert_eq!(s.bytes_at(1), b"world");
    }

    #[test]
    fn from_iterable_copy_builds_tape() {
        let s = from_iterable_copy(vec![b"x".to_vec(), b"yy".to_vec()]);
        assert_eq!(s.count(), 2);
        assert_eq!(s.bytes_at(0), b"x");
        assert_eq!(s.bytes_at(1), b"yy");
    }

    #[test]
    fn force_u64_tape_round_trip() {
        let s = force_u64_tape(b"hi".to_vec(), vec![0, 2]);
        assert_eq!(s.bytes_at(0), b"hi");
        assert!(matches!(s, Strs::U64TapeOwned { .. }));
    }
}
