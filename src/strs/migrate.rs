//! Layout migration / allocator replacement (§4.5).

use std::sync::Arc;

use crate::alloc::{same_allocator, Allocator};
use crate::config::OFFSET_WIDTH_PROMOTION_THRESHOLD;
use crate::error::{Error, Result};

use super::layout::{OwnedTape32, OwnedTape64, Strs};

impl Strs {
    /// Replaces the allocator that owns this collection's storage,
    /// applying the promotion/materialization/concatenation rules of §4.5.
    /// A no-op if `new_allocator` already compares equal to the current
    /// one. Any allocation failure leaves the original untouched (Rust's
    /// `Vec` either succeeds or this function returns before mutating
    /// `self`, since `self` is taken by shared reference).
    pub fn with_allocator(&self, new_allocator: Arc<dyn Allocator>) -> Result<Strs> {
        match self {
            Strs::U32TapeOwned { tape, allocator } => {
                if same_allocator(allocator, &new_allocator) {
                    return Ok(Strs::U32TapeOwned { tape: Arc::clone(tape), allocator: Arc::clone(allocator) });
                }
                crate::tracelevel!(3, "strands: migrating U32TapeOwned to a new allocator ({} bytes)", tape.data.len());
                Ok(Strs::U32TapeOwned {
                    tape: Arc::new(OwnedTape32 { data: tape.data.clone(), offsets: tape.offsets.clone() }),
                    allocator: new_allocator,
                })
            }
            Strs::U64TapeOwned { tape, allocator } => {
                if same_allocator(allocator, &new_allocator) {
                    return Ok(Strs::U64TapeOwned { tape: Arc::clone(tape), allocator: Arc::clone(allocator) });
                }
                crate::tracelevel!(3, "strands: migrating U64TapeOwned to a new allocator ({} bytes)", tape.data.len());
                Ok(Strs::U64TapeOwned {
                    tape: Arc::new(OwnedTape64 { data: tape.data.clone(), offsets: tape.offsets.clone() }),
                    allocator: new_allocator,
                })
            }
            Strs::U32TapeView { parent } => {
                crate::tracelevel!(3, "strands: materializing U32TapeView to an owned tape");
                let offsets = parent
                    .offsets32()
                    .ok_or_else(|| Error::Layout("U32TapeView parent missing 32-bit offsets".to_string()))?
                    .to_vec();
                let data = parent.data().to_vec();
                Ok(Strs::U32TapeOwned { tape: Arc::new(OwnedTape32 { data, offsets }), allocator: new_allocator })
            }
            Strs::U64TapeView { parent } => {
                crate::tracelevel!(3, "strands: materializing U64TapeView to an owned tape");
                let offsets = parent
                    .offsets64()
                    .ok_or_else(|| Error::Layout("U64TapeView parent missing 64-bit offsets".to_string()))?
                    .to_vec();
                let data = parent.data().to_vec();
                Ok(Strs::U64TapeOwned { tape: Arc::new(OwnedTape64 { data, offsets }), allocator: new_allocator })
            }
            Strs::Fragmented { spans, allocator } => {
                if same_allocator(allocator, &new_allocator) {
                    return Ok(Strs::Fragmented { spans: spans.clone(), allocator: Arc::clone(allocator) });
                }
                crate::tracelevel!(3, "strands: concatenating {} fragmented spans for an allocator swap", spans.len());
                let total: u64 = spans.iter().map(|s| s.len as u64).sum();
                let mut data = Vec::new();
                for span in spans {
                    data.extend_from_slice(&span.parent.as_bytes()[span.start..span.start + span.len]);
                }
                if total < OFFSET_WIDTH_PROMOTION_THRESHOLD {
                    let mut offsets = Vec::with_capacity(spans.len() + 1);
                    offsets.push(0u32);
                    let mut running = 0u32;
                    for span in spans {
                        running += span.len as u32;
                        offsets.push(running);
                    }
                    Ok(Strs::U32TapeOwned { tape: Arc::new(OwnedTape32 { data, offsets }), allocator: new_allocator })
                } else {
                    let mut offsets = Vec::with_capacity(spans.len() + 1);
                    offsets.push(0u64);
                    let mut running = 0u64;
                    for span in spans {
                        running += span.len as u64;
                        offsets.push(running);
                    }
                    Ok(Strs::U64TapeOwned { tape: Arc::new(OwnedTape64 { data, offsets }), allocator: new_allocator })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::default_allocator;
    use crate::strs::construct::from_sequence_copy;

    #[test]
    fn migration_preserves_len_and_content() {
        let items: Vec<&[u8]> = vec![b"foo", b"bar"];
        let s = from_sequence_copy(items.into_iter());
        let migrated = s.with_allocator(default_allocator()).unwrap();
        assert_eq!(migrated.count(), s.count());
        for i in 0..s.count() {
            assert_eq!(migrated.bytes_at(i), s.bytes_at(i));
        }
    }

    #[test]
    fn same_allocator_is_a_no_op_identity() {
        let items: Vec<&[u8]> = vec![b"foo"];
        let s = from_sequence_copy(items.into_iter());
        let a = if let Strs::U32TapeOwned { allocator, .. } = &s { Arc::clone(allocator) } else { unreachable!() };
        let migrated = s.with_allocator(a).unwrap();
        assert_eq!(migrated.bytes_at(0), b"foo");
    }

    #[test]
    fn view_migration_materializes_to_owned() {
        let items: Vec<&[u8]> = vec![b"a", b"b", b"c"];
        let s = from_sequence_copy(items.into_iter());
        let view = s.slice(Some(0), Some(3), 1).unwrap();
        assert!(matches!(view, Strs::U32TapeView { .. }));
        let migrated = view.with_allocator(default_allocator()).unwrap();
        assert!(matches!(migrated, Strs::U32TapeOwned { .. }));
        assert_eq!(migrated.count(), 3);
        assert_eq!(migrated.bytes_at(1), b"b");
    }

    #[test]
    fn fragmented_migration_concatenates_spans() {
        let s = Strs::Fragmented { spans: Vec::new(), allocator: default_allocator() };
        let migrated = s.with_allocator(default_allocator()).unwrap();
        assert!(migrated.is_empty());
    }
}
