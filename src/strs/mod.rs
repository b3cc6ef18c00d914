//! `Strs` — a columnar collection of byte strings (§3, §4.4–§4.10).
//!
//! Submodules split the type's operations by concern; all of them add
//! methods or trait impls onto the single `Strs` enum defined in `layout`.

mod bulk;
mod compare;
mod construct;
mod layout;
mod migrate;
mod repr;
mod subscript;

pub use bulk::{argsort, sample, shuffled, sorted};
pub use compare::compare_with_iter;
pub use construct::{empty, from_iterable_copy, from_iterable_view_rejected, from_sequence_copy, from_sequence_view};
pub use layout::{ColumnarParent, OwnedTape32, OwnedTape64, Span, Strs};
