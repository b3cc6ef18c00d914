//! A high-throughput byte-string processing library: substring search,
//! splitting (eager and lazy), ordered comparison, byte-set scanning,
//! byte-table translation, hashing, and bulk operations (sort, argsort,
//! shuffle, sample, subscript/slice) over collections of strings.

pub mod alloc;
pub mod arrow;
pub mod byteset;
pub mod capability;
pub mod config;
pub mod error;
pub mod kernel;
pub mod split;
pub mod strs;
pub mod trace;
pub mod view;
pub mod write;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level convenience re-exports for the most common API entry points.
// ─────────────────────────────────────────────────────────────────────────────

/// The non-owning byte view bound to a parent buffer.
pub use view::{ParentBytes, Str};

/// The multi-layout string-collection type and its free-function surface.
pub use strs::{
    argsort, compare_with_iter, empty as strs_empty, from_iterable_copy, from_iterable_view_rejected,
    from_sequence_copy, from_sequence_view, sample, shuffled, sorted, ColumnarParent, OwnedTape32, OwnedTape64, Span,
    Strs,
};

/// The shared error type and result alias.
pub use error::{Error, Result};

/// The pluggable allocator abstraction.
pub use alloc::{default_allocator, same_allocator, Allocator, SystemAllocator};

/// Byte-search, ordering, hashing, and table-lookup kernels.
pub use kernel::Order;

/// Compact byte-set representation, used by split-by-byte-set and
/// `splitlines`.
pub use byteset::ByteSet;

/// The lazy split iterator.
pub use split::SplitIter;

/// The Arrow C Data Interface adapter.
pub use arrow::{import_copy, import_view, ArrowArray, ArrowSchema};

/// Write a view's bytes to a new file.
pub use write::write_to;

/// Returns this crate's `(major, minor, patch)` version.
pub fn version_number() -> (u32, u32, u32) {
    capability::version()
}

/// Returns this crate's version string (e.g. `"0.1.0"`).
pub fn version_string() -> String {
    capability::version_string()
}
