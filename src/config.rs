//! config.rs — compile-time configuration constants.
//!
//! Small constants file in the same spirit as a platform-configuration header:
//! one named constant per tunable, with a line on what it governs and why the
//! default was picked.

/// Byte cap for the bounded `Debug` rendering of a `Strs` (§4.10's `repr`).
/// Past this many bytes of rendered output the list is truncated with an
/// ellipsis marker. `Display` output is not bounded by this constant.
pub const REPR_BYTE_CAP: usize = 1024;

/// Threshold (in bytes) at or beyond which columnar/tape constructors choose
/// 64-bit offsets over 32-bit offsets.
pub const OFFSET_WIDTH_PROMOTION_THRESHOLD: u64 = u32::MAX as u64;

/// Small-set threshold below which byte-set scans use a direct `memchr`
/// family call instead of a 256-bit bitmap scan.
pub const BYTESET_SMALL_SET_MAX: usize = 3;

/// Default XXH3 seed used when a caller does not supply one.
pub const DEFAULT_HASH_SEED: u64 = 0;
