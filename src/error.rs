//! Error type shared across the crate.
//!
//! One flat enum rather than per-module error types, since every public
//! operation here ultimately fails for one of a small number of reasons and
//! callers generally want to match on the kind, not the call site.

use std::fmt;

/// The error type returned by fallible operations in this crate.
#[derive(Debug)]
pub enum Error {
    /// A supplied argument was out of range or otherwise not acceptable:
    /// empty separator, negative `bound`, malformed lookup table size.
    InvalidArgument(String),
    /// A parent object could not be exported as a contiguous byte window,
    /// or an iterable element was not string-like.
    TypeMismatch(String),
    /// An integer subscript fell outside `[0, len)`.
    IndexOutOfRange { index: i64, len: usize },
    /// The operation is not supported for the given inputs (e.g. a slice
    /// step other than 1, or view mode on a one-shot iterator).
    Unsupported(String),
    /// An allocation failed.
    OutOfMemory,
    /// A file I/O operation failed.
    OsError(std::io::Error),
    /// A lookup (e.g. `index`) found no match.
    NotFound,
    /// A `Strs` was found holding an unrecognized variant tag. This
    /// indicates memory corruption or a build-time layout mismatch and is
    /// not expected to occur; surfaced rather than panicking so a caller at
    /// a process boundary can still fail gracefully.
    Layout(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::TypeMismatch(msg) => write!(f, "type mismatch: {msg}"),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Error::Unsupported(msg) => write!(f, "unsupported: {msg}"),
            Error::OutOfMemory => write!(f, "allocation failed"),
            Error::OsError(e) => write!(f, "os error: {e}"),
            Error::NotFound => write!(f, "not found"),
            Error::Layout(msg) => write!(f, "corrupt layout: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OsError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::OsError(e)
    }
}

/// Convenience alias used throughout the crate's public API.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_index_out_of_range() {
        let e = Error::IndexOutOfRange { index: -5, len: 3 };
        assert_eq!(e.to_string(), "index -5 out of range for length 3");
    }

    #[test]
    fn os_error_round_trips_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::OsError(_)));
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn display_covers_every_variant() {
        let variants = [
            Error::InvalidArgument("x".into()),
            Error::TypeMismatch("x".into()),
            Error::IndexOutOfRange { index: 0, len: 0 },
            Error::Unsupported("x".into()),
            Error::OutOfMemory,
            Error::OsError(std::io::Error::new(std::io::ErrorKind::Other, "x")),
            Error::NotFound,
            Error::Layout("x".into()),
        ];
        for v in variants {
            assert!(!v.to_string().is_empty());
        }
    }
}
