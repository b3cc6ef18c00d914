//! Display forms (§4.10): an unbounded `Display` rendering, and a
//! size-bounded `Debug` rendering that truncates once a fixed byte budget is
//! spent (so a REPL or log line printing a multi-gigabyte collection doesn't
//! hang or flood its output).

use std::fmt;

use crate::config::REPR_BYTE_CAP;

use super::layout::Strs;

fn write_escaped_element(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    match std::str::from_utf8(bytes) {
        Ok(s) => {
            f.write_str("'")?;
            for c in s.chars() {
                if c == '\'' || c == '\\' {
                    f.write_str("\\")?;
                }
                write!(f, "{c}")?;
            }
            f.write_str("'")
        }
        Err(_) => {
            f.write_str("b'")?;
            for b in bytes {
                write!(f, "\\x{b:02x}")?;
            }
            f.write_str("'")
        }
    }
}

fn write_elements(s: &Strs, f: &mut fmt::Formatter<'_>, bounded: bool) -> fmt::Result {
    f.write_str("[")?;
    let count = s.count();
    let mut budget = REPR_BYTE_CAP;
    for i in 0..count {
        if i > 0 {
            f.write_str(", ")?;
        }
        let bytes = s.bytes_at(i);
        if bounded && budget == 0 {
            write!(f, "... ({} more)", count - i)?;
            return f.write_str("]");
        }
        write_escaped_element(f, bytes)?;
        if bounded {
            budget = budget.saturating_sub(bytes.len());
        }
    }
    f.write_str("]")
}

/// The `Debug` rendering used by `Strs`'s own `impl Debug`, bounded to
/// `REPR_BYTE_CAP` total bytes across all elements before truncating.
/// Carries the `Strs` identifier prefix per §4.10, which is what
/// distinguishes it from `Display`'s bare bracketed list.
pub fn debug_bounded(s: &Strs, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Strs(")?;
    write_elements(s, f, true)?;
    f.write_str(")")
}

/// Unbounded: every element, however large the collection.
impl fmt::Display for Strs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(self, f, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strs::construct::from_sequence_copy;

    #[test]
    fn display_renders_every_element() {
        let items: Vec<&[u8]> = vec![b"a", b"b", b"c"];
        let s = from_sequence_copy(items.into_iter());
        assert_eq!(s.to_string(), "['a', 'b', 'c']");
    }

    #[test]
    fn display_escapes_invalid_utf8() {
        let items: Vec<&[u8]> = vec![&[0xff, 0xfe]];
        let s = from_sequence_copy(items.into_iter());
        assert_eq!(s.to_string(), "[b'\\xff\\xfe']");
    }

    #[test]
    fn debug_truncates_once_byte_budget_is_spent() {
        let big = vec![b'x'; REPR_BYTE_CAP + 10];
        let items: Vec<&[u8]> = vec![big.as_slice(), b"tail"];
        let s = from_sequence_copy(items.into_iter());
        let rendered = format!("{s:?}");
        assert!(rendered.contains("more"));
        assert!(!rendered.contains("tail"));
    }

    #[test]
    fn debug_does_not_truncate_small_collections() {
        let items: Vec<&[u8]> = vec![b"a", b"b"];
        let s = from_sequence_copy(items.into_iter());
        let rendered = format!("{s:?}");
        assert_eq!(rendered, "Strs(['a', 'b'])");
    }

    #[test]
    fn debug_carries_the_identifier_prefix_display_does_not() {
        let items: Vec<&[u8]> = vec![b"a", b"b"];
        let s = from_sequence_copy(items.into_iter());
        assert_eq!(format!("{s:?}"), "Strs(['a', 'b'])");
        assert_eq!(s.to_string(), "['a', 'b']");
    }
}
