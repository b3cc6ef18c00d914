//! Split engines (§4.7): eager forward/reverse split and a lazy,
//! state-machine-based iterator, all sharing one matcher over a small
//! `SplitPattern` enum rather than duplicating control flow per case.

use std::sync::Arc;

use crate::alloc::default_allocator;
use crate::byteset::{line_break_set, ByteSet};
use crate::error::{Error, Result};
use crate::kernel;
use crate::strs::{Span, Strs};
use crate::view::{ParentBytes, Str};

#[derive(Clone)]
enum SplitPattern {
    Needle(Str),
    ByteSet(ByteSet),
}

/// Options shared by the eager drivers and the lazy iterator.
#[derive(Clone, Copy)]
struct SplitOpts {
    is_reverse: bool,
    include_match: bool,
    max_parts: Option<usize>,
}

fn validate_pattern(pattern: &SplitPattern) -> Result<()> {
    match pattern {
        SplitPattern::Needle(sep) if sep.is_empty() => {
            Err(Error::InvalidArgument("split separator must not be empty".to_string()))
        }
        SplitPattern::ByteSet(set) if set.is_empty() => {
            Err(Error::InvalidArgument("split byte-set must not be empty".to_string()))
        }
        _ => Ok(()),
    }
}

/// Finds the next match in `window` per `pattern`, searching forward or
/// backward. Returns `(position, match_length)`, both relative to `window`.
fn find_match(window: &[u8], pattern: &SplitPattern, reverse: bool) -> Option<(usize, usize)> {
    match pattern {
        SplitPattern::Needle(sep) => {
            let needle = sep.as_slice();
            let pos = if reverse { kernel::rfind(window, needle) } else { kernel::find(window, needle) };
            pos.map(|p| (p, needle.len()))
        }
        SplitPattern::ByteSet(set) => {
            let pos = if reverse { kernel::rfind_byte_from(window, set) } else { kernel::find_byte_from(window, set) };
            pos.map(|p| (p, 1))
        }
    }
}

/// Eager forward/reverse split driver. Always returns `Fragmented`, parented
/// on `haystack`'s own parent.
fn split_driver(haystack: &Str, pattern: SplitPattern, opts: SplitOpts) -> Result<Strs> {
    validate_pattern(&pattern)?;
    let (parent, base_start, total_len) = haystack.parent_and_range();
    let text = haystack.as_slice();
    debug_assert_eq!(text.len(), total_len);

    let mut spans = Vec::new();
    if !opts.is_reverse {
        let mut current_start = 0usize;
        let mut remaining = opts.max_parts;
        loop {
            if remaining == Some(0) {
                break;
            }
            let window = &text[current_start..];
            match find_match(window, &pattern, false) {
                Some((pos, mlen)) => {
                    let match_abs = current_start + pos;
                    let part_end = if opts.include_match { match_abs + mlen } else { match_abs };
                    spans.push(Span {
                        parent: Arc::clone(&parent),
                        start: base_start + current_start,
                        len: part_end - current_start,
                    });
                    current_start = match_abs + mlen;
                    if let Some(n) = remaining.as_mut() {
                        *n -= 1;
                    }
                }
                None => break,
            }
        }
        spans.push(Span { parent: Arc::clone(&parent), start: base_start + current_start, len: text.len() - current_start });
    } else {
        let mut current_end = text.len();
        let mut remaining = opts.max_parts;
        loop {
            if remaining == Some(0) {
                break;
            }
            let window = &text[..current_end];
            match find_match(window, &pattern, true) {
                Some((pos, mlen)) => {
                    let match_end = pos + mlen;
                    let part_start = if opts.include_match { pos } else { match_end };
                    spans.push(Span {
                        parent: Arc::clone(&parent),
                        start: base_start + part_start,
                        len: current_end - part_start,
                    });
                    current_end = pos;
                    if let Some(n) = remaining.as_mut() {
                        *n -= 1;
                    }
                }
                None => break,
            }
        }
        spans.push(Span { parent: Arc::clone(&parent), start: base_start, len: current_end });
        spans.reverse();
    }
    Ok(Strs::Fragmented { spans, allocator: default_allocator() })
}

/// A finite state machine yielding one `Str` per step: `active` (the normal
/// case) or `terminal` once `reached_tail` flips. `max_parts` decrements on
/// every non-tail yield; the tail yield always ends the iterator.
pub struct SplitIter {
    parent: Arc<dyn ParentBytes>,
    text_start: usize,
    text_len: usize,
    pattern: SplitPattern,
    opts: SplitOpts,
    reached_tail: bool,
}

impl Iterator for SplitIter {
    type Item = Str;

    fn next(&mut self) -> Option<Str> {
        if self.reached_tail {
            return None;
        }
        if self.opts.max_parts == Some(0) {
            self.reached_tail = true;
            return Some(Str::from_parent_range(
                Arc::clone(&self.parent),
                self.text_start as i64,
                (self.text_start + self.text_len) as i64,
            ));
        }
        let bytes = self.parent.as_bytes();
        let window = &bytes[self.text_start..self.text_start + self.text_len];
        match find_match(window, &self.pattern, self.opts.is_reverse) {
            Some((pos, mlen)) => {
                if let Some(n) = self.opts.max_parts.as_mut() {
                    *n -= 1;
                }
                if !self.opts.is_reverse {
                    let part_end = if self.opts.include_match { pos + mlen } else { pos };
                    let part = Str::from_parent_range(
                        Arc::clone(&self.parent),
                        self.text_start as i64,
                        (self.text_start + part_end) as i64,
                    );
                    let new_start = self.text_start + pos + mlen;
                    self.text_len = self.text_start + self.text_len - new_start;
                    self.text_start = new_start;
                    Some(part)
                } else {
                    let match_end = pos + mlen;
                    let part_start = if self.opts.include_match { pos } else { match_end };
                    let abs_start = self.text_start + part_start;
                    let abs_end = self.text_start + self.text_len;
                    let part = Str::from_parent_range(Arc::clone(&self.parent), abs_start as i64, abs_end as i64);
                    self.text_len = pos;
                    Some(part)
                }
            }
            None => {
                self.reached_tail = true;
                Some(Str::from_parent_range(
                    Arc::clone(&self.parent),
                    self.text_start as i64,
                    (self.text_start + self.text_len) as i64,
                ))
            }
        }
    }
}

fn split_iter(haystack: &Str, pattern: SplitPattern, opts: SplitOpts) -> Result<SplitIter> {
    validate_pattern(&pattern)?;
    let (parent, base_start, total_len) = haystack.parent_and_range();
    Ok(SplitIter { parent, text_start: base_start, text_len: total_len, pattern, opts, reached_tail: false })
}

impl Str {
    /// Splits on every occurrence of `sep`, left to right. `max_parts` caps
    /// the number of splits performed (`None` for unlimited); the result
    /// always has at most `max_parts + 1` elements.
    pub fn split(&self, sep: &Str, include_match: bool, max_parts: Option<usize>) -> Result<Strs> {
        split_driver(self, SplitPattern::Needle(sep.clone()), SplitOpts { is_reverse: false, include_match, max_parts })
    }

    /// Splits on every occurrence of `sep`, right to left; the returned
    /// order matches forward `split`, only the tail-split positions differ.
    pub fn rsplit(&self, sep: &Str, include_match: bool, max_parts: Option<usize>) -> Result<Strs> {
        split_driver(self, SplitPattern::Needle(sep.clone()), SplitOpts { is_reverse: true, include_match, max_parts })
    }

    /// Splits on every byte in `set`, left to right.
    pub fn split_byteset(&self, set: ByteSet, include_match: bool, max_parts: Option<usize>) -> Result<Strs> {
        split_driver(self, SplitPattern::ByteSet(set), SplitOpts { is_reverse: false, include_match, max_parts })
    }

    /// Splits on every byte in `set`, right to left.
    pub fn rsplit_byteset(&self, set: ByteSet, include_match: bool, max_parts: Option<usize>) -> Result<Strs> {
        split_driver(self, SplitPattern::ByteSet(set), SplitOpts { is_reverse: true, include_match, max_parts })
    }

    /// A lazy, left-to-right split iterator over occurrences of `sep`.
    pub fn split_iter(&self, sep: &Str, include_match: bool, max_parts: Option<usize>) -> Result<SplitIter> {
        split_iter(self, SplitPattern::Needle(sep.clone()), SplitOpts { is_reverse: false, include_match, max_parts })
    }

    /// A lazy, right-to-left split iterator over occurrences of `sep`. Parts
    /// are yielded starting from the end of the haystack.
    pub fn rsplit_iter(&self, sep: &Str, include_match: bool, max_parts: Option<usize>) -> Result<SplitIter> {
        split_iter(self, SplitPattern::Needle(sep.clone()), SplitOpts { is_reverse: true, include_match, max_parts })
    }

    /// Splits on the line-break byte set (§4.7). Two-byte line terminators
    /// are not recognized atomically: CR and LF each split independently.
    pub fn splitlines(&self, keep_linebreaks: bool) -> Strs {
        split_driver(
            self,
            SplitPattern::ByteSet(line_break_set()),
            SplitOpts { is_reverse: false, include_match: keep_linebreaks, max_parts: None },
        )
        .expect("line_break_set is never empty")
    }
}
