//! Minimal diagnostic-output infrastructure.
//!
//! Gated by a process-wide atomic level rather than a full logging
//! framework: this is a library, embedded in whatever logs its host
//! process uses, and only needs to surface a handful of internal decisions
//! (layout migrations, allocator churn, kernel backend selection) on
//! request.
//!
//! 0 = silent (default); 1 = warnings; 2 = normal; 3 = verbose.

use std::sync::atomic::{AtomicU32, Ordering};

static TRACE_LEVEL: AtomicU32 = AtomicU32::new(0);

/// Returns the current trace level.
#[inline]
pub fn trace_level() -> u32 {
    TRACE_LEVEL.load(Ordering::Relaxed)
}

/// Sets the trace level. Level 0 silences all `tracelevel!` output.
#[inline]
pub fn set_trace_level(level: u32) {
    TRACE_LEVEL.store(level, Ordering::Relaxed);
}

/// Emit to stderr when the current trace level is at or above `level`.
#[macro_export]
macro_rules! tracelevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::trace::trace_level() >= $level {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_silent() {
        assert_eq!(trace_level(), 0);
    }

    #[test]
    fn set_and_read_round_trips() {
        let prev = trace_level();
        set_trace_level(3);
        assert_eq!(trace_level(), 3);
        set_trace_level(prev);
    }
}
