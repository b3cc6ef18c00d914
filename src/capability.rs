//! Version and capability probes (§6). Mirrors this crate's top-level
//! `version_number()`/`version_string()` convention, extended with a
//! capability bitmask describing which kernel backend is active.

use std::sync::atomic::{AtomicU32, Ordering};

pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;

/// The only backend this build ships. Kept as a named bit rather than a
/// bare `1` so a future SIMD backend has somewhere to attach its own flag
/// without renumbering this one.
pub const CAPABILITY_BASELINE: u32 = 1 << 0;

static ACTIVE_CAPABILITIES: AtomicU32 = AtomicU32::new(CAPABILITY_BASELINE);

/// `(major, minor, patch)`.
pub fn version() -> (u32, u32, u32) {
    (VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH)
}

pub fn version_string() -> String {
    format!("{VERSION_MAJOR}.{VERSION_MINOR}.{VERSION_PATCH}")
}

/// The capability bitmask currently in effect.
pub fn capabilities() -> u32 {
    ACTIVE_CAPABILITIES.load(Ordering::Relaxed)
}

/// Narrows active kernel dispatch to the intersection of `requested` and
/// what this build supports. Falls back to the baseline kernel if that
/// intersection is empty, rather than leaving no kernel selected.
pub fn reset_capabilities(requested: u32) {
    let supported = CAPABILITY_BASELINE;
    let intersection = requested & supported;
    let next = if intersection == 0 {
        crate::tracelevel!(1, "strands: requested capabilities {requested:#x} share nothing with {supported:#x}, falling back to baseline");
        CAPABILITY_BASELINE
    } else {
        intersection
    };
    crate::tracelevel!(2, "strands: active kernel capabilities now {next:#x}");
    ACTIVE_CAPABILITIES.store(next, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_reports_crate_version() {
        assert_eq!(version(), (VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH));
        assert!(!version_string().is_empty());
    }

    #[test]
    fn reset_capabilities_intersects_with_supported() {
        reset_capabilities(CAPABILITY_BASELINE);
        assert_eq!(capabilities(), CAPABILITY_BASELINE);
    }

    #[test]
    fn reset_capabilities_falls_back_to_baseline_when_empty() {
        reset_capabilities(1 << 31);
        assert_eq!(capabilities(), CAPABILITY_BASELINE);
        reset_capabilities(CAPABILITY_BASELINE);
    }
}
