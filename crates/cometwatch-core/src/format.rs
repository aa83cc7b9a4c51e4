//! Display formatting helpers.
//!
//! Everything here degrades to a fixed sentinel instead of returning a
//! `Result`: rendering code calls these unconditionally and always gets a
//! printable string back.

use crate::countdown::{DeltaBreakdown, TimeTarget};

/// Sentinel rendered when a timestamp is missing or unparsable.
pub const TIMESTAMP_SENTINEL: &str = "N/A";

/// Zero-pad a clock field to two digits.
pub fn pad2(n: u64) -> String {
    format!("{n:02}")
}

/// Render a delta as `{days}d {hh}:{mm}:{ss}`.
///
/// Days are unpadded (they can exceed two digits); the clock fields are
/// always two digits.
pub fn format_delta(delta: &DeltaBreakdown) -> String {
    format!(
        "{}d {}:{}:{}",
        delta.days,
        pad2(u64::from(delta.hours)),
        pad2(u64::from(delta.minutes)),
        pad2(u64::from(delta.seconds)),
    )
}

/// Render a raw timestamp string for humans, in UTC.
///
/// Unparsable input yields [`TIMESTAMP_SENTINEL`], never an error.
pub fn format_timestamp(raw: &str) -> String {
    match TimeTarget::new(raw).parse() {
        Some(at) => at.format("%a, %d %b %Y %H:%M:%S UTC").to_string(),
        None => TIMESTAMP_SENTINEL.to_string(),
    }
}

/// [`format_timestamp`] lifted over optional fields.
pub fn format_timestamp_opt(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => format_timestamp(raw),
        None => TIMESTAMP_SENTINEL.to_string(),
    }
}
