//! Compilation time of a build.

use chrono::{DateTime, Utc};

/// Instant a build pass produced its summary.
pub type Timestamp = DateTime<Utc>;

/// Stamp for a build finishing now.
#[must_use]
pub fn compiled_at() -> Timestamp {
    Utc::now()
}

/// Human form of a compilation time, as printed in firmware banners
/// (`Oct 16 2026, 09:05:00`).
#[must_use]
pub fn banner(stamp: Timestamp) -> String {
    stamp.format("%b %d %Y, %H:%M:%S").to_string()
}
