//! Simple time helpers used by multiple services.

use chrono::{Datelike, Utc};

/// Current timestamp in milliseconds since the Unix epoch.
pub fn now_ms() -> u128 {
    u128::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Calendar year of the wall clock (UTC).
pub fn current_year() -> i32 {
    Utc::now().year()
}
