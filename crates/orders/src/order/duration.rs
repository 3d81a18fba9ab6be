//! Elapsed delivery duration.

use chrono::{DateTime, Utc};

/// Format the absolute elapsed time between two instants as `"{H}h {M}m"`.
///
/// Whole hours plus leftover whole minutes, truncated (never rounded up).
/// The difference is taken as an absolute value, so an inverted pair still
/// yields a non-negative duration. There is no upper bound; multi-day spans
/// simply render hour counts of 24 and above.
#[must_use]
pub fn delivery_duration(start: DateTime<Utc>, finish: DateTime<Utc>) -> String {
    let elapsed = (finish - start).abs();
    let hours = elapsed.num_hours();
    let minutes = elapsed.num_minutes() % 60;
    format!("{hours}h {minutes}m")
}
