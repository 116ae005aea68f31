pub mod nav;
pub mod yield_pct;

use chrono::{DateTime, TimeDelta, Utc};

/// Start of every fixture trading day.
pub const DAY_OPEN: &str = "2025-04-04T09:00:00Z";

pub(crate) fn day_open() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(DAY_OPEN)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

pub(crate) fn minutes_after_open(minutes: i64) -> DateTime<Utc> {
    day_open() + TimeDelta::minutes(minutes)
}
