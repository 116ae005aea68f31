//! Shared helpers for instants, labels and interpolation.

use core::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use navchart_types::LabelFormat;

/// Drop sub-millisecond precision so an instant and its ISO rendering agree.
pub fn truncate_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}

/// Canonical ISO-8601 rendering (`2025-04-04T18:33:14.324Z`).
pub fn canonical_iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Axis/tooltip label in the configured timezone.
///
/// An invalid pattern falls back to the canonical ISO rendering.
pub fn time_label(ts: DateTime<Utc>, labels: &LabelFormat) -> String {
    format_in(ts, labels.timezone, &labels.format).unwrap_or_else(|| canonical_iso(ts))
}

/// Format `ts` in `tz` with a `strftime` pattern; `None` if the pattern is invalid.
pub fn format_in(ts: DateTime<Utc>, tz: chrono_tz::Tz, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", ts.with_timezone(&tz).format(pattern)).ok()?;
    Some(out)
}

/// Convert a std duration to a chrono delta, saturating on overflow.
pub fn delta(d: std::time::Duration) -> TimeDelta {
    TimeDelta::from_std(d).unwrap_or(TimeDelta::MAX)
}

/// Linear interpolation between `(t0, v0)` and `(t1, v1)` at `t`.
///
/// Collapses to `v0` when both instants coincide.
pub fn lerp(t0: i64, v0: f64, t1: i64, v1: f64, t: i64) -> f64 {
    if t1 == t0 {
        return v0;
    }
    #[allow(clippy::cast_precision_loss)]
    let frac = (t - t0) as f64 / (t1 - t0) as f64;
    let v = v0 + (v1 - v0) * frac;
    // rounding must not leave the segment
    v.clamp(v0.min(v1), v0.max(v1))
}
