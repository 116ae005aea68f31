use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use navchart_types::{MetricKind, NavchartError, RawPoint, RawTimestamp};

use super::util::{canonical_iso, truncate_millis};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A validated instant with its canonical ISO-8601 rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInstant {
    /// Instant, truncated to whole milliseconds.
    pub ts: DateTime<Utc>,
    /// Canonical rendering of `ts`.
    pub iso: String,
}

impl NormalizedInstant {
    /// Canonicalize an instant.
    #[must_use]
    pub fn from_utc(ts: DateTime<Utc>) -> Self {
        let ts = truncate_millis(ts);
        Self {
            iso: canonical_iso(ts),
            ts,
        }
    }
}

/// A raw point that passed normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSample {
    /// Canonical instant.
    pub instant: NormalizedInstant,
    /// Finite sample value.
    pub value: f64,
    /// Metric the sample belongs to.
    pub metric: MetricKind,
}

/// Parse or repair one raw timestamp.
///
/// - Numbers, and strings made only of an optional sign and digits, are epoch
///   milliseconds.
/// - A string holding two concatenated ISO instants
///   (`2025-04-04T18:33:14.324Z2025-04-04T22:08:14.324Z`) is cut after its
///   first `Z` and only that prefix is parsed. This exists for one known
///   producer defect and should be fixed at the source.
/// - Remaining text must be RFC 3339, a naive `YYYY-MM-DD[T ]HH:MM:SS[.fff]`
///   (read as UTC) or a bare `YYYY-MM-DD` (UTC midnight).
///
/// ```
/// use navchart_core::{normalize_timestamp, RawTimestamp};
///
/// let raw = RawTimestamp::from("2025-04-04T18:33:14.324Z2025-04-04T22:08:14.324Z");
/// let instant = normalize_timestamp(&raw).unwrap();
/// assert_eq!(instant.iso, "2025-04-04T18:33:14.324Z");
/// ```
///
/// # Errors
/// Returns `NavchartError::Parse` carrying the raw input when no valid
/// instant can be recovered.
pub fn normalize_timestamp(raw: &RawTimestamp) -> Result<NormalizedInstant, NavchartError> {
    match raw {
        RawTimestamp::Millis(ms) => from_epoch_millis(*ms),
        RawTimestamp::Text(text) => parse_text(text),
    }
}

/// Normalize a raw point's timestamp and check its value.
///
/// # Errors
/// Returns `NavchartError::Parse` if the timestamp cannot be recovered or the
/// value is not finite.
pub fn normalize_point(point: &RawPoint) -> Result<NormalizedSample, NavchartError> {
    if !point.value.is_finite() {
        return Err(NavchartError::parse(
            point.value.to_string(),
            format!("non-finite {} value at {}", point.metric, point.timestamp),
        ));
    }
    let instant = normalize_timestamp(&point.timestamp)?;
    Ok(NormalizedSample {
        instant,
        value: point.value,
        metric: point.metric,
    })
}

fn from_epoch_millis(ms: i64) -> Result<NormalizedInstant, NavchartError> {
    DateTime::from_timestamp_millis(ms)
        .map(NormalizedInstant::from_utc)
        .ok_or_else(|| NavchartError::parse(ms.to_string(), "epoch milliseconds out of range"))
}

fn parse_text(raw: &str) -> Result<NormalizedInstant, NavchartError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NavchartError::parse(raw, "empty timestamp"));
    }
    if looks_like_epoch(trimmed) {
        let ms: i64 = trimmed
            .parse()
            .map_err(|_| NavchartError::parse(raw, "epoch milliseconds out of range"))?;
        return from_epoch_millis(ms);
    }
    let candidate = repair_concatenated(trimmed);
    parse_instant(candidate)
        .map(NormalizedInstant::from_utc)
        .ok_or_else(|| NavchartError::parse(raw, "not a recognized ISO-8601 instant"))
}

fn looks_like_epoch(s: &str) -> bool {
    let digits = s
        .strip_prefix('-')
        .or_else(|| s.strip_prefix('+'))
        .unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Cut a string after its first `Z` when more characters follow it.
pub(crate) fn repair_concatenated(s: &str) -> &str {
    match s.find('Z') {
        Some(idx) if idx + 1 < s.len() => {
            #[cfg(feature = "tracing")]
            tracing::debug!(raw = s, "repairing concatenated timestamp");
            &s[..=idx]
        }
        _ => s,
    }
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repair_leaves_single_instants_alone() {
        assert_eq!(
            repair_concatenated("2025-04-04T18:33:14.324Z"),
            "2025-04-04T18:33:14.324Z"
        );
        assert_eq!(
            repair_concatenated("2025-04-04T18:33:14+02:00"),
            "2025-04-04T18:33:14+02:00"
        );
    }

    #[test]
    fn repair_cuts_after_first_terminator() {
        assert_eq!(
            repair_concatenated("2025-04-04T18:33:14.324Z2025-04-04T22:08:14.324Z"),
            "2025-04-04T18:33:14.324Z"
        );
        assert_eq!(repair_concatenated("2025-04-04T18:33:14Zjunk"), "2025-04-04T18:33:14Z");
    }

    #[test]
    fn epoch_detection() {
        assert!(looks_like_epoch("1743791594324"));
        assert!(looks_like_epoch("-5"));
        assert!(!looks_like_epoch("-"));
        assert!(!looks_like_epoch("2025-04-04"));
        assert!(!looks_like_epoch("12.5"));
    }
}
