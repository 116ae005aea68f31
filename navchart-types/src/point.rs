//! Point types flowing through the reconciliation pipeline.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::controls::MetricKind;

/// A timestamp as delivered by the data-fetch layer: text or epoch millis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Epoch milliseconds.
    Millis(i64),
    /// Free-form text, usually ISO-8601; may be malformed.
    Text(String),
}

impl fmt::Display for RawTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millis(ms) => write!(f, "{ms}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RawTimestamp {
    fn from(ms: i64) -> Self {
        Self::Millis(ms)
    }
}

impl From<&str> for RawTimestamp {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawTimestamp {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<DateTime<Utc>> for RawTimestamp {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Millis(ts.timestamp_millis())
    }
}

/// One sample as produced by the data-fetch layer. Immutable; may be malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    /// Raw timestamp.
    pub timestamp: RawTimestamp,
    /// Sample value.
    pub value: f64,
    /// Metric this sample belongs to.
    #[serde(rename = "metricKind")]
    pub metric: MetricKind,
    /// Optional provenance label from the producer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl RawPoint {
    /// Build a raw point for an arbitrary metric.
    pub fn new(timestamp: impl Into<RawTimestamp>, value: f64, metric: MetricKind) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
            metric,
            source: None,
        }
    }

    /// Build a raw NAV sample.
    pub fn nav(timestamp: impl Into<RawTimestamp>, value: f64) -> Self {
        Self::new(timestamp, value, MetricKind::Nav)
    }

    /// Build a raw yield sample.
    pub fn yield_pct(timestamp: impl Into<RawTimestamp>, value: f64) -> Self {
        Self::new(timestamp, value, MetricKind::Yield)
    }

    /// Attach a provenance label.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A merged sample keyed by a canonical timestamp.
///
/// `ts` is always whole milliseconds and `iso` is its canonical RFC 3339
/// rendering, so either may serve as the key. Points from real data carry at
/// least one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    /// Canonical ISO-8601 timestamp (`2025-04-04T18:33:14.324Z`).
    pub iso: String,
    /// Parsed instant.
    pub ts: DateTime<Utc>,
    /// NAV value at this instant, if sampled.
    pub nav: Option<f64>,
    /// Yield value at this instant, if sampled.
    #[serde(rename = "yield")]
    pub yield_pct: Option<f64>,
}

impl NormalizedPoint {
    /// Canonical sort key.
    #[must_use]
    pub fn epoch_millis(&self) -> i64 {
        self.ts.timestamp_millis()
    }

    /// Value carried for `metric`, if any.
    #[must_use]
    pub const fn value(&self, metric: MetricKind) -> Option<f64> {
        match metric {
            MetricKind::Nav => self.nav,
            MetricKind::Yield => self.yield_pct,
        }
    }
}

/// Where a dense point's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointOrigin {
    /// A real sample sits exactly at this instant.
    Observed,
    /// Values were interpolated, held, or filled from fallback constants.
    Interpolated,
    /// Part of the deterministic fallback series; no real data exists.
    Synthetic,
}

impl PointOrigin {
    /// Lowercase label used in exports and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Observed => "observed",
            Self::Interpolated => "interpolated",
            Self::Synthetic => "synthetic",
        }
    }
}

/// A render-ready point on the evenly spaced timeline. Never carries a
/// missing or non-finite metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DensePoint {
    /// Canonical ISO-8601 timestamp.
    #[serde(rename = "timestamp")]
    pub iso: String,
    /// Instant of this point.
    #[serde(rename = "epochMillis", with = "chrono::serde::ts_milliseconds")]
    pub ts: DateTime<Utc>,
    /// Human-readable label for the axis and tooltips.
    pub time_formatted: String,
    /// NAV value.
    pub nav: f64,
    /// Yield value.
    #[serde(rename = "yield")]
    pub yield_pct: f64,
    /// Provenance of the values.
    pub origin: PointOrigin,
}

impl DensePoint {
    /// Canonical sort key.
    #[must_use]
    pub fn epoch_millis(&self) -> i64 {
        self.ts.timestamp_millis()
    }

    /// Value for `metric`.
    #[must_use]
    pub const fn value(&self, metric: MetricKind) -> f64 {
        match metric {
            MetricKind::Nav => self.nav,
            MetricKind::Yield => self.yield_pct,
        }
    }

    /// True unless a real sample sits exactly at this instant.
    #[must_use]
    pub const fn is_interpolated(&self) -> bool {
        !matches!(self.origin, PointOrigin::Observed)
    }
}

/// Y-axis bounds for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDomain {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl AxisDomain {
    /// Construct a domain from its bounds.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the domain.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `v` lies inside the closed domain.
    #[must_use]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Axis domains for both metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domains {
    /// NAV axis.
    pub nav: AxisDomain,
    /// Yield axis.
    #[serde(rename = "yield")]
    pub yield_pct: AxisDomain,
}

impl Domains {
    /// Domain for `metric`.
    #[must_use]
    pub const fn get(&self, metric: MetricKind) -> AxisDomain {
        match metric {
            MetricKind::Nav => self.nav,
            MetricKind::Yield => self.yield_pct,
        }
    }
}
