//! Policy constants for the pipeline and the polling driver.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::controls::MetricKind;
use crate::error::NavchartError;
use crate::point::AxisDomain;

/// Constants substituted for a metric that has no sample at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallbackValues {
    /// NAV fallback (also the mean of the synthetic NAV series).
    pub nav: f64,
    /// Yield fallback (also the mean of the synthetic yield series).
    pub yield_pct: f64,
}

impl FallbackValues {
    /// Fallback for `metric`.
    #[must_use]
    pub const fn get(&self, metric: MetricKind) -> f64 {
        match metric {
            MetricKind::Nav => self.nav,
            MetricKind::Yield => self.yield_pct,
        }
    }
}

impl Default for FallbackValues {
    fn default() -> Self {
        Self {
            nav: 100.0,
            yield_pct: 1.6,
        }
    }
}

/// Dense timeline construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseConfig {
    /// Lower bound on the number of generated points.
    pub min_points: usize,
    /// Minimum nominal span of the timeline.
    pub min_span: Duration,
    /// Number of points in the synthetic fallback series.
    pub fallback_len: usize,
    /// Spacing between synthetic fallback points.
    pub fallback_spacing: Duration,
}

impl Default for DenseConfig {
    fn default() -> Self {
        Self {
            min_points: 20,
            min_span: Duration::from_secs(3_600),
            fallback_len: 10,
            fallback_spacing: Duration::from_secs(30 * 60),
        }
    }
}

/// Window filtering and its density safety nets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Below this many kept points the window is ignored.
    pub min_points: usize,
    /// Below this many points the result is boosted with interpolated points.
    pub boost_below: usize,
    /// Upper bound on points added by one boost.
    pub boost_max_extra: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_points: 5,
            boost_below: 10,
            boost_max_extra: 8,
        }
    }
}

/// Render-side point reduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownsampleConfig {
    /// Series shorter than this are returned unchanged.
    pub min_len: usize,
    /// Approximate number of points to keep.
    pub target_points: usize,
}

impl Default for DownsampleConfig {
    fn default() -> Self {
        Self {
            min_len: 20,
            target_points: 75,
        }
    }
}

/// Adaptive Y-axis scaling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Ranges narrower than this are treated as flat and amplified.
    pub flat_threshold: f64,
    /// Multiplier applied to a flat range.
    pub amplification: f64,
    /// Minimum span of an amplified range.
    pub min_span: f64,
    /// Fraction of the range added on each side of a non-flat range.
    pub padding_ratio: f64,
    /// Domain used for NAV when no value is present.
    pub nav_default: AxisDomain,
    /// Domain used for yield when no value is present.
    pub yield_default: AxisDomain,
}

impl DomainConfig {
    /// Default domain for `metric`.
    #[must_use]
    pub const fn default_for(&self, metric: MetricKind) -> AxisDomain {
        match metric {
            MetricKind::Nav => self.nav_default,
            MetricKind::Yield => self.yield_default,
        }
    }
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            flat_threshold: 0.1,
            amplification: 3.0,
            min_span: 0.2,
            padding_ratio: 0.1,
            nav_default: AxisDomain::new(99.0, 101.0),
            yield_default: AxisDomain::new(1.4, 1.8),
        }
    }
}

/// How instants are labelled for axes and tooltips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelFormat {
    /// Display timezone.
    pub timezone: chrono_tz::Tz,
    /// `strftime`-style pattern.
    pub format: String,
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            format: "%H:%M".to_string(),
        }
    }
}

/// CSV export layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Timezone of the human-readable timestamp column.
    pub timezone: chrono_tz::Tz,
    /// `strftime`-style pattern for the timestamp column.
    pub timestamp_format: String,
    /// Append an `origin` column (observed/interpolated/synthetic).
    pub include_origin: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            include_origin: false,
        }
    }
}

/// What the pipeline does when no valid sample exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum NoDataPolicy {
    /// Render the deterministic synthetic series, flagged as such.
    #[default]
    Synthetic,
    /// Return `NavchartError::NoData` so the caller can show a placeholder.
    Placeholder,
}

/// Every policy constant of the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Fallback constants per metric.
    pub fallback: FallbackValues,
    /// Dense timeline settings.
    pub dense: DenseConfig,
    /// Window filter settings.
    pub filter: FilterConfig,
    /// Downsampling settings.
    pub downsample: DownsampleConfig,
    /// Axis domain settings.
    pub domain: DomainConfig,
    /// Time label settings.
    pub labels: LabelFormat,
    /// CSV export settings.
    pub export: ExportConfig,
    /// Behavior when no data survives normalization.
    pub no_data: NoDataPolicy,
}

impl ChartConfig {
    /// Check that every constant is usable.
    ///
    /// # Errors
    /// Returns `NavchartError::InvalidArg` naming the first offending field.
    pub fn validate(&self) -> Result<(), NavchartError> {
        fn invalid(field: &str, why: &str) -> NavchartError {
            NavchartError::InvalidArg(format!("{field} {why}"))
        }

        if !self.fallback.nav.is_finite() {
            return Err(invalid("fallback.nav", "must be finite"));
        }
        if !self.fallback.yield_pct.is_finite() {
            return Err(invalid("fallback.yield_pct", "must be finite"));
        }
        if self.dense.min_points < 2 {
            return Err(invalid("dense.min_points", "must be at least 2"));
        }
        if self.dense.min_span.is_zero() {
            return Err(invalid("dense.min_span", "must be positive"));
        }
        if !fits_time_range(self.dense.min_span) {
            return Err(invalid("dense.min_span", "exceeds the representable time range"));
        }
        if self.dense.fallback_len == 0 {
            return Err(invalid("dense.fallback_len", "must be positive"));
        }
        if self.dense.fallback_spacing.is_zero() {
            return Err(invalid("dense.fallback_spacing", "must be positive"));
        }
        let fallback_span = u32::try_from(self.dense.fallback_len - 1)
            .ok()
            .and_then(|n| self.dense.fallback_spacing.checked_mul(n));
        if !fallback_span.is_some_and(fits_time_range) {
            return Err(invalid(
                "dense.fallback_spacing",
                "times fallback_len exceeds the representable time range",
            ));
        }
        if self.filter.boost_below < 2 {
            return Err(invalid("filter.boost_below", "must be at least 2"));
        }
        if self.downsample.min_len == 0 {
            return Err(invalid("downsample.min_len", "must be positive"));
        }
        if self.downsample.target_points == 0 {
            return Err(invalid("downsample.target_points", "must be positive"));
        }
        let d = &self.domain;
        for (field, v) in [
            ("domain.flat_threshold", d.flat_threshold),
            ("domain.amplification", d.amplification),
            ("domain.min_span", d.min_span),
            ("domain.padding_ratio", d.padding_ratio),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(invalid(field, "must be finite and non-negative"));
            }
        }
        if d.min_span <= 0.0 {
            return Err(invalid("domain.min_span", "must be positive"));
        }
        for (field, dom) in [
            ("domain.nav_default", d.nav_default),
            ("domain.yield_default", d.yield_default),
        ] {
            if !(dom.min.is_finite() && dom.max.is_finite()) || dom.max < dom.min {
                return Err(invalid(field, "must be finite with max >= min"));
            }
        }
        if d.nav_default.min < 0.0 {
            return Err(invalid("domain.nav_default", "must not be negative"));
        }
        Ok(())
    }
}

/// Whether `d` is no longer than the distance between chrono's earliest and
/// latest representable instants.
fn fits_time_range(d: Duration) -> bool {
    use chrono::{DateTime, Utc};
    let range = i128::from(DateTime::<Utc>::MAX_UTC.timestamp_millis())
        - i128::from(DateTime::<Utc>::MIN_UTC.timestamp_millis());
    u128::try_from(range).is_ok_and(|range| d.as_millis() <= range)
}

/// Polling driver cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Interval between source polls.
    pub poll_interval: Duration,
    /// Quiet period that coalesces bursts of triggers into one run.
    pub debounce: Duration,
    /// Upper bound on a single source call.
    pub fetch_timeout: Duration,
}

impl PollConfig {
    /// Check that the cadence is usable.
    ///
    /// # Errors
    /// Returns `NavchartError::InvalidArg` if the interval or timeout is zero.
    pub fn validate(&self) -> Result<(), NavchartError> {
        if self.poll_interval.is_zero() {
            return Err(NavchartError::InvalidArg(
                "poll.poll_interval must be positive".into(),
            ));
        }
        if self.fetch_timeout.is_zero() {
            return Err(NavchartError::InvalidArg(
                "poll.fetch_timeout must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(15),
            debounce: Duration::from_millis(100),
            fetch_timeout: Duration::from_secs(5),
        }
    }
}
