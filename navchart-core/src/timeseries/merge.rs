use std::collections::HashMap;

use navchart_types::{MetricKind, NavchartError, NormalizedPoint, RawPoint};

use super::normalize::normalize_point;

/// Output of merging the two metric series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedSeries {
    /// Union of all valid timestamps, sorted by epoch millis.
    pub points: Vec<NormalizedPoint>,
    /// Raw points dropped during normalization, in input order.
    pub rejected: Vec<NavchartError>,
}

impl MergedSeries {
    /// True when no valid point survived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of distinct canonical timestamps.
    #[must_use]
    pub fn distinct_timestamps(&self) -> usize {
        self.points.len()
    }

    /// Whether any merged point carries `metric`.
    #[must_use]
    pub fn carries(&self, metric: MetricKind) -> bool {
        self.points.iter().any(|p| p.value(metric).is_some())
    }
}

/// Accumulator keyed by canonical ISO string.
#[derive(Default)]
struct Accumulator {
    by_iso: HashMap<String, NormalizedPoint>,
    rejected: Vec<NavchartError>,
}

impl Accumulator {
    fn push(&mut self, raw: &RawPoint, metric: MetricKind) {
        let sample = match normalize_point(raw) {
            Ok(sample) => sample,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    metric = %metric,
                    raw = %raw.timestamp,
                    value = raw.value,
                    error = %err,
                    "dropping unparsable point"
                );
                self.rejected.push(err);
                return;
            }
        };
        let ts = sample.instant.ts;
        let entry = self
            .by_iso
            .entry(sample.instant.iso)
            .or_insert_with_key(|iso| NormalizedPoint {
                iso: iso.clone(),
                ts,
                nav: None,
                yield_pct: None,
            });
        // later samples overwrite earlier ones at the same instant
        match metric {
            MetricKind::Nav => entry.nav = Some(sample.value),
            MetricKind::Yield => entry.yield_pct = Some(sample.value),
        }
    }

    fn finish(self) -> MergedSeries {
        let mut points: Vec<NormalizedPoint> = self.by_iso.into_values().collect();
        points.sort_by_key(NormalizedPoint::epoch_millis);
        MergedSeries {
            points,
            rejected: self.rejected,
        }
    }
}

/// Merge the NAV and yield series into one timeline keyed by timestamp.
///
/// - Every raw point is normalized; failures are logged, collected in
///   `rejected`, and dropped.
/// - Samples meet only on exact canonical timestamp equality.
/// - The metric comes from the list a point arrived in.
/// - A duplicate sample for the same metric and timestamp overwrites the
///   earlier one.
/// - Points carrying only one metric are kept; the dense builder fills the
///   other one in.
///
/// ```
/// use navchart_core::{merge_series, RawPoint};
///
/// let nav = [RawPoint::nav("2025-04-04T10:00:00Z", 100.0), RawPoint::nav("bogus", 1.0)];
/// let yld = [RawPoint::yield_pct("2025-04-04T10:00:00.000Z", 1.5)];
/// let merged = merge_series(&nav, &yld);
/// assert_eq!(merged.points.len(), 1);
/// assert_eq!(merged.points[0].nav, Some(100.0));
/// assert_eq!(merged.points[0].yield_pct, Some(1.5));
/// assert_eq!(merged.rejected.len(), 1);
/// ```
#[must_use]
pub fn merge_series(nav: &[RawPoint], yield_pct: &[RawPoint]) -> MergedSeries {
    let mut acc = Accumulator::default();
    for (metric, series) in [(MetricKind::Nav, nav), (MetricKind::Yield, yield_pct)] {
        for raw in series {
            #[cfg(feature = "tracing")]
            if raw.metric != metric {
                tracing::debug!(
                    expected = %metric,
                    found = %raw.metric,
                    raw = %raw.timestamp,
                    "point metric disagrees with its series"
                );
            }
            acc.push(raw, metric);
        }
    }
    acc.finish()
}

/// Merge a single list of points, routing each one by its own `metric`.
#[must_use]
pub fn merge_tagged<'a, I>(points: I) -> MergedSeries
where
    I: IntoIterator<Item = &'a RawPoint>,
{
    let mut acc = Accumulator::default();
    for raw in points {
        acc.push(raw, raw.metric);
    }
    acc.finish()
}
