//! The single "resample to minimum resolution" primitive.
//!
//! Both the dense timeline builder and the window filter's density boost
//! evaluate synthetic instants through [`SampleIndex`], so the two call sites
//! cannot diverge in how they interpolate, hold or fall back.

use chrono::{DateTime, Utc};
use navchart_types::{
    DensePoint, FallbackValues, LabelFormat, MetricKind, NormalizedPoint, PointOrigin,
};

use super::util::{canonical_iso, lerp, time_label};

/// How a metric value at a synthetic instant was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fill {
    /// A sample of this metric sits exactly at the instant.
    Exact,
    /// Linear interpolation between the nearest samples on both sides.
    Interpolated,
    /// Only one side has a sample; its value is held flat.
    Held,
    /// The metric has no sample at all; the fallback constant is used.
    Fallback,
}

/// Values resolved at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    /// NAV value.
    pub nav: f64,
    /// Yield value.
    pub yield_pct: f64,
    /// How the NAV value was obtained.
    pub nav_fill: Fill,
    /// How the yield value was obtained.
    pub yield_fill: Fill,
    /// Provenance of the point as a whole.
    pub origin: PointOrigin,
}

/// Sorted instant arrays for neighbor lookup by binary search.
///
/// Each metric keeps its own `(epoch_millis, value)` array, so the nearest
/// neighbor carrying a metric is found even when the nearest point overall
/// only carries the other one.
#[derive(Debug, Clone, Default)]
pub struct SampleIndex {
    instants: Vec<i64>,
    origins: Vec<PointOrigin>,
    nav: Vec<(i64, f64)>,
    yield_pct: Vec<(i64, f64)>,
    synthetic: bool,
}

impl SampleIndex {
    /// Index merged real samples.
    #[must_use]
    pub fn from_normalized(points: &[NormalizedPoint]) -> Self {
        Self::from_parts(
            points
                .iter()
                .map(|p| (p.epoch_millis(), p.nav, p.yield_pct, PointOrigin::Observed)),
        )
    }

    /// Index an already dense series (used when boosting a filtered window).
    #[must_use]
    pub fn from_dense(points: &[DensePoint]) -> Self {
        Self::from_parts(
            points
                .iter()
                .map(|p| (p.epoch_millis(), Some(p.nav), Some(p.yield_pct), p.origin)),
        )
    }

    fn from_parts<I>(parts: I) -> Self
    where
        I: Iterator<Item = (i64, Option<f64>, Option<f64>, PointOrigin)>,
    {
        let mut rows: Vec<(i64, Option<f64>, Option<f64>, PointOrigin)> = parts.collect();
        rows.sort_by_key(|r| r.0);

        let mut index = Self {
            instants: Vec::with_capacity(rows.len()),
            origins: Vec::with_capacity(rows.len()),
            ..Self::default()
        };
        for (t, nav, yld, origin) in rows {
            if index.instants.last() != Some(&t) {
                index.instants.push(t);
                index.origins.push(origin);
            }
            push_sample(&mut index.nav, t, nav);
            push_sample(&mut index.yield_pct, t, yld);
        }
        index.synthetic = !index.origins.is_empty()
            && index.origins.iter().all(|o| *o == PointOrigin::Synthetic);
        index
    }

    /// Number of distinct instants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instants.len()
    }

    /// True when nothing was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// Earliest indexed instant in epoch millis.
    #[must_use]
    pub fn first_millis(&self) -> Option<i64> {
        self.instants.first().copied()
    }

    /// Latest indexed instant in epoch millis.
    #[must_use]
    pub fn last_millis(&self) -> Option<i64> {
        self.instants.last().copied()
    }

    /// Whether a point sits exactly at `t`.
    #[must_use]
    pub fn contains(&self, t: i64) -> bool {
        self.instants.binary_search(&t).is_ok()
    }

    /// Sorted samples carrying `metric`.
    #[must_use]
    pub fn series(&self, metric: MetricKind) -> &[(i64, f64)] {
        match metric {
            MetricKind::Nav => &self.nav,
            MetricKind::Yield => &self.yield_pct,
        }
    }

    /// Resolve one metric at `t` (epoch millis).
    ///
    /// Exact sample → reused; samples on both sides → linear interpolation by
    /// time fraction; one side only → that value held flat; none → fallback.
    #[must_use]
    pub fn value_at(&self, metric: MetricKind, t: i64, fallback: &FallbackValues) -> (f64, Fill) {
        let series = self.series(metric);
        let idx = series.partition_point(|&(ts, _)| ts < t);
        let after = series.get(idx).copied();
        if let Some((ts, v)) = after
            && ts == t
        {
            return (v, Fill::Exact);
        }
        let before = idx.checked_sub(1).and_then(|i| series.get(i)).copied();
        match (before, after) {
            (Some((t0, v0)), Some((t1, v1))) => (lerp(t0, v0, t1, v1, t), Fill::Interpolated),
            // Flat extrapolation. Whether a drifting yield should extrapolate
            // differently is an open question; see DESIGN.md.
            (Some((_, v)), None) | (None, Some((_, v))) => (v, Fill::Held),
            (None, None) => (fallback.get(metric), Fill::Fallback),
        }
    }

    /// Resolve both metrics at `t` (epoch millis).
    #[must_use]
    pub fn resolve(&self, t: i64, fallback: &FallbackValues) -> Resolved {
        let (nav, nav_fill) = self.value_at(MetricKind::Nav, t, fallback);
        let (yield_pct, yield_fill) = self.value_at(MetricKind::Yield, t, fallback);
        let origin = match self.instants.binary_search(&t) {
            Ok(i) => self.origins[i],
            Err(_) if self.synthetic => PointOrigin::Synthetic,
            Err(_) => PointOrigin::Interpolated,
        };
        Resolved {
            nav,
            yield_pct,
            nav_fill,
            yield_fill,
            origin,
        }
    }

    /// Resolve both metrics at an instant.
    #[must_use]
    pub fn sample_at(&self, target: DateTime<Utc>, fallback: &FallbackValues) -> Resolved {
        self.resolve(target.timestamp_millis(), fallback)
    }

    /// Evaluate `count` evenly spaced instants covering `[start, end]`
    /// inclusive (epoch millis). A single instant lands on `start`.
    #[must_use]
    pub fn resample(
        &self,
        start: i64,
        end: i64,
        count: usize,
        fallback: &FallbackValues,
        labels: &LabelFormat,
    ) -> Vec<DensePoint> {
        let steps = count.saturating_sub(1).max(1);
        (0..count)
            .filter_map(|i| self.point_at(fraction_of(start, end, i, steps), fallback, labels))
            .collect()
    }

    /// Add up to `count` interior points, each at the midpoint of the widest
    /// remaining gap between indexed instants (earliest gap on ties).
    ///
    /// New instants never coincide with existing ones; gaps narrower than
    /// 2 ms are not split. Returned points are sorted.
    #[must_use]
    pub fn refine(
        &self,
        count: usize,
        fallback: &FallbackValues,
        labels: &LabelFormat,
    ) -> Vec<DensePoint> {
        let mut instants = self.instants.clone();
        let mut added = Vec::with_capacity(count);
        for _ in 0..count {
            let widest = instants
                .windows(2)
                .enumerate()
                .map(|(i, w)| (i, w[1].saturating_sub(w[0])))
                .fold(None, |best: Option<(usize, i64)>, (i, gap)| match best {
                    Some((_, g)) if g >= gap => best,
                    _ => Some((i, gap)),
                });
            let Some((i, gap)) = widest.filter(|&(_, gap)| gap >= 2) else {
                break;
            };
            let mid = instants[i] + gap / 2;
            instants.insert(i + 1, mid);
            added.push(mid);
        }
        added.sort_unstable();
        added
            .into_iter()
            .filter_map(|t| self.point_at(t, fallback, labels))
            .collect()
    }

    fn point_at(&self, t: i64, fallback: &FallbackValues, labels: &LabelFormat) -> Option<DensePoint> {
        let ts = DateTime::from_timestamp_millis(t)?;
        let r = self.resolve(t, fallback);
        Some(DensePoint {
            iso: canonical_iso(ts),
            ts,
            time_formatted: time_label(ts, labels),
            nav: r.nav,
            yield_pct: r.yield_pct,
            origin: r.origin,
        })
    }
}

fn push_sample(series: &mut Vec<(i64, f64)>, t: i64, value: Option<f64>) {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return;
    };
    match series.last_mut() {
        Some(last) if last.0 == t => last.1 = v,
        _ => series.push((t, v)),
    }
}

/// `start + (end - start) * num / den`, computed without overflow.
fn fraction_of(start: i64, end: i64, num: usize, den: usize) -> i64 {
    let span = i128::from(end) - i128::from(start);
    let num = i128::try_from(num).unwrap_or(i128::MAX);
    let den = i128::try_from(den.max(1)).unwrap_or(i128::MAX);
    let offset = span.saturating_mul(num) / den;
    i64::try_from(i128::from(start) + offset).unwrap_or(end)
}
