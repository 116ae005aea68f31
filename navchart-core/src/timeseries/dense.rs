use core::f64::consts::PI;

use chrono::{DateTime, Utc};
use navchart_types::{ChartConfig, DensePoint, NavchartError, NormalizedPoint, PointOrigin};

use super::resample::SampleIndex;
use super::util::{canonical_iso, delta, time_label, truncate_millis};

/// Amplitude of the periodic variation on the synthetic NAV series.
const FALLBACK_NAV_WAVE: f64 = 0.15;
/// Amplitude of the periodic variation on the synthetic yield series.
const FALLBACK_YIELD_WAVE: f64 = 0.05;

/// Build the evenly spaced timeline over the observed span of `points`.
///
/// - The timeline runs evenly across `[first, last]` sample instants when
///   that span is at least `dense.min_span`. A shorter real span is widened
///   backwards from the latest sample to `last - min_span` (never earlier
///   than chrono's earliest instant), so no instant lies past the newest
///   real data. The widened stretch before the first sample carries each
///   metric's earliest value held flat, marked
///   [`PointOrigin::Interpolated`].
/// - Point count is `max(dense.min_points, 2 × distinct timestamps)`.
/// - Each instant is resolved by [`SampleIndex`]: exact samples are reused,
///   bracketed metrics are interpolated, one-sided metrics are held, and a
///   metric with no sample at all uses its fallback constant.
///
/// # Errors
/// Returns `NavchartError::NoData` when `points` is empty. Callers decide
/// whether to show a placeholder or [`synthetic_fallback`].
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "navchart_core::dense::build_dense_timeline",
        skip_all,
        fields(input = points.len()),
    )
)]
pub fn build_dense_timeline(
    points: &[NormalizedPoint],
    cfg: &ChartConfig,
) -> Result<Vec<DensePoint>, NavchartError> {
    let index = SampleIndex::from_normalized(points);
    let (Some(first), Some(last)) = (index.first_millis(), index.last_millis()) else {
        return Err(NavchartError::NoData);
    };

    let min_span = delta(cfg.dense.min_span).num_milliseconds();
    let start = if last.saturating_sub(first) < min_span {
        last.saturating_sub(min_span)
            .max(DateTime::<Utc>::MIN_UTC.timestamp_millis())
    } else {
        first
    };
    let count = cfg
        .dense
        .min_points
        .max(index.len().saturating_mul(2));

    let dense = index.resample(start, last, count, &cfg.fallback, &cfg.labels);
    debug_assert!(dense.windows(2).all(|w| w[0].ts <= w[1].ts));
    Ok(dense)
}

/// Deterministic placeholder series for when no real sample exists.
///
/// `dense.fallback_len` points spaced `dense.fallback_spacing` apart, the last
/// one at `now`. Values oscillate slightly around the fallback constants and
/// every point is marked [`PointOrigin::Synthetic`]. The same `now` always
/// yields the same series.
#[must_use]
pub fn synthetic_fallback(now: DateTime<Utc>, cfg: &ChartConfig) -> Vec<DensePoint> {
    #[cfg(feature = "tracing")]
    tracing::debug!(now = %now, "building synthetic fallback series");

    let now = truncate_millis(now);
    let spacing = delta(cfg.dense.fallback_spacing);
    let n = cfg.dense.fallback_len;
    (0..n)
        .filter_map(|i| {
            let back = i32::try_from(n - 1 - i).ok()?;
            let ts = now.checked_sub_signed(spacing.checked_mul(back)?)?;
            #[allow(clippy::cast_precision_loss)]
            let phase = i as f64 * PI / 3.0;
            Some(DensePoint {
                iso: canonical_iso(ts),
                ts,
                time_formatted: time_label(ts, &cfg.labels),
                nav: cfg.fallback.nav + FALLBACK_NAV_WAVE * phase.sin(),
                yield_pct: cfg.fallback.yield_pct + FALLBACK_YIELD_WAVE * phase.cos(),
                origin: PointOrigin::Synthetic,
            })
        })
        .collect()
}
