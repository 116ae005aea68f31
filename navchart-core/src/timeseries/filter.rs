use chrono::{DateTime, Utc};
use navchart_types::{ChartConfig, DensePoint, Window};

use super::resample::SampleIndex;
use super::util::delta;

/// Keep the part of a dense timeline that falls inside `window` before `now`.
///
/// - [`Window::All`] returns the input unchanged.
/// - Otherwise points with `ts >= now - window` are kept.
/// - Fewer than `filter.min_points` kept: the window is ignored and the full
///   timeline is used instead, so sparse data never renders as a near-empty
///   chart.
/// - Still fewer than `filter.boost_below` points (but at least two): up to
///   `filter.boost_max_extra` interior points are interpolated between the
///   first and last point and merged in, each splitting the widest gap.
#[must_use]
pub fn filter_window(
    dense: &[DensePoint],
    window: Window,
    now: DateTime<Utc>,
    cfg: &ChartConfig,
) -> Vec<DensePoint> {
    let Some(span) = window.duration() else {
        return dense.to_vec();
    };
    let kept: Vec<DensePoint> = match now.checked_sub_signed(delta(span)) {
        Some(cutoff) => dense.iter().filter(|p| p.ts >= cutoff).cloned().collect(),
        None => dense.to_vec(),
    };

    let result = if kept.len() < cfg.filter.min_points {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            window = %window,
            kept = kept.len(),
            min = cfg.filter.min_points,
            "window too sparse; using full timeline"
        );
        dense.to_vec()
    } else {
        kept
    };
    boost_density(result, cfg)
}

fn boost_density(mut points: Vec<DensePoint>, cfg: &ChartConfig) -> Vec<DensePoint> {
    let have = points.len();
    if have >= cfg.filter.boost_below || have < 2 {
        return points;
    }
    let extra = cfg
        .filter
        .boost_max_extra
        .min(cfg.filter.boost_below - have);

    #[cfg(feature = "tracing")]
    {
        let reason = navchart_types::NavchartError::InsufficientDensity {
            have,
            need: cfg.filter.boost_below,
        };
        tracing::debug!(%reason, extra, "boosting sparse window");
    }

    let index = SampleIndex::from_dense(&points);
    points.extend(index.refine(extra, &cfg.fallback, &cfg.labels));
    points.sort_by_key(DensePoint::epoch_millis);
    points
}
