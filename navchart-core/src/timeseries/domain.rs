use navchart_types::{AxisDomain, DensePoint, DomainConfig, Domains, MetricKind};

/// Adaptive Y-axis bounds for one metric of a (filtered, pre-downsample) series.
///
/// - No finite value: the configured default domain for the metric.
/// - Nearly flat range (`max - min < flat_threshold`): expanded symmetrically
///   around the midpoint to `max((max - min) × amplification, min_span)` so
///   small real movements stay visible.
/// - Otherwise padded by `padding_ratio` of the range on each side.
/// - NAV never goes below zero, and `max >= min` always holds.
#[must_use]
pub fn axis_domain(points: &[DensePoint], metric: MetricKind, cfg: &DomainConfig) -> AxisDomain {
    domain_of_values(points.iter().map(|p| p.value(metric)), metric, cfg)
}

/// Axis domains for both metrics.
#[must_use]
pub fn domains(points: &[DensePoint], cfg: &DomainConfig) -> Domains {
    Domains {
        nav: axis_domain(points, MetricKind::Nav, cfg),
        yield_pct: axis_domain(points, MetricKind::Yield, cfg),
    }
}

/// Same as [`axis_domain`] over a bare sequence of values.
#[must_use]
pub fn domain_of_values<I>(values: I, metric: MetricKind, cfg: &DomainConfig) -> AxisDomain
where
    I: IntoIterator<Item = f64>,
{
    let Some((lo, hi)) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    else {
        return cfg.default_for(metric);
    };

    let range = hi - lo;
    let (mut min, mut max) = if range < cfg.flat_threshold {
        let mid = lo + range / 2.0;
        let half = (range * cfg.amplification).max(cfg.min_span) / 2.0;
        (mid - half, mid + half)
    } else {
        let pad = range * cfg.padding_ratio;
        (lo - pad, hi + pad)
    };
    if !(min.is_finite() && max.is_finite()) {
        (min, max) = (lo, hi);
    }

    if metric == MetricKind::Nav && min < 0.0 {
        min = 0.0;
    }
    if max < min {
        max = min + cfg.min_span;
    }
    AxisDomain::new(min, max)
}
