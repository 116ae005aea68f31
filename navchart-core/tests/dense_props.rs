use chrono::{DateTime, TimeDelta, Utc};
use navchart_core::{
    ChartConfig, DensePoint, Fill, MetricKind, NavchartError, NormalizedPoint, PointOrigin,
    RawPoint, SampleIndex, build_dense_timeline, merge_series, synthetic_fallback,
};
use proptest::prelude::*;

fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-04-04T10:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn point(ms: i64, nav: Option<f64>, yld: Option<f64>) -> NormalizedPoint {
    let ts = DateTime::from_timestamp_millis(ms).unwrap();
    NormalizedPoint {
        iso: ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        ts,
        nav,
        yield_pct: yld,
    }
}

fn arb_merged() -> impl Strategy<Value = Vec<NormalizedPoint>> {
    proptest::collection::btree_map(
        0i64..50_000_000,
        (
            proptest::option::of(50.0f64..150.0),
            proptest::option::of(0.0f64..5.0),
        ),
        1..60,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(off, (nav, yld))| {
                // at least one metric on every real point
                let nav = if nav.is_none() && yld.is_none() { Some(100.0) } else { nav };
                point(1_743_760_800_000 + off, nav, yld)
            })
            .collect()
    })
}

fn assert_finite(points: &[DensePoint]) {
    for p in points {
        assert!(p.nav.is_finite() && p.yield_pct.is_finite(), "{p:?}");
    }
}

proptest! {
    #[test]
    fn length_covers_minimum_and_double_input(points in arb_merged()) {
        let cfg = ChartConfig::default();
        let dense = build_dense_timeline(&points, &cfg).unwrap();
        prop_assert!(dense.len() >= cfg.dense.min_points.max(2 * points.len()));
        prop_assert!(dense.windows(2).all(|w| w[0].ts <= w[1].ts));
        assert_finite(&dense);

        let first = dense.first().unwrap().ts;
        let last = dense.last().unwrap().ts;
        prop_assert!(last - first >= TimeDelta::hours(1));
        // never extends past the newest real sample
        prop_assert_eq!(last, points.last().unwrap().ts);
    }

    #[test]
    fn interpolated_values_stay_between_neighbors(points in arb_merged()) {
        let cfg = ChartConfig::default();
        let index = SampleIndex::from_normalized(&points);
        let dense = build_dense_timeline(&points, &cfg).unwrap();
        for metric in MetricKind::ALL {
            let series = index.series(metric);
            for p in &dense {
                let t = p.epoch_millis();
                let v = p.value(metric);
                let (_, fill) = index.value_at(metric, t, &cfg.fallback);
                let idx = series.partition_point(|&(ts, _)| ts < t);
                match fill {
                    Fill::Exact => prop_assert_eq!(v, series[idx].1),
                    Fill::Interpolated => {
                        let (a, b) = (series[idx - 1].1, series[idx].1);
                        prop_assert!(v >= a.min(b) - 1e-9 && v <= a.max(b) + 1e-9);
                    }
                    Fill::Held => {
                        let held = if idx == 0 { series[0].1 } else { series[idx - 1].1 };
                        prop_assert_eq!(v, held);
                    }
                    Fill::Fallback => prop_assert_eq!(v, cfg.fallback.get(metric)),
                }
            }
        }
    }
}

#[test]
fn nav_interpolates_and_yield_holds_flat() {
    let t0 = t0();
    let m = |min: i64| (t0 + TimeDelta::minutes(min)).to_rfc3339();
    let nav = [RawPoint::nav(m(0), 100.0), RawPoint::nav(m(30), 100.5)];
    let yld = [RawPoint::yield_pct(m(0), 1.5)];
    let merged = merge_series(&nav, &yld);
    let cfg = ChartConfig::default();
    let dense = build_dense_timeline(&merged.points, &cfg).unwrap();

    let first = dense.first().unwrap().ts;
    let last = dense.last().unwrap().ts;
    assert!(last - first >= TimeDelta::hours(1));
    assert_eq!(dense.len(), 20);
    assert_finite(&dense);

    let index = SampleIndex::from_normalized(&merged.points);
    let mid = index.sample_at(t0 + TimeDelta::minutes(15), &cfg.fallback);
    assert!((mid.nav - 100.25).abs() < 1e-9);
    assert_eq!(mid.nav_fill, Fill::Interpolated);

    for p in dense.iter().filter(|p| p.ts > t0) {
        assert_eq!(p.yield_pct, 1.5);
        assert!(p.nav >= 100.0 && p.nav <= 100.5);
    }
    let observed: Vec<_> = dense
        .iter()
        .filter(|p| p.origin == PointOrigin::Observed)
        .collect();
    assert_eq!(observed.len(), 1);
    assert_eq!(observed[0].nav, 100.5);
}

#[test]
fn short_span_is_widened_backwards_and_held_flat() {
    let cfg = ChartConfig::default();
    let at = t0().timestamp_millis();
    let dense = build_dense_timeline(&[point(at, Some(100.0), Some(1.5))], &cfg).unwrap();

    assert_eq!(dense.len(), 20);
    assert_eq!(dense.first().unwrap().ts, t0() - TimeDelta::hours(1));
    assert_eq!(dense.last().unwrap().ts, t0());
    assert!(dense.iter().all(|p| p.nav == 100.0 && p.yield_pct == 1.5));
    assert!(dense[..19].iter().all(|p| p.origin == PointOrigin::Interpolated));
    assert_eq!(dense[19].origin, PointOrigin::Observed);
}

#[test]
fn oversized_min_span_stops_at_earliest_instant() {
    let mut cfg = ChartConfig::default();
    cfg.dense.min_span = std::time::Duration::from_secs(u64::MAX / 4);
    let at = t0().timestamp_millis();
    let dense = build_dense_timeline(&[point(at, Some(100.0), None)], &cfg).unwrap();

    assert_eq!(dense.len(), cfg.dense.min_points);
    assert_eq!(dense.first().unwrap().ts, DateTime::<Utc>::MIN_UTC);
    assert_eq!(dense.last().unwrap().ts, t0());
    assert_finite(&dense);
}

#[test]
fn missing_metric_uses_fallback_constant() {
    let cfg = ChartConfig::default();
    let points = [point(0, Some(101.0), None), point(7_200_000, Some(102.0), None)];
    let dense = build_dense_timeline(&points, &cfg).unwrap();
    assert!(dense.iter().all(|p| p.yield_pct == cfg.fallback.yield_pct));
}

#[test]
fn empty_input_signals_no_data() {
    let err = build_dense_timeline(&[], &ChartConfig::default()).unwrap_err();
    assert_eq!(err, NavchartError::NoData);
}

#[test]
fn fallback_is_deterministic_and_centered() {
    let cfg = ChartConfig::default();
    let now = t0();
    let a = synthetic_fallback(now, &cfg);
    let b = synthetic_fallback(now, &cfg);
    assert_eq!(a, b);
    assert_eq!(a.len(), 10);
    assert_eq!(a.last().unwrap().ts, now);
    assert_eq!(a.last().unwrap().ts - a.first().unwrap().ts, TimeDelta::minutes(270));
    assert!(a.iter().all(|p| p.origin == PointOrigin::Synthetic));
    assert!(a.iter().all(|p| (p.nav - 100.0).abs() <= 0.15 + 1e-12));
    assert!(a.iter().all(|p| (p.yield_pct - 1.6).abs() <= 0.05 + 1e-12));
    assert_finite(&a);
}

#[test]
fn labels_follow_configured_timezone() {
    let mut cfg = ChartConfig::default();
    cfg.labels.timezone = chrono_tz::Europe::Helsinki;
    let dense = synthetic_fallback(t0(), &cfg);
    // 10:00Z is 13:00 in Helsinki during summer time
    assert_eq!(dense.last().unwrap().time_formatted, "13:00");
}
