use navchart_core::{AxisDomain, DomainConfig, MetricKind, domain_of_values};
use proptest::prelude::*;

fn arb_values() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(
        prop_oneof![
            8 => -1.0e6f64..1.0e6,
            1 => Just(f64::NAN),
            1 => Just(f64::INFINITY),
        ],
        0..100,
    )
}

proptest! {
    #[test]
    fn bounds_are_ordered_and_nav_non_negative(values in arb_values()) {
        let cfg = DomainConfig::default();
        for metric in MetricKind::ALL {
            let d = domain_of_values(values.iter().copied(), metric, &cfg);
            prop_assert!(d.min.is_finite() && d.max.is_finite());
            prop_assert!(d.max >= d.min);
            if metric == MetricKind::Nav {
                prop_assert!(d.min >= 0.0);
            }
        }
    }

    #[test]
    fn domain_covers_finite_values(values in proptest::collection::vec(0.0f64..1.0e6, 1..100)) {
        let cfg = DomainConfig::default();
        let d = domain_of_values(values.iter().copied(), MetricKind::Yield, &cfg);
        for v in values {
            prop_assert!(d.contains(v));
        }
    }
}

#[test]
fn empty_uses_defaults() {
    let cfg = DomainConfig::default();
    assert_eq!(
        domain_of_values([], MetricKind::Nav, &cfg),
        AxisDomain::new(99.0, 101.0)
    );
    assert_eq!(
        domain_of_values([f64::NAN], MetricKind::Yield, &cfg),
        AxisDomain::new(1.4, 1.8)
    );
}

#[test]
fn flat_range_is_amplified_to_min_span() {
    let cfg = DomainConfig::default();
    let d = domain_of_values([1.6, 1.6, 1.6], MetricKind::Yield, &cfg);
    assert!((d.min - 1.5).abs() < 1e-12);
    assert!((d.max - 1.7).abs() < 1e-12);

    // 0.09 wide: 0.27 after amplification
    let d = domain_of_values([100.0, 100.09], MetricKind::Nav, &cfg);
    assert!((d.span() - 0.27).abs() < 1e-9);
    assert!(((d.min + d.max) / 2.0 - 100.045).abs() < 1e-9);
}

#[test]
fn wide_range_is_padded() {
    let cfg = DomainConfig::default();
    let d = domain_of_values([100.0, 110.0], MetricKind::Nav, &cfg);
    assert!((d.min - 99.0).abs() < 1e-9);
    assert!((d.max - 111.0).abs() < 1e-9);
}

#[test]
fn nav_floor_is_zero() {
    let cfg = DomainConfig::default();
    let d = domain_of_values([0.0, 0.01], MetricKind::Nav, &cfg);
    assert_eq!(d.min, 0.0);
    assert!(d.max > 0.01);
    let d = domain_of_values([-5.0, -1.0], MetricKind::Nav, &cfg);
    assert_eq!(d.min, 0.0);
    assert!(d.max >= d.min);
}
