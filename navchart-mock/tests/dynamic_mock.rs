use std::time::Duration;

use navchart_core::{FundId, MetricKind, NavchartError, RawPoint, SeriesSource};
use navchart_mock::{DynamicMockSource, MockBehavior, MockSource, navx_close};

fn fund(s: &str) -> FundId {
    FundId::new(s).expect("valid fund id")
}

#[tokio::test]
async fn dynamic_return_and_fail() {
    let (src, ctl) = DynamicMockSource::new_with_controller("P0");
    let f = fund("abc");
    ctl.set_behavior(
        f.clone(),
        MetricKind::Nav,
        MockBehavior::Return(vec![RawPoint::nav(0, 100.0)]),
    )
    .await;
    let err = NavchartError::source_failed("P0", "boom");
    ctl.set_behavior(f.clone(), MetricKind::Yield, MockBehavior::Fail(err.clone()))
        .await;

    assert_eq!(src.series(&f, MetricKind::Nav).await.unwrap().len(), 1);
    assert_eq!(src.series(&f, MetricKind::Yield).await.unwrap_err(), err);
    assert_eq!(ctl.calls(), 2);
    assert_eq!(
        ctl.requests().await,
        vec![(f.clone(), MetricKind::Nav), (f, MetricKind::Yield)]
    );
}

#[tokio::test]
async fn dynamic_without_rule_is_empty() {
    let (src, _ctl) = DynamicMockSource::new_with_controller("P0");
    assert!(src.series(&fund("X"), MetricKind::Nav).await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn dynamic_hang_never_resolves() {
    let (src, ctl) = DynamicMockSource::new_with_controller("P0");
    let f = fund("X");
    ctl.set_behavior(f.clone(), MetricKind::Nav, MockBehavior::Hang).await;
    let res = tokio::time::timeout(Duration::from_secs(60), src.series(&f, MetricKind::Nav)).await;
    assert!(res.is_err());
}

#[tokio::test]
async fn fixtures_cover_both_metrics() {
    let src = MockSource::new();
    let nav = src.series(&fund("navx"), MetricKind::Nav).await.unwrap();
    let yld = src.series(&fund("NAVX"), MetricKind::Yield).await.unwrap();
    assert_eq!(nav.len(), 17);
    assert_eq!(yld.len(), 11);
    assert!(nav.iter().all(|p| p.metric == MetricKind::Nav));
    assert!(yld.iter().all(|p| p.metric == MetricKind::Yield));
    assert_eq!(
        nav.last().unwrap().timestamp,
        navchart_core::RawTimestamp::from(navx_close())
    );
}

#[tokio::test]
async fn fixture_failures() {
    let src = MockSource::new();
    let err = src.series(&fund("FAIL"), MetricKind::Nav).await.unwrap_err();
    assert!(matches!(err, NavchartError::Source { .. }));
    let err = src.series(&fund("nope"), MetricKind::Yield).await.unwrap_err();
    assert!(matches!(err, NavchartError::Source { .. }));
    assert!(src.series(&fund("EMPTY"), MetricKind::Nav).await.unwrap().is_empty());
}
