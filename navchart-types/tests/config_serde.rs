use std::time::Duration;

use navchart_types::{
    AxisDomain, ChartConfig, NoDataPolicy, PollConfig, RawPoint, RawTimestamp,
};

#[test]
fn chart_config_roundtrip_preserves_constants() {
    let mut cfg = ChartConfig::default();
    cfg.labels.timezone = chrono_tz::Europe::Zurich;
    cfg.no_data = NoDataPolicy::Placeholder;
    cfg.domain.yield_default = AxisDomain::new(1.0, 2.0);

    let json = serde_json::to_string(&cfg).expect("serialize config");
    let de: ChartConfig = serde_json::from_str(&json).expect("deserialize config");

    assert_eq!(de.fallback, cfg.fallback);
    assert_eq!(de.dense.min_points, 20);
    assert_eq!(de.dense.min_span, Duration::from_secs(3_600));
    assert_eq!(de.filter.min_points, 5);
    assert_eq!(de.downsample.target_points, 75);
    assert_eq!(de.domain.yield_default, AxisDomain::new(1.0, 2.0));
    assert_eq!(de.labels, cfg.labels);
    assert_eq!(de.no_data, NoDataPolicy::Placeholder);
    de.validate().expect("roundtripped config stays valid");
}

#[test]
fn default_config_is_valid() {
    ChartConfig::default().validate().unwrap();
    PollConfig::default().validate().unwrap();
}

#[test]
fn validate_rejects_unusable_constants() {
    let mut cfg = ChartConfig::default();
    cfg.fallback.nav = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = ChartConfig::default();
    cfg.dense.min_span = Duration::ZERO;
    assert!(cfg.validate().is_err());

    let mut cfg = ChartConfig::default();
    cfg.domain.nav_default = AxisDomain::new(101.0, 99.0);
    assert!(cfg.validate().is_err());

    let mut cfg = ChartConfig::default();
    cfg.downsample.min_len = 0;
    assert!(cfg.validate().is_err());

    let poll = PollConfig {
        poll_interval: Duration::ZERO,
        ..PollConfig::default()
    };
    assert!(poll.validate().is_err());
}

#[test]
fn validate_rejects_spans_outside_the_calendar() {
    let mut cfg = ChartConfig::default();
    cfg.dense.min_span = Duration::from_secs(u64::MAX / 4);
    assert!(cfg.validate().is_err());

    let mut cfg = ChartConfig::default();
    cfg.dense.fallback_spacing = Duration::from_secs(u64::MAX / 64);
    assert!(cfg.validate().is_err());

    // a century is fine
    let mut cfg = ChartConfig::default();
    cfg.dense.min_span = Duration::from_secs(100 * 365 * 86_400);
    cfg.validate().unwrap();
}

#[test]
fn raw_point_accepts_text_and_numeric_timestamps() {
    let text: RawPoint = serde_json::from_str(
        r#"{"timestamp":"2025-04-04T18:33:14.324Z","value":100.5,"metricKind":"NAV"}"#,
    )
    .unwrap();
    assert_eq!(
        text.timestamp,
        RawTimestamp::Text("2025-04-04T18:33:14.324Z".into())
    );
    assert!(text.source.is_none());

    let millis: RawPoint = serde_json::from_str(
        r#"{"timestamp":1743791594324,"value":1.55,"metricKind":"YIELD","source":"oracle"}"#,
    )
    .unwrap();
    assert_eq!(millis.timestamp, RawTimestamp::Millis(1_743_791_594_324));
    assert_eq!(millis.source.as_deref(), Some("oracle"));
}
