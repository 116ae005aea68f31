use chrono::{DateTime, Utc};
use navchart_core::{DensePoint, ExportConfig, NavchartError, PointOrigin, ViewMode, export_csv};

fn pt(iso: &str, nav: f64, yld: f64, origin: PointOrigin) -> DensePoint {
    let ts = DateTime::parse_from_rfc3339(iso).unwrap().with_timezone(&Utc);
    DensePoint {
        iso: iso.to_string(),
        ts,
        time_formatted: String::new(),
        nav,
        yield_pct: yld,
        origin,
    }
}

fn sample() -> Vec<DensePoint> {
    vec![
        pt("2025-04-04T10:00:00.000Z", 100.0, 1.5, PointOrigin::Observed),
        pt("2025-04-04T10:30:00.000Z", 100.25, 1.55, PointOrigin::Interpolated),
    ]
}

#[test]
fn single_metric_views_use_timestamp_value() {
    let cfg = ExportConfig::default();
    let nav = export_csv(&sample(), ViewMode::Nav, &cfg).unwrap();
    assert_eq!(
        nav,
        "timestamp,value\n2025-04-04 10:00:00,100\n2025-04-04 10:30:00,100.25\n"
    );
    let yld = export_csv(&sample(), ViewMode::Yield, &cfg).unwrap();
    assert_eq!(
        yld,
        "timestamp,value\n2025-04-04 10:00:00,1.5\n2025-04-04 10:30:00,1.55\n"
    );
}

#[test]
fn combined_view_with_origin_column() {
    let cfg = ExportConfig {
        include_origin: true,
        ..ExportConfig::default()
    };
    let out = export_csv(&sample(), ViewMode::Combined, &cfg).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "timestamp,nav,yield,origin");
    assert_eq!(lines[1], "2025-04-04 10:00:00,100,1.5,observed");
    assert_eq!(lines[2], "2025-04-04 10:30:00,100.25,1.55,interpolated");
}

#[test]
fn fields_with_commas_are_quoted() {
    let cfg = ExportConfig {
        timestamp_format: "%b %d, %Y %H:%M".to_string(),
        ..ExportConfig::default()
    };
    let out = export_csv(&sample()[..1], ViewMode::Nav, &cfg).unwrap();
    assert_eq!(out, "timestamp,value\n\"Apr 04, 2025 10:00\",100\n");
}

#[test]
fn timestamps_follow_export_timezone() {
    let cfg = ExportConfig {
        timezone: chrono_tz::America::New_York,
        ..ExportConfig::default()
    };
    let out = export_csv(&sample()[..1], ViewMode::Nav, &cfg).unwrap();
    assert!(out.contains("2025-04-04 06:00:00,100"));
}

#[test]
fn empty_series_yields_header_only() {
    let out = export_csv(&[], ViewMode::Combined, &ExportConfig::default()).unwrap();
    assert_eq!(out, "timestamp,nav,yield\n");
}

#[test]
fn invalid_pattern_is_an_export_error() {
    let cfg = ExportConfig {
        timestamp_format: "%Q".to_string(),
        ..ExportConfig::default()
    };
    let err = export_csv(&sample(), ViewMode::Nav, &cfg).unwrap_err();
    assert!(matches!(err, NavchartError::Export(_)));
}
