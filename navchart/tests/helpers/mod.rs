// Shared fixtures so tests can `use helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use navchart::{FixedClock, FundId, Navchart, NavchartBuilder, PollConfig, RawPoint, SeriesSource};
use navchart_mock::{MockSource, navx_close};

pub const NAVX: &str = "NAVX";

/// Canonical fund id without unwrap noise in tests.
pub fn fund(s: &str) -> FundId {
    FundId::new(s).unwrap()
}

/// Clock frozen at the close of the `NAVX` fixture day.
pub fn close_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(navx_close()))
}

/// Builder over the fixture source with the clock at the fixture close.
pub fn mock_builder() -> NavchartBuilder {
    Navchart::builder()
        .with_source(Arc::new(MockSource::new()))
        .clock(close_clock())
}

/// Builder over an arbitrary source, fast polling cadence.
pub fn builder_with(source: Arc<dyn SeriesSource>) -> NavchartBuilder {
    Navchart::builder()
        .with_source(source)
        .clock(close_clock())
        .poll(PollConfig {
            poll_interval: Duration::from_secs(15),
            debounce: Duration::from_millis(100),
            fetch_timeout: Duration::from_secs(1),
        })
}

pub fn dt(iso: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(iso).unwrap().with_timezone(&Utc)
}

/// `n` NAV samples one minute apart ending at the fixture close.
pub fn nav_minutes(n: i64, base: f64) -> Vec<RawPoint> {
    let end = navx_close();
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let v = base + i as f64 * 0.01;
            RawPoint::nav(end - TimeDelta::minutes(n - 1 - i), v)
        })
        .collect()
}
