use std::sync::Arc;

use navchart::{FixedClock, FundId, Navchart, NavchartError};
use navchart_mock::MockSource;

/// Fund used when `NAVCHART_DEMO_FUND` is unset.
pub const DEFAULT_FUND: &str = "NAVX";

/// Fund selected for the demo run (`NAVCHART_DEMO_FUND`, else `NAVX`).
///
/// # Errors
/// Returns `InvalidArg` if the variable holds a blank id.
pub fn demo_fund() -> Result<FundId, NavchartError> {
    let raw = std::env::var("NAVCHART_DEMO_FUND").unwrap_or_else(|_| DEFAULT_FUND.to_string());
    FundId::new(raw)
}

/// Orchestrator over the fixture source, pinned to the close of the `NAVX`
/// trading day so windows select the same points on every run.
///
/// # Errors
/// Propagates builder validation errors.
pub fn demo_chart() -> Result<Navchart, NavchartError> {
    let clock = Arc::new(FixedClock::new(navchart_mock::navx_close()));
    Navchart::builder()
        .with_source(Arc::new(MockSource::new()))
        .clock(clock)
        .build()
}
