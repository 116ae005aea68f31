//! Deterministic series sources for tests and demos.
//!
//! [`MockSource`] serves static fixtures keyed by fund id:
//! - `NAVX`: a full trading day, NAV every 30 minutes and yield every 45.
//! - `DBLTS`: concatenated double timestamps and an unparsable point.
//! - `SPARSE`: two NAV samples 30 minutes apart and one yield sample.
//! - `FLAT`: a constant NAV and no yield at all.
//! - `EMPTY`: no samples.
//! - `FAIL`: every call fails.
//! - `TIMEOUT`: every call takes 200 ms before returning nothing.
//!
//! [`DynamicMockSource`] is scripted from a test through its controller.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use navchart_core::{FundId, MetricKind, NavchartError, RawPoint, SeriesSource};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};
pub use fixtures::DAY_OPEN;

/// Last instant covered by the `NAVX` fixture (8 hours after the open).
#[must_use]
pub fn navx_close() -> DateTime<Utc> {
    fixtures::minutes_after_open(8 * 60)
}

/// Mock source for CI-safe demos. Provides deterministic data from static fixtures.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSource;

impl MockSource {
    /// Create the fixture source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_delay(fund: &str, metric: MetricKind) -> Result<(), NavchartError> {
        match fund {
            "FAIL" => Err(NavchartError::source_failed(
                "navchart-mock",
                format!("forced failure: {metric}"),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl SeriesSource for MockSource {
    fn name(&self) -> &'static str {
        "navchart-mock"
    }

    async fn series(
        &self,
        fund: &FundId,
        metric: MetricKind,
    ) -> Result<Vec<RawPoint>, NavchartError> {
        Self::maybe_fail_or_delay(fund.as_str(), metric).await?;
        let found = match metric {
            MetricKind::Nav => fixtures::nav::by_fund(fund.as_str()),
            MetricKind::Yield => fixtures::yield_pct::by_fund(fund.as_str()),
        };
        found.ok_or_else(|| {
            NavchartError::source_failed("navchart-mock", format!("unknown fund {fund}"))
        })
    }
}
