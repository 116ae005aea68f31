use async_trait::async_trait;
use navchart_types::{FundId, MetricKind, NavchartError, RawPoint};

/// Data-fetch seam: anything that can return the raw history of one metric
/// for one fund.
///
/// Implementations return points in any order and may include malformed
/// timestamps; the pipeline normalizes and rejects them. An empty vector is
/// a valid answer and means "no data", not an error.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Short, stable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Fetch every available point for `metric` of `fund`.
    async fn series(
        &self,
        fund: &FundId,
        metric: MetricKind,
    ) -> Result<Vec<RawPoint>, NavchartError>;
}

#[async_trait]
impl<T: SeriesSource + ?Sized> SeriesSource for std::sync::Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn series(
        &self,
        fund: &FundId,
        metric: MetricKind,
    ) -> Result<Vec<RawPoint>, NavchartError> {
        (**self).series(fund, metric).await
    }
}
