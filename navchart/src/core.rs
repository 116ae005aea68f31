use std::sync::Arc;

use chrono::{DateTime, Utc};
use navchart_core::{
    ChartConfig, ChartControls, ChartFrame, Clock, FundId, MetricKind, NavchartError,
    NoDataPolicy, PollConfig, Provenance, RawPoint, SeriesSource, SystemClock,
    build_dense_timeline, domains, downsample, filter_window, merge_series, synthetic_fallback,
};

/// Prepares render-ready chart frames for one data source.
///
/// Cloning is cheap: the source and clock are shared, the configuration is
/// copied.
#[derive(Clone)]
pub struct Navchart {
    pub(crate) source: Arc<dyn SeriesSource>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) cfg: ChartConfig,
    pub(crate) poll: PollConfig,
}

/// Builder for [`Navchart`].
pub struct NavchartBuilder {
    source: Option<Arc<dyn SeriesSource>>,
    clock: Arc<dyn Clock>,
    cfg: ChartConfig,
    poll: PollConfig,
}

impl Default for NavchartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NavchartBuilder {
    /// Start with default policy constants, the wall clock and no source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            clock: Arc::new(SystemClock),
            cfg: ChartConfig::default(),
            poll: PollConfig::default(),
        }
    }

    /// Set the data source. Registering a second source replaces the first.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn SeriesSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Inject the notion of "now" used for windows and the fallback series.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace every pipeline constant at once.
    ///
    /// The no-data policy inside `cfg` is kept; [`no_data_policy`](Self::no_data_policy)
    /// called afterwards overrides it.
    #[must_use]
    pub fn config(mut self, cfg: ChartConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Polling cadence, debounce and per-call timeout for [`Navchart::watch`].
    #[must_use]
    pub fn poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// What to produce when no valid sample exists.
    ///
    /// - `Synthetic` (default): the deterministic fallback series, marked
    ///   [`Provenance::SyntheticFallback`].
    /// - `Placeholder`: `Err(NavchartError::NoData)` so the caller can draw
    ///   an empty-state placeholder instead.
    #[must_use]
    pub const fn no_data_policy(mut self, policy: NoDataPolicy) -> Self {
        self.cfg.no_data = policy;
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no source was registered or a constant in the
    /// chart or poll configuration is unusable.
    pub fn build(self) -> Result<Navchart, NavchartError> {
        let Some(source) = self.source else {
            return Err(NavchartError::InvalidArg(
                "no source registered; add one via with_source(...)".to_string(),
            ));
        };
        self.cfg.validate()?;
        self.poll.validate()?;
        Ok(Navchart {
            source,
            clock: self.clock,
            cfg: self.cfg,
            poll: self.poll,
        })
    }
}

/// Wrap a non-source error with the name of the source that produced it.
pub(crate) fn tag_err(provider: &str, e: NavchartError) -> NavchartError {
    match e {
        e @ (NavchartError::Source { .. } | NavchartError::SourceTimeout { .. }) => e,
        other => NavchartError::source_failed(provider, other.to_string()),
    }
}

/// Raw history of both metrics as returned by one round of fetches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// NAV points.
    pub nav: Vec<RawPoint>,
    /// Yield points.
    pub yield_pct: Vec<RawPoint>,
}

impl Navchart {
    /// Start building a new `Navchart`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use navchart::{Navchart, NoDataPolicy};
    ///
    /// let chart = Navchart::builder()
    ///     .with_source(Arc::new(MyHttpSource::new(base_url)))
    ///     .no_data_policy(NoDataPolicy::Placeholder)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> NavchartBuilder {
        NavchartBuilder::new()
    }

    /// Active pipeline constants.
    #[must_use]
    pub const fn config(&self) -> &ChartConfig {
        &self.cfg
    }

    /// Active polling cadence.
    #[must_use]
    pub const fn poll_config(&self) -> &PollConfig {
        &self.poll
    }

    /// Current instant according to the injected clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Run the whole pipeline over one snapshot of raw data.
    ///
    /// merge → dense timeline (or the no-data policy) → window filter →
    /// axis domains of the filtered series → downsampled render points.
    /// Pure and synchronous: the same inputs and `now` give the same frame.
    ///
    /// # Errors
    /// Returns `NavchartError::NoData` only under
    /// [`NoDataPolicy::Placeholder`] when no valid sample exists.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "navchart::core::prepare",
            skip_all,
            fields(
                fund = %fund,
                window = %controls.window,
                nav_in = nav.len(),
                yield_in = yield_pct.len(),
            ),
        )
    )]
    pub fn prepare(
        &self,
        fund: &FundId,
        nav: &[RawPoint],
        yield_pct: &[RawPoint],
        controls: ChartControls,
        now: DateTime<Utc>,
    ) -> Result<ChartFrame, NavchartError> {
        let merged = merge_series(nav, yield_pct);
        let (dense, provenance) = match build_dense_timeline(&merged.points, &self.cfg) {
            Ok(dense) => (dense, Provenance::Observed),
            Err(NavchartError::NoData) => match self.cfg.no_data {
                NoDataPolicy::Placeholder => return Err(NavchartError::NoData),
                _ => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(fund = %fund, "no valid samples; using synthetic fallback");
                    (synthetic_fallback(now, &self.cfg), Provenance::SyntheticFallback)
                }
            },
            Err(e) => return Err(e),
        };

        let filtered = filter_window(&dense, controls.window, now, &self.cfg);
        let domains = domains(&filtered, &self.cfg.domain);
        let points = downsample(&filtered, &self.cfg.downsample);

        Ok(ChartFrame {
            fund: fund.clone(),
            window: controls.window,
            view: controls.view,
            provenance,
            points,
            filtered,
            domains,
            rejected: merged.rejected,
        })
    }

    /// Fetch both metrics and prepare a frame at the clock's current instant.
    ///
    /// # Errors
    /// Returns the source's error (tagged with its name), `SourceTimeout` if
    /// a call exceeds the fetch timeout, or `NoData` under the placeholder
    /// policy.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "navchart::core::chart",
            skip_all,
            fields(fund = %fund, window = %controls.window),
        )
    )]
    pub async fn chart(
        &self,
        fund: &FundId,
        controls: ChartControls,
    ) -> Result<ChartFrame, NavchartError> {
        let snap = self.fetch_snapshot(fund).await?;
        self.prepare(fund, &snap.nav, &snap.yield_pct, controls, self.now())
    }

    /// Fetch both metrics concurrently, each bounded by the fetch timeout.
    ///
    /// # Errors
    /// Fails if either fetch fails; a partial snapshot is never returned.
    pub async fn fetch_snapshot(&self, fund: &FundId) -> Result<Snapshot, NavchartError> {
        let (nav, yield_pct) = tokio::join!(
            self.fetch(fund, MetricKind::Nav),
            self.fetch(fund, MetricKind::Yield),
        );
        Ok(Snapshot {
            nav: nav?,
            yield_pct: yield_pct?,
        })
    }

    async fn fetch(&self, fund: &FundId, metric: MetricKind) -> Result<Vec<RawPoint>, NavchartError> {
        let name = self.source.name();
        Self::source_call_with_timeout(
            name,
            metric,
            self.poll.fetch_timeout,
            self.source.series(fund, metric),
        )
        .await
        .map_err(|e| tag_err(name, e))
    }

    /// Bound a source future by `timeout`, mapping expiry to `SourceTimeout`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "navchart::core::source_call_with_timeout",
            skip(fut),
            fields(
                provider = provider,
                metric = %metric,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn source_call_with_timeout<T, Fut>(
        provider: &'static str,
        metric: MetricKind,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<T, NavchartError>
    where
        Fut: core::future::Future<Output = Result<T, NavchartError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(NavchartError::source_timeout(provider, metric.as_str())))
    }
}
