//! navchart prepares fund NAV/yield charts.
//!
//! Overview
//! - Fetches the NAV-like and yield-like history of a fund from any
//!   [`SeriesSource`], each call bounded by a timeout.
//! - Runs the `navchart-core` pipeline: timestamp repair, merge by instant,
//!   dense evenly spaced timeline, window filter with density safety nets,
//!   adaptive axis domains and downsampling.
//! - Produces a [`ChartFrame`] on demand ([`Navchart::chart`]) or keeps one
//!   fresh on a polling cadence ([`Navchart::watch`]).
//!
//! Key behaviors and trade-offs
//! - No data: by default the deterministic synthetic series is rendered and
//!   the frame is marked [`Provenance::SyntheticFallback`]. With
//!   [`NoDataPolicy::Placeholder`] the caller gets `NavchartError::NoData`
//!   instead and can show an empty state.
//! - Gaps: a metric missing between two samples is interpolated linearly;
//!   past its first/last sample it is held flat; with no sample at all its
//!   fallback constant is used. No frame ever carries a missing or NaN value.
//! - Polling: bursts of triggers (poll results, control changes) are
//!   coalesced by a restartable debounce; only the newest frame is kept.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use navchart::{ChartControls, FundId, Navchart, ViewMode, Window};
//!
//! let chart = Navchart::builder().with_source(Arc::new(my_source)).build()?;
//! let fund = FundId::new("bxf")?;
//! let frame = chart
//!     .chart(&fund, ChartControls::new(Window::SixHours, ViewMode::Combined))
//!     .await?;
//! draw(&frame.points, frame.domains);
//!
//! let (ctl_tx, ctl_rx) = tokio::sync::watch::channel(ChartControls::default());
//! let (handle, mut frames) = chart.watch(fund, ctl_rx);
//! while frames.changed().await.is_ok() { /* redraw */ }
//! handle.stop().await;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod poll;

pub use core::{Navchart, NavchartBuilder, Snapshot};
pub use poll::FrameUpdate;

pub use navchart_core::{
    Clock, FixedClock, PollHandle, SeriesSource, SystemClock, export_csv,
};
pub use navchart_types::{
    AxisDomain, ChartConfig, ChartControls, ChartFrame, DenseConfig, DensePoint, DomainConfig,
    Domains, DownsampleConfig, ExportConfig, FallbackValues, FilterConfig, FundId, LabelFormat,
    MetricKind, NavchartError, NoDataPolicy, PointOrigin, PollConfig, Provenance, RawPoint,
    RawTimestamp, ViewMode, Window,
};
