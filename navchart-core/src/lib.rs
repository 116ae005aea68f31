//! navchart-core
//!
//! Time-series reconciliation for a fund dashboard. Two independently and
//! irregularly sampled metrics (a NAV-like price and a yield-like percentage)
//! become one gap-free, evenly spaced, render-ready series.
//!
//! - `timeseries`: the pure pipeline stages (normalize, merge, resample,
//!   dense, filter, downsample, domain).
//! - `export`: CSV serialization of a filtered series.
//! - `source`: the `SeriesSource` trait the data-fetch layer implements.
//! - `clock`: injectable notion of "now".
//! - `handle`: lifecycle of the polling task.
//!
//! Every stage is synchronous and a pure function of its inputs plus the
//! policy constants in [`ChartConfig`]; malformed data degrades to documented
//! fallbacks instead of failing.
#![warn(missing_docs)]

/// Injectable clocks.
pub mod clock;
/// CSV export of filtered series.
pub mod export;
/// Polling task handle and drop-time helpers.
pub mod handle;
/// The data-fetch seam.
pub mod source;
/// Pipeline stages.
pub mod timeseries;

pub use clock::{Clock, FixedClock, SystemClock};
pub use export::export_csv;
pub use handle::PollHandle;
pub use source::SeriesSource;
pub use timeseries::dense::{build_dense_timeline, synthetic_fallback};
pub use timeseries::domain::{axis_domain, domain_of_values, domains};
pub use timeseries::downsample::downsample;
pub use timeseries::filter::filter_window;
pub use timeseries::merge::{MergedSeries, merge_series, merge_tagged};
pub use timeseries::normalize::{
    NormalizedInstant, NormalizedSample, normalize_point, normalize_timestamp,
};
pub use timeseries::resample::{Fill, Resolved, SampleIndex};

pub use navchart_types::*;
