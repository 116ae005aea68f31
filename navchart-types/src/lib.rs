//! Shared navchart data transfer objects, configuration primitives and the
//! unified error type.
#![warn(missing_docs)]

mod config;
mod controls;
mod error;
mod point;
mod reports;

pub use config::{
    ChartConfig, DenseConfig, DomainConfig, DownsampleConfig, ExportConfig, FallbackValues,
    FilterConfig, LabelFormat, NoDataPolicy, PollConfig,
};
pub use controls::{ChartControls, FundId, MetricKind, ViewMode, Window};
pub use error::NavchartError;
pub use point::{
    AxisDomain, DensePoint, Domains, NormalizedPoint, PointOrigin, RawPoint, RawTimestamp,
};
pub use reports::{ChartFrame, Provenance};
