//! Report envelopes produced by the pipeline.

use serde::{Deserialize, Serialize};

use crate::controls::{FundId, Window, ViewMode};
use crate::error::NavchartError;
use crate::point::{DensePoint, Domains};

/// Whether a frame was built from real samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// At least one real sample survived normalization.
    Observed,
    /// No real sample existed; the deterministic fallback series was used.
    SyntheticFallback,
}

/// Render-ready output of one pipeline run.
///
/// `points` is what the chart draws (downsampled); `filtered` is the
/// pre-downsample window the domains were computed from and the CSV export
/// serializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    /// Fund the frame belongs to.
    pub fund: FundId,
    /// Window the frame was filtered to.
    pub window: Window,
    /// View mode requested by the caller.
    pub view: ViewMode,
    /// Whether the values come from real samples.
    pub provenance: Provenance,
    /// Downsampled points for rendering.
    pub points: Vec<DensePoint>,
    /// Filtered points before downsampling.
    pub filtered: Vec<DensePoint>,
    /// Axis domains computed from `filtered`.
    pub domains: Domains,
    /// Raw points dropped during normalization.
    pub rejected: Vec<NavchartError>,
}

impl ChartFrame {
    /// True when the frame shows the synthetic fallback series.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        matches!(self.provenance, Provenance::SyntheticFallback)
    }
}
