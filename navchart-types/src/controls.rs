//! Tokens supplied by UI controls and identifiers for tracked funds.

use core::fmt;
use core::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::NavchartError;

/// Which of the two reconciled metrics a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    /// Price-per-unit value of the tracked fund.
    #[serde(rename = "NAV")]
    Nav,
    /// Intraday percentage return of the same fund.
    #[serde(rename = "YIELD")]
    Yield,
}

impl MetricKind {
    /// Both metric kinds, NAV first.
    pub const ALL: [Self; 2] = [Self::Nav, Self::Yield];

    /// Stable label for logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nav => "NAV",
            Self::Yield => "YIELD",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative time window selected for the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Window {
    /// Last hour.
    #[serde(rename = "1H")]
    OneHour,
    /// Last six hours.
    #[serde(rename = "6H")]
    SixHours,
    /// Last day.
    #[serde(rename = "1D")]
    OneDay,
    /// Entire dense timeline.
    #[default]
    #[serde(rename = "ALL")]
    All,
}

impl Window {
    /// Length of the window, or `None` for [`Window::All`].
    #[must_use]
    pub const fn duration(self) -> Option<Duration> {
        match self {
            Self::OneHour => Some(Duration::from_secs(3_600)),
            Self::SixHours => Some(Duration::from_secs(6 * 3_600)),
            Self::OneDay => Some(Duration::from_secs(24 * 3_600)),
            Self::All => None,
        }
    }

    /// The UI token for this window.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneHour => "1H",
            Self::SixHours => "6H",
            Self::OneDay => "1D",
            Self::All => "ALL",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Window {
    type Err = NavchartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1H" => Ok(Self::OneHour),
            "6H" => Ok(Self::SixHours),
            "1D" => Ok(Self::OneDay),
            "ALL" => Ok(Self::All),
            other => Err(NavchartError::InvalidArg(format!(
                "unknown window token {other:?} (expected 1H, 6H, 1D or ALL)"
            ))),
        }
    }
}

/// Which series the rendering layer draws.
///
/// The view mode never changes the computation; it is carried with the frame
/// and selects the columns of a CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// NAV only.
    #[serde(rename = "NAV")]
    Nav,
    /// Yield only.
    #[serde(rename = "YIELD")]
    Yield,
    /// Both series on twin axes.
    #[default]
    #[serde(rename = "COMBINED")]
    Combined,
}

impl ViewMode {
    /// Whether this view draws the given metric.
    #[must_use]
    pub const fn shows(self, metric: MetricKind) -> bool {
        match self {
            Self::Nav => matches!(metric, MetricKind::Nav),
            Self::Yield => matches!(metric, MetricKind::Yield),
            Self::Combined => true,
        }
    }

    /// The UI token for this view.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nav => "NAV",
            Self::Yield => "YIELD",
            Self::Combined => "COMBINED",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = NavchartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NAV" => Ok(Self::Nav),
            "YIELD" => Ok(Self::Yield),
            "COMBINED" => Ok(Self::Combined),
            other => Err(NavchartError::InvalidArg(format!(
                "unknown view mode {other:?} (expected NAV, YIELD or COMBINED)"
            ))),
        }
    }
}

/// Current state of the chart controls; a change re-triggers the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartControls {
    /// Selected time window.
    pub window: Window,
    /// Selected view mode.
    pub view: ViewMode,
}

impl ChartControls {
    /// Construct controls from a window and a view mode.
    #[must_use]
    pub const fn new(window: Window, view: ViewMode) -> Self {
        Self { window, view }
    }
}

/// Identifier of a tracked fund (trimmed, ASCII-uppercased, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FundId(String);

impl FundId {
    /// Validate and canonicalize a fund identifier.
    ///
    /// # Errors
    /// Returns `NavchartError::InvalidArg` if the identifier is empty after
    /// trimming or contains whitespace or control characters.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, NavchartError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(NavchartError::InvalidArg("fund id is empty".into()));
        }
        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(NavchartError::InvalidArg(format!(
                "fund id {trimmed:?} contains whitespace or control characters"
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the canonical identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FundId {
    type Error = NavchartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FundId> for String {
    fn from(id: FundId) -> Self {
        id.0
    }
}

impl FromStr for FundId {
    type Err = NavchartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
