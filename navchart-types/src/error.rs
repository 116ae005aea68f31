use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the navchart workspace.
///
/// Pipeline stages never fail on malformed data; they degrade to documented
/// fallbacks. The variants here cover the few conditions that are surfaced to
/// callers (`NoData`, source failures, export failures) plus the per-point
/// parse failures collected as non-fatal warnings.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavchartError {
    /// A single raw point could not be parsed and was dropped.
    #[error("unparsable point {raw:?}: {reason}")]
    Parse {
        /// The offending raw timestamp or value, rendered as text.
        raw: String,
        /// Why parsing failed.
        reason: String,
    },

    /// No valid point survived normalization and merging.
    #[error("no data: no valid samples survived normalization")]
    NoData,

    /// A series has too few points to render meaningfully.
    #[error("insufficient density: have {have} points, need {need}")]
    InsufficientDensity {
        /// Number of points available.
        have: usize,
        /// Number of points required.
        need: usize,
    },

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The data-fetch layer returned an error.
    #[error("{provider} failed: {msg}")]
    Source {
        /// Name of the source that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A source call exceeded the configured fetch timeout.
    #[error("source timed out: {metric} via {provider}")]
    SourceTimeout {
        /// Name of the source that timed out.
        provider: String,
        /// Metric label that was being fetched.
        metric: String,
    },

    /// Serializing an export failed.
    #[error("export failed: {0}")]
    Export(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl NavchartError {
    /// Helper: build a `Parse` error from the raw input and a reason.
    pub fn parse(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build a `Source` error with the source name and message.
    pub fn source_failed(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `SourceTimeout` error.
    pub fn source_timeout(provider: impl Into<String>, metric: impl Into<String>) -> Self {
        Self::SourceTimeout {
            provider: provider.into(),
            metric: metric.into(),
        }
    }

    /// Returns true for the per-point conditions that the pipeline absorbs
    /// by dropping, holding or widening instead of failing.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::InsufficientDensity { .. } | Self::NoData
        )
    }
}
