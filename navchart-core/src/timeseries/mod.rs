//! Pipeline stages, leaves first.
//!
//! Modules include:
//! - `normalize`: parse/repair one raw timestamp
//! - `merge`: union the two per-metric lists by canonical timestamp
//! - `resample`: the shared interpolate/hold/fallback primitive
//! - `dense`: evenly spaced timeline and the synthetic fallback series
//! - `filter`: relative time windows with density safety nets
//! - `downsample`: stride reduction preserving boundary points
//! - `domain`: adaptive Y-axis bounds
/// Evenly spaced timelines and the synthetic fallback series.
pub mod dense;
/// Adaptive axis domains.
pub mod domain;
/// Stride downsampling for rendering.
pub mod downsample;
/// Relative time window filtering.
pub mod filter;
/// Merging of the two metric series.
pub mod merge;
/// Timestamp parsing and repair.
pub mod normalize;
/// Interpolation primitive shared by the dense builder and the filter.
pub mod resample;

pub(crate) mod util;
