use navchart_types::DownsampleConfig;

/// Reduce a series to roughly `target_points` for rendering.
///
/// Series shorter than `min_len` (or of at most two points) come back
/// unchanged. Longer ones keep every
/// `stride`-th point, `stride = max(1, len / target_points)`, and the original
/// first and last points are always present exactly once. The output never
/// exceeds `len / stride + 2` points.
///
/// ```
/// use navchart_core::{downsample, DownsampleConfig};
///
/// let xs: Vec<u32> = (0..200).collect();
/// let out = downsample(&xs, &DownsampleConfig::default());
/// assert_eq!(out.first(), Some(&0));
/// assert_eq!(out.last(), Some(&199));
/// assert!(out.len() <= 200 / 2 + 2);
/// ```
#[must_use]
pub fn downsample<T: Clone>(points: &[T], cfg: &DownsampleConfig) -> Vec<T> {
    let len = points.len();
    if len < cfg.min_len || len <= 2 {
        return points.to_vec();
    }
    let stride = (len / cfg.target_points.max(1)).max(1);
    let mut out: Vec<T> = points.iter().step_by(stride).cloned().collect();
    if (len - 1) % stride != 0
        && let Some(last) = points.last()
    {
        out.push(last.clone());
    }
    out
}
