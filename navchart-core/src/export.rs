use csv::{QuoteStyle, Terminator, WriterBuilder};
use navchart_types::{DensePoint, ExportConfig, MetricKind, NavchartError, ViewMode};

use crate::timeseries::util::format_in;

/// Serialize a filtered series to CSV for the active view.
///
/// - `Nav` / `Yield` views: `timestamp,value`.
/// - `Combined`: `timestamp,nav,yield`.
/// - With `include_origin`, a trailing `origin` column.
///
/// Timestamps are rendered in `cfg.timezone` with `cfg.timestamp_format`.
/// Fields are quoted only when they contain a separator, quote or newline,
/// and rows end in `\n`. Values use Rust's shortest round-trip formatting.
///
/// # Errors
/// Returns `NavchartError::Export` if the timestamp pattern is invalid or
/// the writer fails.
pub fn export_csv(
    points: &[DensePoint],
    view: ViewMode,
    cfg: &ExportConfig,
) -> Result<String, NavchartError> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header: Vec<&str> = vec!["timestamp"];
    match view {
        ViewMode::Combined => header.extend(["nav", "yield"]),
        ViewMode::Nav | ViewMode::Yield => header.push("value"),
    }
    if cfg.include_origin {
        header.push("origin");
    }
    wtr.write_record(&header).map_err(export_err)?;

    for p in points {
        let stamp = format_in(p.ts, cfg.timezone, &cfg.timestamp_format).ok_or_else(|| {
            NavchartError::Export(format!(
                "invalid timestamp format '{}'",
                cfg.timestamp_format
            ))
        })?;
        let mut row = vec![stamp];
        match view {
            ViewMode::Combined => {
                row.push(p.nav.to_string());
                row.push(p.yield_pct.to_string());
            }
            ViewMode::Nav => row.push(p.value(MetricKind::Nav).to_string()),
            ViewMode::Yield => row.push(p.value(MetricKind::Yield).to_string()),
        }
        if cfg.include_origin {
            row.push(p.origin.as_str().to_string());
        }
        wtr.write_record(&row).map_err(export_err)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| NavchartError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| NavchartError::Export(e.to_string()))
}

#[allow(clippy::needless_pass_by_value)]
fn export_err(e: csv::Error) -> NavchartError {
    NavchartError::Export(e.to_string())
}
