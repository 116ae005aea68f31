use navchart::{ChartControls, ViewMode, Window};
use navchart_demos::common::{demo_chart, demo_fund};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,navchart=trace,navchart_core=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let chart = demo_chart()?;
    let fund = demo_fund()?;

    for window in [Window::OneHour, Window::SixHours, Window::All] {
        let frame = chart
            .chart(&fund, ChartControls::new(window, ViewMode::Combined))
            .await?;
        tracing::info!(
            window = %window,
            points = frame.points.len(),
            filtered = frame.filtered.len(),
            rejected = frame.rejected.len(),
            "frame ready"
        );
    }
    Ok(())
}
