use chrono_tz::Tz;
use navchart::{ChartControls, ExportConfig, ViewMode, Window, export_csv};
use navchart_demos::common::{demo_chart, demo_fund};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let chart = demo_chart()?;
    let fund = demo_fund()?;

    let frame = chart
        .chart(&fund, ChartControls::new(Window::OneDay, ViewMode::Combined))
        .await?;

    let cfg = ExportConfig {
        timezone: timezone_from_env(),
        include_origin: true,
        ..ExportConfig::default()
    };
    let csv = export_csv(&frame.filtered, frame.view, &cfg)?;
    print!("{csv}");
    Ok(())
}

fn timezone_from_env() -> Tz {
    std::env::var("NAVCHART_DEMO_TZ")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(chrono_tz::UTC)
}
