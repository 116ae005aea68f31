use std::time::Duration;

use navchart::{ChartControls, PointOrigin, ViewMode, Window};
use navchart_demos::common::{demo_chart, demo_fund};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let chart = demo_chart()?;
    let fund = demo_fund()?;

    let frame = chart
        .chart(&fund, ChartControls::new(Window::SixHours, ViewMode::Combined))
        .await?;

    println!(
        "{} {} ({:?}): {} points drawn from {} filtered",
        frame.fund,
        frame.window,
        frame.provenance,
        frame.points.len(),
        frame.filtered.len()
    );
    println!(
        "NAV axis [{:.3}, {:.3}]  yield axis [{:.3}, {:.3}]",
        frame.domains.nav.min,
        frame.domains.nav.max,
        frame.domains.yield_pct.min,
        frame.domains.yield_pct.max
    );
    for p in &frame.points {
        let mark = match p.origin {
            PointOrigin::Observed => '*',
            PointOrigin::Interpolated => '~',
            PointOrigin::Synthetic => '?',
        };
        println!(
            "{mark} {}  nav {:>9.4}  yield {:>6.3}",
            p.time_formatted, p.nav, p.yield_pct
        );
    }

    // One polled frame, then a window switch that reuses the same snapshot.
    let (ctl_tx, ctl_rx) = watch::channel(ChartControls::new(Window::All, ViewMode::Nav));
    let (handle, mut frames) = chart.watch(fund, ctl_rx);
    frames.changed().await?;
    if let Some(Ok(f)) = frames.borrow_and_update().as_ref() {
        println!("watch: {} -> {} points", f.window, f.points.len());
    }
    ctl_tx.send(ChartControls::new(Window::OneHour, ViewMode::Nav))?;
    tokio::time::timeout(Duration::from_secs(5), frames.changed()).await??;
    if let Some(Ok(f)) = frames.borrow().as_ref() {
        println!("watch: {} -> {} points", f.window, f.points.len());
    }
    handle.stop().await;
    Ok(())
}
