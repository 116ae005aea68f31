//! The polling/debounce driver behind [`Navchart::watch`].

use std::pin::Pin;

use navchart_core::{ChartControls, ChartFrame, FundId, NavchartError, PollHandle};
use tokio::sync::{oneshot, watch};
use tokio::time::{MissedTickBehavior, Sleep};

use crate::core::{Navchart, Snapshot};

/// What the driver publishes after each coalesced run.
pub type FrameUpdate = Result<ChartFrame, NavchartError>;

/// Per-watch state owned by the driver task.
struct Poller {
    chart: Navchart,
    fund: FundId,
    snapshot: Option<Snapshot>,
    last_error: Option<NavchartError>,
}

impl Poller {
    fn record(&mut self, res: Result<Snapshot, NavchartError>) {
        match res {
            Ok(snap) => {
                self.snapshot = Some(snap);
                self.last_error = None;
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    fund = %self.fund,
                    error = %e,
                    kept_snapshot = self.snapshot.is_some(),
                    "poll failed"
                );
                self.last_error = Some(e);
            }
        }
    }

    /// The latest snapshot wins; an error surfaces only while nothing has
    /// ever been fetched.
    fn frame(&self, controls: ChartControls) -> Option<FrameUpdate> {
        match (&self.snapshot, &self.last_error) {
            (Some(snap), _) => Some(self.chart.prepare(
                &self.fund,
                &snap.nav,
                &snap.yield_pct,
                controls,
                self.chart.now(),
            )),
            (None, Some(e)) => Some(Err(e.clone())),
            (None, None) => None,
        }
    }
}

impl Navchart {
    /// Poll the source for `fund` and publish a fresh frame whenever data or
    /// controls change.
    ///
    /// - The source is polled immediately, then every `poll_interval`.
    /// - A completed poll or a change on `controls` arms a `debounce` timer;
    ///   every further trigger restarts it, so a burst collapses into one run
    ///   over the latest snapshot and the latest controls.
    /// - A failed poll keeps the previous snapshot; the error is published
    ///   only if no snapshot has been fetched yet.
    /// - The receiver starts at `None` and always holds the newest update.
    ///
    /// The task ends when the handle is stopped or dropped, when the
    /// `controls` sender is dropped, or when every frame receiver is gone.
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn watch(
        &self,
        fund: FundId,
        controls: watch::Receiver<ChartControls>,
    ) -> (PollHandle, watch::Receiver<Option<FrameUpdate>>) {
        let (out_tx, out_rx) = watch::channel(None);
        let (stop_tx, stop_rx) = oneshot::channel();
        let poller = Poller {
            chart: self.clone(),
            fund,
            snapshot: None,
            last_error: None,
        };
        let join = tokio::spawn(drive(poller, controls, out_tx, stop_rx));
        (PollHandle::new(join, stop_tx), out_rx)
    }
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "navchart::poll::drive", skip_all, fields(fund = %poller.fund))
)]
async fn drive(
    mut poller: Poller,
    mut controls: watch::Receiver<ChartControls>,
    out: watch::Sender<Option<FrameUpdate>>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let debounce = poller.chart.poll.debounce;
    let mut ticker = tokio::time::interval(poller.chart.poll.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut pending: Option<Pin<Box<Sleep>>> = None;

    loop {
        tokio::select! {
            _ = &mut stop_rx => break,
            () = out.closed() => break,
            changed = controls.changed() => {
                if changed.is_err() {
                    break;
                }
                #[cfg(feature = "tracing")]
                tracing::trace!(restarted = pending.is_some(), "controls changed; debounce armed");
            }
            _ = ticker.tick() => {
                let fetched = tokio::select! {
                    _ = &mut stop_rx => break,
                    res = poller.chart.fetch_snapshot(&poller.fund) => res,
                };
                poller.record(fetched);
                #[cfg(feature = "tracing")]
                tracing::trace!(restarted = pending.is_some(), "poll done; debounce armed");
            }
            () = async {
                if let Some(timer) = pending.as_mut() {
                    timer.await;
                }
            }, if pending.is_some() => {
                pending = None;
                let current = *controls.borrow_and_update();
                if let Some(update) = poller.frame(current) {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        window = %current.window,
                        view = %current.view,
                        ok = update.is_ok(),
                        "publishing frame"
                    );
                    out.send_replace(Some(update));
                }
                continue;
            }
        }
        pending = Some(Box::pin(tokio::time::sleep(debounce)));
    }
}
