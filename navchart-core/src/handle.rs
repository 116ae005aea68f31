use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Owns the background polling task.
///
/// [`PollHandle::stop`] requests a graceful stop and waits for the task to
/// exit. Dropping the handle sends the same signal and aborts the task if it
/// is still running, so no poll outlives its owner.
#[derive(Debug)]
pub struct PollHandle {
    inner: Option<JoinHandle<()>>,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl PollHandle {
    /// Wrap a spawned task and the sender half of its stop channel.
    #[must_use]
    pub const fn new(inner: JoinHandle<()>, stop_tx: oneshot::Sender<()>) -> Self {
        Self {
            inner: Some(inner),
            stop_tx: Some(stop_tx),
        }
    }

    /// Signal the task to stop and wait for it to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(inner) = self.inner.take() {
            let _ = inner.await;
        }
    }

    /// Abort the task without waiting.
    pub fn abort(mut self) {
        self.teardown();
    }

    /// True once the task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.inner.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Send the stop signal if it is still unsent, then abort the task
    /// unless it already exited.
    fn teardown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.inner.take()
            && !task.is_finished()
        {
            task.abort();
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}
