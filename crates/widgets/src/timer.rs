use pillbar_core::{Invalidate, PillError, Result};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Period of the attached-lifetime redraw timer.
pub const REDRAW_PERIOD: Duration = Duration::from_millis(10);

/// Repeating task that posts [`Invalidate`] onto the host's UI queue.
///
/// The task never touches widget state.  Ticks are coalesced: if the queue
/// already holds an unhandled request, the new one is dropped.  Dropping the
/// handle aborts the task, which in turn drops its sender.
#[derive(Debug)]
pub struct RedrawTimer {
    task: JoinHandle<()>,
}

impl RedrawTimer {
    /// Spawn on the current Tokio runtime.  The first tick fires one
    /// `period` after spawning.
    pub fn spawn(widget: &str, period: Duration, tx: mpsc::Sender<Invalidate>) -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| PillError::Timer(format!("no Tokio runtime for '{widget}': {e}")))?;

        let id = widget.to_string();
        let task = runtime.spawn(async move {
            let mut ticker = time::interval_at(time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                match tx.try_send(Invalidate::new(id.as_str())) {
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Closed(_)) => break, // host gone
                }
            }
        });

        Ok(Self { task })
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RedrawTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
