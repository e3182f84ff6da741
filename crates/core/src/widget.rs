use crate::event::Invalidate;
use std::time::Instant;
use tokio::sync::mpsc;

/// Lifecycle contract between a widget and its host container.
///
/// All methods are called from the host's UI thread.  The only thing that
/// crosses threads is the [`Invalidate`] sender handed over on attach.
pub trait Widget: std::fmt::Debug {
    /// Unique string identifier, e.g. `"tick"` or `"line"`.
    fn id(&self) -> &str;

    /// Called when the widget enters the view hierarchy.
    fn attach(&mut self, invalidate: mpsc::Sender<Invalidate>);

    /// Called when the widget leaves the view hierarchy.  Must stop every
    /// scheduled task and release decoded resources.
    fn detach(&mut self);

    /// Advance time-driven state.  Returns `true` when a redraw is needed.
    fn on_frame(&mut self, _now: Instant) -> bool {
        false
    }
}
