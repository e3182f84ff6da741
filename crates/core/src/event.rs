/// Redraw request posted by a widget's periodic timer.
///
/// Timer callbacks never touch widget state directly; they only post this
/// onto the host's UI queue, which then calls `on_frame` + `render` on the
/// UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalidate {
    /// Identifier of the widget that requested the redraw.
    pub widget: String,
}

impl Invalidate {
    pub fn new(widget: impl Into<String>) -> Self {
        Self { widget: widget.into() }
    }
}
