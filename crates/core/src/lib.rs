pub mod decoration;
pub mod error;
pub mod event;
pub mod geometry;
pub mod widget;

pub use decoration::DecorationType;
pub use error::{PillError, Result};
pub use event::Invalidate;
pub use geometry::Rect;
pub use widget::Widget;
