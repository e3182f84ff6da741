pub mod blink;
pub mod geometry;
pub mod layers;
pub mod mapper;
pub mod progress_bar;
pub mod timer;

pub use blink::{BlinkAnimator, BLINK_DURATION};
pub use geometry::ProgressGeometry;
pub use layers::{Frame, LayeredRenderer};
pub use mapper::ProgressMapper;
pub use progress_bar::ProgressBar;
pub use timer::{RedrawTimer, REDRAW_PERIOD};

#[cfg(test)]
mod fixtures;
