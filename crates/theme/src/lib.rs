//! Colors and compiled per-bar styles.

pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::{ProgressStyle, DEFAULT_TICK_COUNT};
