//! Drawing primitives and compositing backends for the progress bar.
//!
//! - [`Canvas`]: the host surface contract (rounded rects, rects, images,
//!   Porter-Duff blending, offscreen layers)
//! - [`PixmapCanvas`]: software implementation on top of `tiny-skia`
//! - [`RecordingCanvas`]: captures the op sequence, for tests and debugging

pub mod canvas;
pub mod image;
pub mod recording;
pub mod skia;

pub use canvas::{BlendMode, Canvas, Paint};
pub use image::ForegroundImage;
pub use recording::{DrawOp, RecordingCanvas};
pub use skia::{round_rect_path, unpremultiplied_rgba, PixmapCanvas};
