use crate::image::ForegroundImage;
use pillbar_core::Rect;
use pillbar_theme::Color;

/// Porter-Duff rule combining a draw with what the current layer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Erase to transparent wherever the shape covers.
    Clear,
    /// Keep the destination untouched.
    Destination,
    /// Ordinary painting.
    #[default]
    SourceOver,
    /// Paint only where the destination is already opaque.
    SourceAtop,
    /// Saturating sum of source and destination.
    Plus,
    /// Keep whichever of source/destination is not overlapped by the other.
    Xor,
}

/// Fill/stroke settings for one draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color:      Color,
    pub blend:      BlendMode,
    pub anti_alias: bool,
}

impl Paint {
    /// Anti-aliased source-over paint of `color`.
    pub fn fill(color: Color) -> Self {
        Self { color, blend: BlendMode::SourceOver, anti_alias: true }
    }

    #[must_use]
    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }
}

/// Immediate-mode drawing surface supplied by the host.
///
/// Calls between [`Canvas::save_layer`] and the matching [`Canvas::restore`]
/// land on an isolated transparent layer, so blend modes only see what the
/// widget itself drew.  On restore the layer is composited source-over onto
/// its parent, clipped to the saved bounds.
pub trait Canvas {
    fn save_layer(&mut self, bounds: Rect);
    fn restore(&mut self);
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);
    fn fill_round_rect(&mut self, rect: Rect, radius: f32, paint: &Paint);
    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, width: f32, paint: &Paint);
    /// Draw `image` scaled to fill `dst`.
    fn draw_image(&mut self, image: &ForegroundImage, dst: Rect, blend: BlendMode);
}
