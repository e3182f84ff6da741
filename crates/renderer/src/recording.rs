use crate::canvas::{BlendMode, Canvas, Paint};
use crate::image::ForegroundImage;
use pillbar_core::Rect;

/// One captured [`Canvas`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SaveLayer(Rect),
    Restore,
    FillRect { rect: Rect, paint: Paint },
    FillRoundRect { rect: Rect, radius: f32, paint: Paint },
    StrokeRoundRect { rect: Rect, radius: f32, width: f32, paint: Paint },
    DrawImage { dst: Rect, blend: BlendMode },
}

impl DrawOp {
    /// Blend mode the op composites with (`SaveLayer`/`Restore` have none).
    pub fn blend(&self) -> Option<BlendMode> {
        match self {
            Self::FillRect { paint, .. }
            | Self::FillRoundRect { paint, .. }
            | Self::StrokeRoundRect { paint, .. } => Some(paint.blend),
            Self::DrawImage { blend, .. } => Some(*blend),
            Self::SaveLayer(_) | Self::Restore => None,
        }
    }
}

/// [`Canvas`] that records calls instead of rasterising them.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

impl Canvas for RecordingCanvas {
    fn save_layer(&mut self, bounds: Rect) {
        self.ops.push(DrawOp::SaveLayer(bounds));
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.ops.push(DrawOp::FillRect { rect, paint: *paint });
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, paint: &Paint) {
        self.ops.push(DrawOp::FillRoundRect { rect, radius, paint: *paint });
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, width: f32, paint: &Paint) {
        self.ops.push(DrawOp::StrokeRoundRect { rect, radius, width, paint: *paint });
    }

    fn draw_image(&mut self, _image: &ForegroundImage, dst: Rect, blend: BlendMode) {
        self.ops.push(DrawOp::DrawImage { dst, blend });
    }
}
