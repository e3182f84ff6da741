use crate::geometry::ProgressGeometry;
use pillbar_core::DecorationType;
use pillbar_renderer::{BlendMode, Canvas, ForegroundImage, Paint};
use pillbar_theme::{Color, ProgressStyle};

/// Alpha of the Line-mode bevel stroke, applied to the decoration color.
const BEVEL_ALPHA: f32 = 0.25;

/// Everything one frame reads.  Borrowed, so drawing never mutates state.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub geometry:   &'a ProgressGeometry,
    pub style:      &'a ProgressStyle,
    /// Mapped fill extent in pixels from the inner left edge.
    pub progress:   f32,
    pub fill_color: Color,
    pub image:      Option<&'a ForegroundImage>,
}

/// One decoration's ordered composite sequence.
trait Layers {
    fn draw(&self, canvas: &mut dyn Canvas, frame: &Frame<'_>);
}

/// Issues the per-frame draw sequence inside one isolated layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayeredRenderer;

impl LayeredRenderer {
    /// Draw `frame`.  Does nothing until the widget has a non-zero size.
    pub fn draw(canvas: &mut dyn Canvas, frame: &Frame<'_>) {
        let g = frame.geometry;
        if g.is_empty() {
            tracing::trace!("skipping frame: no layout size yet");
            return;
        }

        canvas.save_layer(g.outer);
        match g.decoration {
            DecorationType::Tick => TickLayers.draw(canvas, frame),
            DecorationType::Line => LineLayers.draw(canvas, frame),
        }
        canvas.restore();
    }
}

/// Base pill, cleared window, additive fill, XOR notches.
struct TickLayers;

impl Layers for TickLayers {
    fn draw(&self, canvas: &mut dyn Canvas, frame: &Frame<'_>) {
        let g = frame.geometry;
        let base = frame.style.color_base;

        canvas.fill_round_rect(g.outer, g.outer_radius, &Paint::fill(base));
        canvas.fill_round_rect(
            g.inner,
            g.inner_radius,
            &Paint::fill(Color::BLACK).with_blend(BlendMode::Clear),
        );

        // Notches go on top: XOR re-opens them where the fill landed.
        let fill = g.inner.with_x(g.inner.left, g.inner.left + frame.progress);
        canvas.fill_rect(fill, &Paint::fill(frame.fill_color).with_blend(BlendMode::Plus));

        let notch = Paint::fill(base).with_blend(BlendMode::Xor);
        for rect in g.notches() {
            canvas.fill_rect(rect, &notch);
        }
    }
}

/// Base pill, image (or flat) fill clipped atop, base re-covers the
/// unfilled tail, optional bevel stroke.
struct LineLayers;

impl Layers for LineLayers {
    fn draw(&self, canvas: &mut dyn Canvas, frame: &Frame<'_>) {
        let g = frame.geometry;
        let style = frame.style;
        let base = style.color_base;

        canvas.fill_round_rect(g.outer, g.outer_radius, &Paint::fill(base));
        canvas.fill_round_rect(
            g.inner,
            g.inner_radius,
            &Paint::fill(base).with_blend(BlendMode::Destination),
        );

        match frame.image {
            Some(image) => canvas.draw_image(image, g.inner, BlendMode::SourceAtop),
            None => canvas.fill_rect(
                g.inner.truncated(),
                &Paint::fill(frame.fill_color).with_blend(BlendMode::SourceAtop),
            ),
        }

        let tail = g.inner.with_x(g.inner.left + frame.progress, g.inner.right);
        canvas.fill_rect(tail, &Paint::fill(base).with_blend(BlendMode::SourceAtop));

        if style.border_width > 0.0 {
            canvas.stroke_round_rect(
                g.inner,
                g.inner_radius,
                style.border_width,
                &Paint::fill(style.color_decoration.with_alpha(BEVEL_ALPHA)),
            );
        }
    }
}
