use crate::canvas::{BlendMode, Canvas, Paint};
use crate::image::ForegroundImage;
use pillbar_core::{PillError, Rect, Result};
use tiny_skia::{
    FillRule, FilterQuality, Path, PathBuilder, Pattern, Pixmap, SpreadMode, Stroke, Transform,
};

/// Cubic Bézier handle length for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

/// [`Canvas`] backed by a `tiny-skia` [`Pixmap`].
///
/// Each `save_layer` allocates a transparent pixmap the size of the target;
/// `restore` composites it back clipped to the saved bounds.  A layer that
/// could not be allocated still occupies a stack slot so saves and restores
/// stay paired; drawing meanwhile lands on the nearest live layer.
pub struct PixmapCanvas {
    target: Pixmap,
    layers: Vec<Option<(Pixmap, Rect)>>,
}

impl PixmapCanvas {
    /// Allocate a transparent `width × height` surface.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let target = Pixmap::new(width, height)
            .ok_or_else(|| PillError::Render(format!("cannot allocate {width}x{height} surface")))?;
        Ok(Self { target, layers: Vec::new() })
    }

    /// Flatten any unbalanced layers and hand back the finished frame.
    pub fn finish(mut self) -> Pixmap {
        if !self.layers.is_empty() {
            tracing::warn!(open = self.layers.len(), "frame finished with unrestored layers");
        }
        while !self.layers.is_empty() {
            self.restore();
        }
        self.target
    }

    fn top(&mut self) -> &mut Pixmap {
        match self.layers.iter_mut().rev().find_map(Option::as_mut) {
            Some((layer, _)) => layer,
            None => &mut self.target,
        }
    }
}

impl Canvas for PixmapCanvas {
    fn save_layer(&mut self, bounds: Rect) {
        let layer = Pixmap::new(self.target.width(), self.target.height());
        if layer.is_none() {
            tracing::warn!("cannot allocate offscreen layer");
        }
        self.layers.push(layer.map(|layer| (layer, bounds)));
    }

    fn restore(&mut self) {
        let Some(entry) = self.layers.pop() else {
            tracing::warn!("restore without matching save_layer");
            return;
        };
        let Some((layer, bounds)) = entry else { return };
        let Some(clip) = to_skia_rect(bounds) else { return };

        let mut paint = tiny_skia::Paint::default();
        paint.shader = Pattern::new(
            layer.as_ref(),
            SpreadMode::Pad,
            FilterQuality::Nearest,
            1.0,
            Transform::identity(),
        );
        self.top().fill_rect(clip, &paint, Transform::identity(), None);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let Some(rect) = to_skia_rect(rect) else { return };
        let paint = to_skia_paint(paint);
        self.top().fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, paint: &Paint) {
        let Some(path) = round_rect_path(rect, radius) else { return };
        let paint = to_skia_paint(paint);
        self.top().fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, width: f32, paint: &Paint) {
        let Some(path) = round_rect_path(rect, radius) else { return };
        let paint = to_skia_paint(paint);
        let stroke = Stroke { width, ..Stroke::default() };
        self.top().stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn draw_image(&mut self, image: &ForegroundImage, dst: Rect, blend: BlendMode) {
        let Some(rect) = to_skia_rect(dst) else { return };
        if image.width() == 0 || image.height() == 0 {
            return;
        }

        let sx = dst.width() / image.width() as f32;
        let sy = dst.height() / image.height() as f32;
        let mut paint = tiny_skia::Paint::default();
        paint.shader = Pattern::new(
            image.pixmap().as_ref(),
            SpreadMode::Pad,
            FilterQuality::Bilinear,
            1.0,
            Transform::from_row(sx, 0.0, 0.0, sy, dst.left, dst.top),
        );
        paint.blend_mode = blend.into();
        paint.anti_alias = true;
        self.top().fill_rect(rect, &paint, Transform::identity(), None);
    }
}

impl From<BlendMode> for tiny_skia::BlendMode {
    fn from(mode: BlendMode) -> Self {
        match mode {
            BlendMode::Clear       => Self::Clear,
            BlendMode::Destination => Self::Destination,
            BlendMode::SourceOver  => Self::SourceOver,
            BlendMode::SourceAtop  => Self::SourceAtop,
            BlendMode::Plus        => Self::Plus,
            BlendMode::Xor         => Self::Xor,
        }
    }
}

fn to_skia_paint(paint: &Paint) -> tiny_skia::Paint<'static> {
    let [r, g, b, a] = paint.color.to_rgba8();
    let mut out = tiny_skia::Paint::default();
    out.set_color_rgba8(r, g, b, a);
    out.blend_mode = paint.blend.into();
    out.anti_alias = paint.anti_alias;
    out
}

/// `None` for empty or non-finite rectangles; those draw nothing.
fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    if rect.is_empty() {
        return None;
    }
    tiny_skia::Rect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom)
}

/// Closed rounded-rectangle outline.  `radius` is clamped to half the
/// shorter side; zero gives a plain rectangle.
pub fn round_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    let bounds = to_skia_rect(rect)?;
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    if r == 0.0 {
        return Some(PathBuilder::from_rect(bounds));
    }

    let (l, t, rt, b) = (rect.left, rect.top, rect.right, rect.bottom);
    let k = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.cubic_to(rt - r + k, t, rt, t + r - k, rt, t + r);
    pb.line_to(rt, b - r);
    pb.cubic_to(rt, b - r + k, rt - r + k, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.cubic_to(l + r - k, b, l, b - r + k, l, b - r);
    pb.line_to(l, t + r);
    pb.cubic_to(l, t + r - k, l + r - k, t, l + r, t);
    pb.close();
    pb.finish()
}

/// Straight-alpha RGBA8 bytes, as image widgets expect.
pub fn unpremultiplied_rgba(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pillbar_theme::Color;

    fn rgba(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };

    #[test]
    fn zero_size_surface_is_a_render_error() {
        assert!(matches!(PixmapCanvas::new(0, 10), Err(PillError::Render(_))));
    }

    #[test]
    fn clear_carves_a_window() {
        let mut canvas = PixmapCanvas::new(20, 10).unwrap();
        canvas.save_layer(Rect::from_size(20.0, 10.0));
        canvas.fill_rect(Rect::from_size(20.0, 10.0), &Paint::fill(RED));
        canvas.fill_rect(
            Rect::from_ltrb(5.0, 0.0, 15.0, 10.0),
            &Paint::fill(Color::BLACK).with_blend(BlendMode::Clear),
        );
        canvas.restore();
        let frame = canvas.finish();

        assert_eq!(rgba(&frame, 2, 5), [255, 0, 0, 255]);
        assert_eq!(rgba(&frame, 10, 5)[3], 0);
    }

    #[test]
    fn source_atop_only_paints_over_existing_pixels() {
        let mut canvas = PixmapCanvas::new(20, 10).unwrap();
        canvas.fill_rect(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0), &Paint::fill(RED));
        canvas.fill_rect(
            Rect::from_size(20.0, 10.0),
            &Paint::fill(BLUE).with_blend(BlendMode::SourceAtop),
        );
        let frame = canvas.finish();

        assert_eq!(rgba(&frame, 5, 5), [0, 0, 255, 255]);
        assert_eq!(rgba(&frame, 15, 5)[3], 0);
    }

    #[test]
    fn xor_punches_through_overlap() {
        let mut canvas = PixmapCanvas::new(20, 10).unwrap();
        canvas.fill_rect(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0), &Paint::fill(RED));
        canvas.fill_rect(
            Rect::from_ltrb(5.0, 0.0, 15.0, 10.0),
            &Paint::fill(BLUE).with_blend(BlendMode::Xor),
        );
        let frame = canvas.finish();

        assert_eq!(rgba(&frame, 2, 5), [255, 0, 0, 255]);
        assert_eq!(rgba(&frame, 7, 5)[3], 0);
        assert_eq!(rgba(&frame, 12, 5), [0, 0, 255, 255]);
    }

    #[test]
    fn layer_is_clipped_to_saved_bounds() {
        let mut canvas = PixmapCanvas::new(20, 10).unwrap();
        canvas.save_layer(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0));
        canvas.fill_rect(Rect::from_size(20.0, 10.0), &Paint::fill(RED));
        canvas.restore();
        let frame = canvas.finish();

        assert_eq!(rgba(&frame, 5, 5), [255, 0, 0, 255]);
        assert_eq!(rgba(&frame, 15, 5)[3], 0);
    }

    #[test]
    fn failed_layer_keeps_saves_and_restores_paired() {
        let mut canvas = PixmapCanvas::new(20, 10).unwrap();
        canvas.save_layer(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0));
        canvas.layers.push(None);

        canvas.fill_rect(Rect::from_size(20.0, 10.0), &Paint::fill(RED));
        canvas.restore();
        assert_eq!(canvas.layers.len(), 1);

        canvas.restore();
        assert!(canvas.layers.is_empty());
        let frame = canvas.finish();

        assert_eq!(rgba(&frame, 5, 5), [255, 0, 0, 255]);
        assert_eq!(rgba(&frame, 15, 5)[3], 0);
    }

    #[test]
    fn image_is_scaled_into_destination() {
        let mut src = Pixmap::new(2, 2).unwrap();
        src.fill(tiny_skia::Color::from_rgba8(0, 0, 255, 255));
        let image = ForegroundImage::from_pixmap(src);

        let mut canvas = PixmapCanvas::new(20, 10).unwrap();
        canvas.draw_image(&image, Rect::from_ltrb(10.0, 0.0, 20.0, 10.0), BlendMode::SourceOver);
        let frame = canvas.finish();

        assert_eq!(rgba(&frame, 15, 5), [0, 0, 255, 255]);
        assert_eq!(rgba(&frame, 5, 5)[3], 0);
    }

    #[test]
    fn round_rect_path_spans_the_rect() {
        let path = round_rect_path(Rect::from_ltrb(2.0, 2.0, 298.0, 22.0), 50.0).unwrap();
        let b = path.bounds();
        assert!((b.left() - 2.0).abs() < 1e-3);
        assert!((b.right() - 298.0).abs() < 1e-3);
        assert!((b.bottom() - 22.0).abs() < 1e-3);
        assert!(round_rect_path(Rect::EMPTY, 4.0).is_none());
    }

    #[test]
    fn unpremultiply_restores_straight_alpha() {
        let mut pixmap = Pixmap::new(1, 1).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(255, 0, 0, 128));
        let bytes = unpremultiplied_rgba(&pixmap);
        assert_eq!(bytes.len(), 4);
        assert_eq!(bytes[0], 255);
        assert_eq!(bytes[3], 128);
    }
}
