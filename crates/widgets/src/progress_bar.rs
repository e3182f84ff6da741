use crate::blink::BlinkAnimator;
use crate::geometry::ProgressGeometry;
use crate::layers::{Frame, LayeredRenderer};
use crate::mapper::{clamp_fraction, ProgressMapper};
use crate::timer::{RedrawTimer, REDRAW_PERIOD};
use pillbar_core::{DecorationType, Invalidate, Widget};
use pillbar_renderer::{Canvas, ForegroundImage, PixmapCanvas};
use pillbar_theme::{Color, ProgressStyle};
use std::time::Instant;
use tiny_skia::Pixmap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Pill-shaped horizontal progress bar.
///
/// Owned and driven by the host's UI thread.  Mutators (`set_progress`,
/// `reset`, `blink`, `set_decoration_type`) update state and post an
/// [`Invalidate`]; the host answers with [`ProgressBar::on_frame`] and
/// [`ProgressBar::render`].
#[derive(Debug)]
pub struct ProgressBar {
    id:         String,
    style:      ProgressStyle,
    geometry:   ProgressGeometry,
    width:      f32,
    height:     f32,
    /// Last requested fraction, kept so resizes can remap it.
    fraction:   f32,
    /// Mapped pixel extent actually drawn.
    progress:   f32,
    fill_color: Color,
    blink:      BlinkAnimator,
    image:      Option<ForegroundImage>,
    timer:      Option<RedrawTimer>,
    invalidate: Option<mpsc::Sender<Invalidate>>,
    dirty:      bool,
}

impl ProgressBar {
    pub fn new(id: impl Into<String>, style: ProgressStyle) -> Self {
        let fill_color = style.color_foreground;
        Self {
            id: id.into(),
            geometry: ProgressGeometry::compute(0.0, 0.0, &style),
            blink: BlinkAnimator::new(fill_color),
            style,
            width: 0.0,
            height: 0.0,
            fraction: 0.0,
            progress: 0.0,
            fill_color,
            image: None,
            timer: None,
            invalidate: None,
            dirty: true,
        }
    }

    // ── Layout ────────────────────────────────────────────────────────────────

    /// Host layout pass.  Recomputes geometry and remaps the current fraction.
    pub fn set_size(&mut self, width: f32, height: f32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.relayout();
        self.request_redraw();
    }

    fn relayout(&mut self) {
        self.geometry = ProgressGeometry::compute(self.width, self.height, &self.style);
        self.progress = ProgressMapper::new(&self.geometry).map(self.fraction);
    }

    // ── Public mutators ───────────────────────────────────────────────────────

    /// Set progress as a fraction in `[0, 1]`; out-of-range input is clamped.
    pub fn set_progress(&mut self, fraction: f32) {
        self.fraction = clamp_fraction(fraction);
        self.progress = ProgressMapper::new(&self.geometry).map(self.fraction);
        debug!(id = %self.id, fraction = self.fraction, px = self.progress, "progress set");
        self.request_redraw();
    }

    /// Drop the fill back to empty.
    pub fn reset(&mut self) {
        self.fraction = 0.0;
        self.progress = 0.0;
        self.request_redraw();
    }

    /// Fade the fill in from transparent over 300ms, restarting any blink
    /// already in flight.
    ///
    /// Only an attached bar has a frame clock to finish the fade, so a
    /// detached bar ignores the call and keeps its foreground fill.
    pub fn blink(&mut self, now: Instant) {
        if !self.is_attached() {
            debug!(id = %self.id, "blink ignored: not attached");
            return;
        }
        self.blink.start(now);
        if let Some(color) = self.blink.sample(now) {
            self.fill_color = color;
        }
        self.request_redraw();
    }

    /// Switch between Tick and Line decoration after construction.
    pub fn set_decoration_type(&mut self, decoration: DecorationType) {
        if decoration == self.style.decoration() {
            return;
        }
        info!(id = %self.id, ?decoration, "decoration changed");

        self.style.set_decoration(decoration);
        self.blink.set_target(self.style.color_foreground);
        if !self.blink.is_running() {
            self.fill_color = self.style.color_foreground;
        }
        match decoration {
            DecorationType::Line if self.is_attached() && self.image.is_none() => {
                self.image = self.load_image();
            }
            DecorationType::Tick => {
                if self.image.take().is_some() {
                    debug!(id = %self.id, "foreground image released");
                }
            }
            DecorationType::Line => {}
        }
        self.relayout();
        self.request_redraw();
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    /// Emit this frame's draw sequence.  A widget without a layout size
    /// draws nothing.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        let image = match self.style.decoration() {
            DecorationType::Line => self.image.as_ref(),
            DecorationType::Tick => None,
        };
        LayeredRenderer::draw(
            canvas,
            &Frame {
                geometry:   &self.geometry,
                style:      &self.style,
                progress:   self.progress,
                fill_color: self.fill_color,
                image,
            },
        );
    }

    /// Render into a fresh software surface sized to the layout.
    /// `None` until the host has given the widget a size.
    pub fn rasterize(&self) -> Option<Pixmap> {
        if self.geometry.is_empty() {
            return None;
        }
        let mut canvas = match PixmapCanvas::new(self.width.ceil() as u32, self.height.ceil() as u32) {
            Ok(c) => c,
            Err(e) => {
                warn!(id = %self.id, "skipping frame: {e}");
                return None;
            }
        };
        self.render(&mut canvas);
        Some(canvas.finish())
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn geometry(&self) -> &ProgressGeometry {
        &self.geometry
    }

    pub fn style(&self) -> &ProgressStyle {
        &self.style
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.invalidate.is_some()
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn request_redraw(&mut self) {
        self.dirty = true;
        if let Some(tx) = &self.invalidate {
            // Full queue means a redraw is already pending.
            let _ = tx.try_send(Invalidate::new(self.id.as_str()));
        }
    }

    /// Decode the Line-mode foreground image.  Failure degrades to the flat
    /// fill.
    fn load_image(&self) -> Option<ForegroundImage> {
        if self.style.decoration() != DecorationType::Line {
            return None;
        }
        let path = self.style.image_foreground.as_ref()?;
        match ForegroundImage::load(path) {
            Ok(image) => {
                debug!(id = %self.id, w = image.width(), h = image.height(), "foreground image decoded");
                Some(image)
            }
            Err(e) => {
                warn!(id = %self.id, "{e}; falling back to flat fill");
                None
            }
        }
    }
}

impl Widget for ProgressBar {
    fn id(&self) -> &str {
        &self.id
    }

    fn attach(&mut self, invalidate: mpsc::Sender<Invalidate>) {
        if self.is_attached() {
            warn!(id = %self.id, "attach called twice; ignoring");
            return;
        }

        self.image = self.load_image();
        self.timer = match RedrawTimer::spawn(&self.id, REDRAW_PERIOD, invalidate.clone()) {
            Ok(timer) => Some(timer),
            Err(e) => {
                warn!(id = %self.id, "{e}; redraws only on state changes");
                None
            }
        };
        self.invalidate = Some(invalidate);
        info!(id = %self.id, "attached");
        self.request_redraw();
    }

    fn detach(&mut self) {
        if !self.is_attached() {
            return;
        }

        self.timer = None;
        self.invalidate = None;
        self.blink.cancel();
        self.fill_color = self.style.color_foreground;
        if self.image.take().is_some() {
            debug!(id = %self.id, "foreground image released");
        }
        info!(id = %self.id, "detached");
    }

    fn on_frame(&mut self, now: Instant) -> bool {
        if !self.is_attached() {
            return false;
        }
        if let Some(color) = self.blink.sample(now) {
            self.fill_color = color;
            self.dirty = true;
        }
        std::mem::take(&mut self.dirty)
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blink::BLINK_DURATION;
    use crate::fixtures::style;
    use pillbar_config::StyleConfig;
    use std::time::Duration;
    use tokio::time;

    fn tick_bar() -> ProgressBar {
        let mut bar = ProgressBar::new("tick", style(DecorationType::Tick, 2.0, 10.0));
        bar.set_size(300.0, 24.0);
        bar
    }

    fn attached(bar: &mut ProgressBar) -> mpsc::Receiver<Invalidate> {
        let (tx, rx) = mpsc::channel(16);
        bar.attach(tx);
        rx
    }

    #[test]
    fn progress_before_layout_is_remapped_on_resize() {
        let mut bar = ProgressBar::new("tick", style(DecorationType::Tick, 2.0, 10.0));
        bar.set_progress(0.55);
        assert_eq!(bar.progress(), 0.0);
        assert!(bar.rasterize().is_none());

        bar.set_size(300.0, 24.0);
        assert_eq!(bar.progress(), 162.900_01);
    }

    #[test]
    fn set_progress_is_idempotent() {
        let mut bar = tick_bar();
        bar.set_progress(0.37);
        let (px, geometry) = (bar.progress(), *bar.geometry());
        bar.set_progress(0.37);
        assert_eq!(bar.progress(), px);
        assert_eq!(*bar.geometry(), geometry);
    }

    #[test]
    fn reset_always_zeroes() {
        let mut bar = tick_bar();
        bar.set_progress(0.9);
        bar.reset();
        assert_eq!(bar.progress(), 0.0);
        assert_eq!(bar.fraction(), 0.0);

        bar.set_size(600.0, 24.0);
        assert_eq!(bar.progress(), 0.0);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let mut bar = tick_bar();
        bar.set_progress(1.7);
        assert_eq!(bar.fraction(), 1.0);
        assert_eq!(bar.progress(), bar.geometry().inner.width());
    }

    #[test]
    fn switching_decoration_rebuilds_geometry() {
        let cfg = StyleConfig { decoration_type: DecorationType::Line, size_border: 2.0, ..StyleConfig::default() };
        let mut bar = ProgressBar::new("bar", ProgressStyle::from_config(&cfg));
        bar.set_size(300.0, 24.0);
        bar.set_progress(0.5);
        assert_eq!(bar.progress(), 150.0);
        assert_eq!(bar.fill_color(), Color::GREEN);

        bar.set_decoration_type(DecorationType::Tick);
        assert_eq!(bar.geometry().inner.left, 2.0);
        assert_eq!(bar.fill_color(), Color::WHITE);
        assert_eq!(bar.progress(), ProgressMapper::new(bar.geometry()).map(0.5));

        bar.set_decoration_type(DecorationType::Line);
        assert_eq!(bar.progress(), 150.0);
        assert_eq!(bar.fill_color(), Color::GREEN);
    }

    #[test]
    fn blink_runs_once_and_restores_foreground() {
        let mut bar = tick_bar();
        let mut rx = attached(&mut bar);
        let t0 = Instant::now();

        bar.blink(t0);
        assert_eq!(bar.fill_color(), Color::TRANSPARENT);
        assert!(rx.try_recv().is_ok());

        assert!(bar.on_frame(t0 + Duration::from_millis(100)));
        let mid = bar.fill_color();
        assert!(mid.a > 0.0 && mid.a < 1.0);

        assert!(bar.on_frame(t0 + BLINK_DURATION));
        assert_eq!(bar.fill_color(), bar.style().color_foreground);

        // Animation over: nothing left to redraw.
        assert!(!bar.on_frame(t0 + BLINK_DURATION + Duration::from_millis(10)));
    }

    #[test]
    fn mutators_post_invalidations_while_attached() {
        let mut bar = tick_bar();
        bar.set_progress(0.2);
        let mut rx = attached(&mut bar);
        while rx.try_recv().is_ok() {}

        bar.set_progress(0.4);
        assert_eq!(rx.try_recv().unwrap(), Invalidate::new("tick"));
        bar.reset();
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn detached_bar_never_asks_for_frames() {
        let mut bar = tick_bar();
        let _rx = attached(&mut bar);
        let t0 = Instant::now();
        bar.blink(t0);
        bar.detach();

        assert!(!bar.is_attached());
        assert!(!bar.on_frame(t0 + Duration::from_millis(50)));
        assert_eq!(bar.fill_color(), bar.style().color_foreground);
    }

    #[test]
    fn blink_on_unattached_bar_keeps_foreground() {
        let mut bar = ProgressBar::new("line", style(DecorationType::Line, 2.0, 10.0));
        bar.set_size(100.0, 10.0);
        bar.set_progress(0.5);
        let t0 = Instant::now();
        bar.blink(t0);

        assert_eq!(bar.fill_color(), bar.style().color_foreground);
        assert!(!bar.on_frame(t0 + Duration::from_secs(5)));
        assert_eq!(bar.fill_color(), bar.style().color_foreground);

        let frame = bar.rasterize().unwrap();
        let px = frame.pixel(25, 5).unwrap().demultiply();
        assert_eq!(px.alpha(), 255);
    }

    #[test]
    fn line_bar_with_bad_image_falls_back_to_flat_fill() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = StyleConfig {
            decoration_type: DecorationType::Line,
            image_foreground: Some(dir.path().join("missing.png")),
            ..StyleConfig::default()
        };
        let mut bar = ProgressBar::new("line", ProgressStyle::from_config(&cfg));
        bar.set_size(100.0, 10.0);
        let _rx = attached(&mut bar);
        assert!(!bar.has_image());

        bar.set_progress(0.5);
        let frame = bar.rasterize().unwrap();
        let px = frame.pixel(25, 5).unwrap().demultiply();
        assert_eq!((px.red(), px.green(), px.blue()), (0, 255, 0));
    }

    #[test]
    fn line_bar_image_lives_only_while_attached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fg.png");
        let mut png = Pixmap::new(8, 8).unwrap();
        png.fill(tiny_skia::Color::from_rgba8(0, 0, 255, 255));
        png.save_png(&path).unwrap();

        let cfg = StyleConfig {
            decoration_type: DecorationType::Line,
            image_foreground: Some(path),
            ..StyleConfig::default()
        };
        let mut bar = ProgressBar::new("line", ProgressStyle::from_config(&cfg));
        bar.set_size(100.0, 10.0);
        assert!(!bar.has_image());

        let _rx = attached(&mut bar);
        assert!(bar.has_image());
        bar.set_progress(1.0);
        let frame = bar.rasterize().unwrap();
        let px = frame.pixel(50, 5).unwrap().demultiply();
        assert_eq!((px.red(), px.green(), px.blue()), (0, 0, 255));

        bar.detach();
        assert!(!bar.has_image());
    }

    #[test]
    fn switching_to_tick_releases_the_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fg.png");
        let mut png = Pixmap::new(8, 8).unwrap();
        png.fill(tiny_skia::Color::from_rgba8(0, 0, 255, 255));
        png.save_png(&path).unwrap();

        let cfg = StyleConfig {
            decoration_type: DecorationType::Line,
            image_foreground: Some(path),
            ..StyleConfig::default()
        };
        let mut bar = ProgressBar::new("line", ProgressStyle::from_config(&cfg));
        bar.set_size(100.0, 10.0);
        let _rx = attached(&mut bar);
        assert!(bar.has_image());

        bar.set_decoration_type(DecorationType::Tick);
        assert!(!bar.has_image());

        bar.set_decoration_type(DecorationType::Line);
        assert!(bar.has_image());
    }

    #[tokio::test]
    async fn detach_stops_the_redraw_timer() {
        let mut bar = tick_bar();
        let mut rx = attached(&mut bar);

        // Periodic ticks arrive while attached.
        let tick = time::timeout(Duration::from_secs(2), rx.recv()).await.unwrap();
        assert_eq!(tick, Some(Invalidate::new("tick")));

        bar.detach();

        // Drain anything queued before detach; then the channel is closed.
        while time::timeout(Duration::from_secs(2), rx.recv()).await.unwrap().is_some() {}
    }
}
