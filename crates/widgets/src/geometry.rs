use pillbar_core::{DecorationType, Rect};
use pillbar_theme::ProgressStyle;

/// Every rectangle and spacing a frame needs, derived from the layout size
/// and the style.
///
/// Pure value: recompute with [`ProgressGeometry::compute`] whenever the
/// host resizes the widget or its decoration changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressGeometry {
    pub decoration:    DecorationType,
    /// `[0, 0, width, height]`.
    pub outer:         Rect,
    /// `outer` inset by [`Self::border`].
    pub inner:         Rect,
    pub outer_radius:  f32,
    /// `max(outer_radius - border, 0)`.
    pub inner_radius:  f32,
    /// Effective inset: the style's border in Tick mode, `0` in Line mode
    /// (Line draws its border as a stroke instead).
    pub border:        f32,
    pub tick_count:    u32,
    /// Width of one segment between two notches.
    pub tick_interval: f32,
}

impl ProgressGeometry {
    pub fn compute(width: f32, height: f32, style: &ProgressStyle) -> Self {
        let decoration = style.decoration();
        let tick_count = style.tick_count.max(1);
        let border = match decoration {
            DecorationType::Tick => style.border_width,
            DecorationType::Line => 0.0,
        };

        let outer = if width > 0.0 && height > 0.0 {
            Rect::from_size(width, height)
        } else {
            Rect::EMPTY
        };
        let inner = outer.inset(border);

        let mut geometry = Self {
            decoration,
            outer,
            inner,
            outer_radius: style.corner_radius,
            inner_radius: (style.corner_radius - border).max(0.0),
            border,
            tick_count,
            tick_interval: 0.0,
        };
        geometry.tick_interval = geometry.track_width() / tick_count as f32;
        geometry
    }

    /// `true` until the host has laid the widget out at a non-zero size.
    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }

    /// Inner width minus the notches between segments; the span a progress
    /// fraction is scaled against in Tick mode.
    pub fn track_width(&self) -> f32 {
        let notches = self.border * (self.tick_count - 1) as f32;
        (self.inner.width() - notches).max(0.0)
    }

    /// Left edge of notch `i` (1-based).
    pub fn notch_left(&self, i: u32) -> f32 {
        (self.tick_interval + self.border) * i as f32
    }

    /// The `tick_count - 1` internal notch rectangles, left to right.
    pub fn notches(&self) -> impl Iterator<Item = Rect> + '_ {
        (1..self.tick_count).map(move |i| {
            let left = self.notch_left(i);
            self.inner.with_x(left, left + self.border)
        })
    }
}
