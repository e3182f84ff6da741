/// Axis-aligned rectangle in logical pixels, stored as edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left:   f32,
    pub top:    f32,
    pub right:  f32,
    pub bottom: f32,
}

impl Rect {
    pub const EMPTY: Self = Self { left: 0.0, top: 0.0, right: 0.0, bottom: 0.0 };

    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Rectangle anchored at the origin.
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::from_ltrb(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// `true` when the rectangle covers no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Shrink every edge by `d`.  Over-insetting collapses to a zero-area
    /// rectangle centred on the original.
    #[must_use]
    pub fn inset(&self, d: f32) -> Self {
        let dx = d.min(self.width() / 2.0);
        let dy = d.min(self.height() / 2.0);
        Self::from_ltrb(self.left + dx, self.top + dy, self.right - dx, self.bottom - dy)
    }

    /// Same vertical span, new horizontal edges.
    #[must_use]
    pub fn with_x(&self, left: f32, right: f32) -> Self {
        Self::from_ltrb(left, self.top, right, self.bottom)
    }

    /// Edges truncated toward zero, matching integer-rect hosts.
    #[must_use]
    pub fn truncated(&self) -> Self {
        Self::from_ltrb(
            self.left.trunc(),
            self.top.trunc(),
            self.right.trunc(),
            self.bottom.trunc(),
        )
    }
}
