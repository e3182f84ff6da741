use crate::geometry::ProgressGeometry;
use pillbar_core::DecorationType;

/// Converts a normalised progress fraction into the fill's pixel extent,
/// measured from the inner left edge.
#[derive(Debug, Clone, Copy)]
pub struct ProgressMapper<'g> {
    geometry: &'g ProgressGeometry,
}

impl<'g> ProgressMapper<'g> {
    pub fn new(geometry: &'g ProgressGeometry) -> Self {
        Self { geometry }
    }

    /// Map `fraction` (clamped to `[0, 1]`, NaN → 0) to a pixel extent in
    /// `[0, inner.width]`.
    ///
    /// Tick mode scales against the track without notches, then adds one
    /// border width for every notch the fill has passed, so a fraction of
    /// `k / tick_count` ends exactly at the left edge of notch `k`.
    pub fn map(&self, fraction: f32) -> f32 {
        let g = self.geometry;
        if g.is_empty() {
            return 0.0;
        }

        let fraction = clamp_fraction(fraction);
        let extent = match g.decoration {
            DecorationType::Line => fraction * g.inner.width(),
            DecorationType::Tick => {
                let raw = fraction * g.track_width();
                if g.tick_interval > 0.0 {
                    let passed = ((raw / g.tick_interval).round() as i32 - 1).max(0);
                    raw + g.border * passed as f32
                } else {
                    raw
                }
            }
        };

        extent.clamp(0.0, g.inner.width())
    }
}

/// Clamp to `[0, 1]`; NaN becomes `0`.
pub fn clamp_fraction(fraction: f32) -> f32 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}
