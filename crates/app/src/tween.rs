use std::f32::consts::PI;
use std::time::{Duration, Instant};

/// Eased progress animation driven by the "Progress" button.
#[derive(Debug, Clone, Copy)]
pub struct ProgressTween {
    started:  Instant,
    from:     f32,
    to:       f32,
    duration: Duration,
}

impl ProgressTween {
    pub fn new(started: Instant, from: f32, to: f32, duration: Duration) -> Self {
        Self { started, from, to, duration }
    }

    /// Value at `now` and whether the tween has finished.
    pub fn sample(&self, now: Instant) -> (f32, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        if self.duration.is_zero() || elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        (self.from + (self.to - self.from) * accelerate_decelerate(t), false)
    }
}

/// Slow start, fast middle, slow end.
fn accelerate_decelerate(t: f32) -> f32 {
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}
