use pillbar_theme::Color;
use std::time::{Duration, Instant};

/// Length of one blink.
pub const BLINK_DURATION: Duration = Duration::from_millis(300);

/// Linear fade of the progress fill from transparent to the foreground color.
///
/// Runs once per [`BlinkAnimator::start`].  Starting while a blink is in
/// flight restarts it from transparent.  Time is passed in explicitly; the
/// host's frame clock drives [`BlinkAnimator::sample`].
#[derive(Debug, Clone)]
pub struct BlinkAnimator {
    from:     Color,
    to:       Color,
    duration: Duration,
    started:  Option<Instant>,
}

impl BlinkAnimator {
    pub fn new(to: Color) -> Self {
        Self {
            from: Color::TRANSPARENT,
            to,
            duration: BLINK_DURATION,
            started: None,
        }
    }

    /// Change the color the fade ends on.
    pub fn set_target(&mut self, to: Color) {
        self.to = to;
    }

    pub fn start(&mut self, now: Instant) {
        if self.started.is_some() {
            tracing::debug!("blink restarted while in flight");
        }
        self.started = Some(now);
    }

    pub fn cancel(&mut self) {
        self.started = None;
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Fill color at `now`, or `None` when idle.
    ///
    /// Once the duration has elapsed this returns the target color exactly
    /// and the animator goes idle.
    pub fn sample(&mut self, now: Instant) -> Option<Color> {
        let started = self.started?;
        let elapsed = now.saturating_duration_since(started);
        if elapsed >= self.duration {
            self.started = None;
            return Some(self.to);
        }

        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        Some(self.from.lerp(self.to, t))
    }
}
