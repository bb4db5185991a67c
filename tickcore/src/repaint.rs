//! Tick governance for the widget's timer loop.
//!
//! egui repaints on demand; this widget is time-driven, so every frame ends
//! by scheduling the next one. The base cadence is ~100 ms (clock seconds
//! and mode checks do not need more), raised to ~33 ms while a slide
//! transition or border flash is running so the motion stays smooth.

use std::time::{Duration, Instant};

/// Base repaint interval of the timer loop.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
/// Repaint interval while an animation is in flight.
pub const ANIM_INTERVAL: Duration = Duration::from_millis(33);

/// Upper bound on a reported frame delta, so a suspended process does not
/// fast-forward animations on resume.
const MAX_FRAME_SECS: f32 = 0.25;

/// Measures frame deltas and schedules the next repaint.
pub struct TickGovernor {
    last_frame: Instant,
    animating: bool,
}

impl Default for TickGovernor {
    fn default() -> Self {
        Self::new()
    }
}

impl TickGovernor {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            animating: false,
        }
    }

    /// Seconds since the previous frame, clamped to [`MAX_FRAME_SECS`].
    /// Call once at the top of the frame.
    pub fn frame_dt(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt.min(MAX_FRAME_SECS)
    }

    /// Mark whether any animation wants the fast interval this frame.
    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Call at the bottom of the frame to keep the timer loop alive.
    pub fn schedule(&self, ctx: &egui::Context) {
        let interval = if self.animating { ANIM_INTERVAL } else { TICK_INTERVAL };
        ctx.request_repaint_after(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dt_is_clamped() {
        let mut governor = TickGovernor::new();
        // Force an artificially old previous frame
        governor.last_frame = Instant::now() - Duration::from_secs(10);
        assert!(governor.frame_dt() <= MAX_FRAME_SECS);
    }

    #[test]
    fn test_animating_flag() {
        let mut governor = TickGovernor::new();
        assert!(!governor.is_animating());
        governor.set_animating(true);
        assert!(governor.is_animating());
        governor.set_animating(false);
        assert!(!governor.is_animating());
    }
}
