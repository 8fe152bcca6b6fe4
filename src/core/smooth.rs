// Eased scroll offset driven by wheel input.
//
// One instance is owned by the composition root and shared with the wheel
// handler and the frame loop. `stop` freezes input (used while the wormhole
// sequence runs); `start` resumes it.

use super::constants::{SMOOTH_SCROLL_DURATION_SEC, SMOOTH_SCROLL_WHEEL_MULTIPLIER};
use super::ease::expo_out;

#[derive(Clone, Debug)]
pub struct SmoothScroll {
    current: f64,
    target: f64,
    from: f64,
    elapsed: f64,
    limit: f64,
    duration: f64,
    wheel_multiplier: f64,
    animating: bool,
    stopped: bool,
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(SMOOTH_SCROLL_DURATION_SEC, SMOOTH_SCROLL_WHEEL_MULTIPLIER)
    }
}

impl SmoothScroll {
    pub fn new(duration: f64, wheel_multiplier: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            from: 0.0,
            elapsed: 0.0,
            limit: 0.0,
            duration: duration.max(1e-3),
            wheel_multiplier,
            animating: false,
            stopped: false,
        }
    }

    pub fn offset(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Maximum scrollable offset (content height minus viewport height).
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = if limit.is_finite() { limit.max(0.0) } else { 0.0 };
        self.target = self.target.min(self.limit);
    }

    /// Feed a wheel delta in pixels. Returns `true` if the delta was consumed.
    pub fn on_wheel(&mut self, delta_y: f64) -> bool {
        if self.stopped || !delta_y.is_finite() {
            return false;
        }
        let next = (self.target + delta_y * self.wheel_multiplier).clamp(0.0, self.limit);
        self.animate_to(next);
        true
    }

    /// Jump or ease to `offset`. Works while stopped so the page can be reset.
    pub fn scroll_to(&mut self, offset: f64, immediate: bool) {
        let offset = if offset.is_finite() {
            offset.clamp(0.0, self.limit.max(0.0))
        } else {
            0.0
        };
        if immediate {
            self.current = offset;
            self.target = offset;
            self.animating = false;
        } else {
            self.animate_to(offset);
        }
    }

    /// Adopt an offset produced outside the engine (scrollbar drag, touch,
    /// keyboard). Ignored mid-animation so the easing is not cut short.
    pub fn sync_native(&mut self, offset: f64) {
        if !self.animating && offset.is_finite() {
            self.current = offset.max(0.0);
            self.target = self.current;
        }
    }

    /// Advance by `dt_sec`. Returns the new offset while animating.
    pub fn advance(&mut self, dt_sec: f64) -> Option<f64> {
        if !self.animating {
            return None;
        }
        self.elapsed += dt_sec.max(0.0);
        let t = (self.elapsed / self.duration).min(1.0);
        self.current = self.from + (self.target - self.from) * expo_out(t);
        if t >= 1.0 {
            self.current = self.target;
            self.animating = false;
        }
        Some(self.current)
    }

    pub fn stop(&mut self) {
        if !self.stopped {
            log::debug!("[smooth] stopped at {:.0}", self.current);
        }
        self.stopped = true;
        self.animating = false;
        self.target = self.current;
    }

    pub fn start(&mut self) {
        if self.stopped {
            log::debug!("[smooth] started at {:.0}", self.current);
        }
        self.stopped = false;
    }

    fn animate_to(&mut self, offset: f64) {
        self.from = self.current;
        self.target = offset;
        self.elapsed = 0.0;
        self.animating = true;
    }
}
