use glam::Vec2;

use super::constants::POINTER_LERP_FACTOR;

/// Smoothed pointer position (canvas UV, origin bottom-left) and activity.
///
/// Targets are set from input events; `step` moves the smoothed values a
/// fixed fraction toward them once per frame.
#[derive(Clone, Copy, Debug)]
pub struct PointerSmoother {
    target: Vec2,
    smooth: Vec2,
    target_active: f32,
    smooth_active: f32,
}

impl Default for PointerSmoother {
    fn default() -> Self {
        Self {
            target: Vec2::splat(0.5),
            smooth: Vec2::splat(0.5),
            target_active: 0.0,
            smooth_active: 0.0,
        }
    }
}

impl PointerSmoother {
    pub fn on_move(&mut self, uv: Vec2) {
        if uv.is_finite() {
            self.target = uv.clamp(Vec2::ZERO, Vec2::ONE);
            self.target_active = 1.0;
        }
    }

    pub fn on_leave(&mut self) {
        self.target_active = 0.0;
    }

    pub fn step(&mut self) {
        self.smooth += (self.target - self.smooth) * POINTER_LERP_FACTOR;
        self.smooth_active += (self.target_active - self.smooth_active) * POINTER_LERP_FACTOR;
    }

    pub fn position(&self) -> Vec2 {
        self.smooth
    }

    pub fn active(&self) -> f32 {
        self.smooth_active
    }
}
