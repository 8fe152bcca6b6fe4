// Base → warp interpolation of the visual parameters.
//
// Visual fields (color, glow, density, rotation, repulsion) follow the eased
// progress directly. Motion fields (`speed`, `star_speed`) use delayed power
// ramps so they catch up only late in the charge, and are damped back toward
// the base as soon as the exit phase starts.

use super::config::VisualConfig;
use super::constants::{
    SPEED_BLEND_EXPONENT, SPEED_BLEND_THRESHOLD, SPEED_EXIT_EXPONENT, STAR_SPEED_BLEND_EXPONENT,
    STAR_SPEED_BLEND_THRESHOLD, STAR_SPEED_EXIT_EXPONENT,
};
use super::ease::{clamp01, delayed_ramp, lerp, smoothstep};

/// Progress scalars that drive one blend evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WarpProgress {
    pub progress: f32,
    pub exit_progress: f32,
}

impl WarpProgress {
    pub fn new(progress: f32, exit_progress: f32) -> Self {
        Self {
            progress: clamp01(progress),
            exit_progress: clamp01(exit_progress),
        }
    }
}

/// Blend factors derived from a `WarpProgress`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendFactors {
    pub visual: f32,
    pub speed: f32,
    pub star_speed: f32,
}

impl BlendFactors {
    pub fn from_progress(p: WarpProgress) -> Self {
        let eased = smoothstep(p.progress);
        let exit = smoothstep(p.exit_progress);
        let speed = delayed_ramp(eased, SPEED_BLEND_THRESHOLD, SPEED_BLEND_EXPONENT)
            * (1.0 - exit.powi(SPEED_EXIT_EXPONENT));
        let star_speed =
            delayed_ramp(eased, STAR_SPEED_BLEND_THRESHOLD, STAR_SPEED_BLEND_EXPONENT)
                * (1.0 - exit.powi(STAR_SPEED_EXIT_EXPONENT));
        Self {
            visual: eased,
            speed: clamp01(speed),
            star_speed: clamp01(star_speed),
        }
    }
}

/// Interpolate `base` toward `warp`. Pure; every output field lies between the
/// corresponding base and warp values.
pub fn blend(base: &VisualConfig, warp: &VisualConfig, p: WarpProgress) -> VisualConfig {
    let f = BlendFactors::from_progress(p);
    let v = f.visual;
    VisualConfig {
        density: lerp(base.density, warp.density, v),
        speed: lerp(base.speed, warp.speed, f.speed),
        star_speed: lerp(base.star_speed, warp.star_speed, f.star_speed),
        glow_intensity: lerp(base.glow_intensity, warp.glow_intensity, v),
        rotation_speed: lerp(base.rotation_speed, warp.rotation_speed, v),
        auto_center_repulsion: lerp(base.auto_center_repulsion, warp.auto_center_repulsion, v),
        mouse_interaction: if v < 0.5 {
            base.mouse_interaction
        } else {
            warp.mouse_interaction
        },
        mouse_repulsion: if v < 0.5 {
            base.mouse_repulsion
        } else {
            warp.mouse_repulsion
        },
        twinkle_intensity: lerp(base.twinkle_intensity, warp.twinkle_intensity, v),
        hue_shift: lerp(base.hue_shift, warp.hue_shift, v),
        saturation: lerp(base.saturation, warp.saturation, v),
        repulsion_strength: lerp(base.repulsion_strength, warp.repulsion_strength, v),
        focal: base.focal.lerp(warp.focal, v),
        rotation: base.rotation.lerp(warp.rotation, v),
    }
}

/// The compound value the shader consumes as `star_speed`.
#[inline]
pub fn compound_star_speed(star_speed: f32, speed: f32) -> f32 {
    star_speed * speed * super::constants::STAR_SPEED_SCALE
}
