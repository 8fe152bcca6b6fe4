use glam::Vec2;
use serde::Deserialize;

use super::constants::{MAX_LAYERS, MIN_LAYERS};

/// One static appearance of the starfield.
///
/// Fields:
/// - `density`: star cell density; the far layer zooms to `20 × density`
/// - `speed`: drift/twinkle time scale
/// - `star_speed`: layer travel rate (combined with `speed` before upload)
/// - `hue_shift`: degrees, 0..360
/// - `saturation`: 0..1 (0 renders white stars)
/// - `focal`: focal point in normalized screen space
/// - `rotation`: fixed rotation as a (cos, sin) pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualConfig {
    pub density: f32,
    pub speed: f32,
    pub star_speed: f32,
    pub glow_intensity: f32,
    pub rotation_speed: f32,
    pub auto_center_repulsion: f32,
    pub mouse_interaction: bool,
    pub mouse_repulsion: bool,
    pub twinkle_intensity: f32,
    pub hue_shift: f32,
    pub saturation: f32,
    pub repulsion_strength: f32,
    pub focal: Vec2,
    pub rotation: Vec2,
}

/// Resting appearance: sparse, white, static stars.
pub const BASE_CONFIG: VisualConfig = VisualConfig {
    density: 0.3,
    speed: 0.0,
    star_speed: 0.5,
    glow_intensity: 0.2,
    rotation_speed: 0.0,
    auto_center_repulsion: 0.0,
    mouse_interaction: false,
    mouse_repulsion: false,
    twinkle_intensity: 0.3,
    hue_shift: 0.0,
    saturation: 0.0,
    repulsion_strength: 1.0,
    focal: Vec2::new(0.5, 0.5),
    rotation: Vec2::new(1.0, 0.0),
};

/// Wormhole target: dense, blue, rotating, pushed out from the center.
pub const WARP_CONFIG: VisualConfig = VisualConfig {
    density: 1.2,
    speed: 1.5,
    star_speed: 2.0,
    glow_intensity: 0.5,
    rotation_speed: 0.15,
    auto_center_repulsion: 10.0,
    mouse_interaction: false,
    mouse_repulsion: false,
    twinkle_intensity: 0.3,
    hue_shift: 140.0,
    saturation: 1.0,
    repulsion_strength: 2.0,
    focal: Vec2::new(0.5, 0.5),
    rotation: Vec2::new(1.0, 0.0),
};

impl Default for VisualConfig {
    fn default() -> Self {
        BASE_CONFIG
    }
}

impl VisualConfig {
    /// Overwrite every field present in `patch`. Progress fields are ignored.
    pub fn apply_patch(&mut self, patch: &UniformPatch) {
        if let Some(v) = patch.density {
            self.density = v;
        }
        if let Some(v) = patch.speed {
            self.speed = v;
        }
        if let Some(v) = patch.star_speed {
            self.star_speed = v;
        }
        if let Some(v) = patch.glow_intensity {
            self.glow_intensity = v;
        }
        if let Some(v) = patch.rotation_speed {
            self.rotation_speed = v;
        }
        if let Some(v) = patch.auto_center_repulsion {
            self.auto_center_repulsion = v;
        }
        if let Some(v) = patch.mouse_interaction {
            self.mouse_interaction = v;
        }
        if let Some(v) = patch.mouse_repulsion {
            self.mouse_repulsion = v;
        }
        if let Some(v) = patch.twinkle_intensity {
            self.twinkle_intensity = v;
        }
        if let Some(v) = patch.hue_shift {
            self.hue_shift = v;
        }
        if let Some(v) = patch.saturation {
            self.saturation = v;
        }
        if let Some(v) = patch.repulsion_strength {
            self.repulsion_strength = v;
        }
        if let Some([x, y]) = patch.focal {
            self.focal = Vec2::new(x, y);
        }
        if let Some([c, s]) = patch.rotation {
            self.rotation = Vec2::new(c, s);
        }
    }

    /// Full patch carrying every field of this config.
    pub fn to_patch(&self) -> UniformPatch {
        UniformPatch {
            density: Some(self.density),
            speed: Some(self.speed),
            star_speed: Some(self.star_speed),
            glow_intensity: Some(self.glow_intensity),
            rotation_speed: Some(self.rotation_speed),
            auto_center_repulsion: Some(self.auto_center_repulsion),
            mouse_interaction: Some(self.mouse_interaction),
            mouse_repulsion: Some(self.mouse_repulsion),
            twinkle_intensity: Some(self.twinkle_intensity),
            hue_shift: Some(self.hue_shift),
            saturation: Some(self.saturation),
            repulsion_strength: Some(self.repulsion_strength),
            focal: Some(self.focal.to_array()),
            rotation: Some(self.rotation.to_array()),
            warp_progress: None,
            exit_progress: None,
        }
    }

    /// Starting point for a wormhole transition: the base look with pointer
    /// effects disabled and the remaining fields pinned to resting values.
    pub fn transition_proxy(&self) -> Self {
        Self {
            mouse_interaction: false,
            mouse_repulsion: false,
            twinkle_intensity: BASE_CONFIG.twinkle_intensity,
            hue_shift: BASE_CONFIG.hue_shift,
            saturation: BASE_CONFIG.saturation,
            repulsion_strength: BASE_CONFIG.repulsion_strength,
            star_speed: BASE_CONFIG.star_speed,
            ..*self
        }
    }
}

/// Any subset of the visual fields plus the warp/exit progress scalars.
///
/// Deserialized from JS objects using camelCase keys, e.g.
/// `{ hueShift: 90, warpProgress: 0.4 }`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UniformPatch {
    pub density: Option<f32>,
    pub speed: Option<f32>,
    pub star_speed: Option<f32>,
    pub glow_intensity: Option<f32>,
    pub rotation_speed: Option<f32>,
    pub auto_center_repulsion: Option<f32>,
    pub mouse_interaction: Option<bool>,
    pub mouse_repulsion: Option<bool>,
    pub twinkle_intensity: Option<f32>,
    pub hue_shift: Option<f32>,
    pub saturation: Option<f32>,
    pub repulsion_strength: Option<f32>,
    pub focal: Option<[f32; 2]>,
    pub rotation: Option<[f32; 2]>,
    pub warp_progress: Option<f32>,
    pub exit_progress: Option<f32>,
}

impl UniformPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Render options fixed for the lifetime of the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalaxyOptions {
    pub transparent: bool,
    pub disable_animation: bool,
    pub num_layers: u32,
}

impl Default for GalaxyOptions {
    fn default() -> Self {
        Self {
            transparent: true,
            disable_animation: false,
            num_layers: MAX_LAYERS,
        }
    }
}

impl GalaxyOptions {
    pub fn with_layers(mut self, layers: u32) -> Self {
        self.num_layers = layers.clamp(MIN_LAYERS, MAX_LAYERS);
        self
    }
}
