// CPU-side mirror of the galaxy shader's uniform slots.
//
// Two paths write the same slots: static prop updates (`apply_props`) and
// the warp path driven by the wormhole sequencer (`update_uniforms`). The
// `authority` field decides which one is live; prop updates are stored but
// not written while the warp path holds authority, and are re-applied when it
// hands back.

use glam::Vec2;

use super::blend::compound_star_speed;
use super::config::{GalaxyOptions, UniformPatch, VisualConfig};
use super::ease::clamp01;

/// Which update path currently owns the uniform slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UniformAuthority {
    #[default]
    Props,
    Warp,
}

/// Receiver of imperative uniform writes. Implemented by the renderer and by
/// the plain `UniformSet`.
pub trait UniformSink {
    /// Write every field present in `patch` to the live slots.
    fn update_uniforms(&mut self, patch: &UniformPatch);
    /// Hand the slots to the warp path.
    fn acquire_warp(&mut self);
    /// Return the slots to the props path, restoring the last props and
    /// zeroing the progress scalars.
    fn release_warp(&mut self);
}

/// GPU layout of the uniform block. Must match `GalaxyUniforms` in
/// `shaders/galaxy.wgsl` field for field.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GalaxyUniforms {
    pub resolution: [f32; 4],
    pub focal: [f32; 2],
    pub rotation: [f32; 2],
    pub mouse: [f32; 2],
    pub time: f32,
    pub star_speed: f32,
    pub density: f32,
    pub hue_shift: f32,
    pub speed: f32,
    pub glow_intensity: f32,
    pub saturation: f32,
    pub twinkle_intensity: f32,
    pub rotation_speed: f32,
    pub repulsion_strength: f32,
    pub mouse_active_factor: f32,
    pub auto_center_repulsion: f32,
    pub mouse_repulsion: f32,
    pub transparent: f32,
    pub num_layers: u32,
    pub warp_progress: f32,
    pub exit_progress: f32,
    pub _pad: f32,
}

/// Per-frame values that do not come from the visual config.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInputs {
    pub width: u32,
    pub height: u32,
    pub time_sec: f32,
    pub mouse: Vec2,
    pub mouse_active: f32,
}

#[derive(Clone, Debug)]
pub struct UniformSet {
    slots: VisualConfig,
    props: VisualConfig,
    warp_progress: f32,
    exit_progress: f32,
    authority: UniformAuthority,
    options: GalaxyOptions,
}

impl UniformSet {
    pub fn new(props: VisualConfig, options: GalaxyOptions) -> Self {
        Self {
            slots: props,
            props,
            warp_progress: 0.0,
            exit_progress: 0.0,
            authority: UniformAuthority::Props,
            options,
        }
    }

    /// Props-driven update. Returns `false` when suppressed by the warp path;
    /// the props are still remembered for the handback.
    pub fn apply_props(&mut self, props: &VisualConfig) -> bool {
        self.props = *props;
        if self.authority == UniformAuthority::Warp {
            log::debug!("[uniforms] prop update deferred while warp is active");
            return false;
        }
        self.slots = *props;
        true
    }

    pub fn authority(&self) -> UniformAuthority {
        self.authority
    }

    /// Current slot values (the effective, already blended config).
    pub fn slots(&self) -> &VisualConfig {
        &self.slots
    }

    pub fn props(&self) -> &VisualConfig {
        &self.props
    }

    pub fn options(&self) -> &GalaxyOptions {
        &self.options
    }

    pub fn warp_progress(&self) -> f32 {
        self.warp_progress
    }

    pub fn exit_progress(&self) -> f32 {
        self.exit_progress
    }

    /// The value uploaded as the shader's star speed: always derived from the
    /// current `star_speed` and `speed` slots together.
    pub fn effective_star_speed(&self) -> f32 {
        compound_star_speed(self.slots.star_speed, self.slots.speed)
    }

    /// Nothing on screen would change between frames.
    pub fn is_idle(&self, mouse_active: f32) -> bool {
        self.authority == UniformAuthority::Props
            && self.options.disable_animation
            && self.slots.speed == 0.0
            && self.slots.rotation_speed == 0.0
            && self.slots.twinkle_intensity == 0.0
            && mouse_active.abs() < super::constants::POINTER_IDLE_EPSILON
    }

    pub fn pack(&self, frame: &FrameInputs) -> GalaxyUniforms {
        let w = frame.width.max(1) as f32;
        let h = frame.height.max(1) as f32;
        let s = &self.slots;
        GalaxyUniforms {
            resolution: [w, h, w / h, 0.0],
            focal: s.focal.to_array(),
            rotation: s.rotation.to_array(),
            mouse: frame.mouse.to_array(),
            time: if self.options.disable_animation {
                0.0
            } else {
                frame.time_sec
            },
            star_speed: self.effective_star_speed(),
            density: s.density,
            hue_shift: s.hue_shift,
            speed: s.speed,
            glow_intensity: s.glow_intensity,
            saturation: s.saturation,
            twinkle_intensity: s.twinkle_intensity,
            rotation_speed: s.rotation_speed,
            repulsion_strength: s.repulsion_strength,
            mouse_active_factor: frame.mouse_active,
            auto_center_repulsion: s.auto_center_repulsion,
            mouse_repulsion: if s.mouse_repulsion { 1.0 } else { 0.0 },
            transparent: if self.options.transparent { 1.0 } else { 0.0 },
            num_layers: self.options.num_layers,
            warp_progress: self.warp_progress,
            exit_progress: self.exit_progress,
            _pad: 0.0,
        }
    }
}

impl UniformSink for UniformSet {
    fn update_uniforms(&mut self, patch: &UniformPatch) {
        self.slots.apply_patch(patch);
        if let Some(p) = patch.warp_progress {
            self.warp_progress = clamp01(p);
        }
        if let Some(p) = patch.exit_progress {
            self.exit_progress = clamp01(p);
        }
    }

    fn acquire_warp(&mut self) {
        self.authority = UniformAuthority::Warp;
    }

    fn release_warp(&mut self) {
        self.authority = UniformAuthority::Props;
        self.slots = self.props;
        self.warp_progress = 0.0;
        self.exit_progress = 0.0;
    }
}
