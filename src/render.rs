use crate::core::config::{GalaxyOptions, UniformPatch, VisualConfig};
use crate::core::uniforms::{FrameInputs, UniformSet, UniformSink};
use web_sys as web;

mod galaxy;
use galaxy::{create_galaxy_resources, GalaxyResources};

// ===================== WebGPU state =====================

pub struct GalaxyRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    galaxy: GalaxyResources,
    uniforms: UniformSet,
    width: u32,
    height: u32,
}

impl GalaxyRenderer {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        props: VisualConfig,
        options: GalaxyOptions,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = if options.transparent {
            caps.alpha_modes
                .iter()
                .copied()
                .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        } else {
            wgpu::CompositeAlphaMode::Opaque
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let galaxy = create_galaxy_resources(&device, format);
        log::info!(
            "[render] galaxy ready {}x{} format={:?} alpha={:?} layers={}",
            width,
            height,
            format,
            alpha_mode,
            options.num_layers
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            galaxy,
            uniforms: UniformSet::new(props, options),
            width,
            height,
        })
    }

    /// Props path; a no-op on the slots while the warp path is authoritative.
    pub fn apply_props(&mut self, props: &VisualConfig) -> bool {
        self.uniforms.apply_props(props)
    }

    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            log::debug!("[render] resized to {}x{}", width, height);
        }
    }

    /// Draw one frame. Lost/outdated surfaces are reconfigured and the frame
    /// is skipped.
    pub fn render(&mut self, time_sec: f32, mouse: glam::Vec2, mouse_active: f32) {
        let frame_inputs = FrameInputs {
            width: self.width,
            height: self.height,
            time_sec,
            mouse,
            mouse_active,
        };
        let packed = self.uniforms.pack(&frame_inputs);
        self.queue
            .write_buffer(&self.galaxy.uniform_buffer, 0, bytemuck::bytes_of(&packed));

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                log::error!("[render] surface error: {:?}", e);
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("galaxy_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.galaxy.pipeline);
            rpass.set_bind_group(0, &self.galaxy.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
    }
}

impl UniformSink for GalaxyRenderer {
    fn update_uniforms(&mut self, patch: &UniformPatch) {
        self.uniforms.update_uniforms(patch);
    }

    fn acquire_warp(&mut self) {
        self.uniforms.acquire_warp();
    }

    fn release_warp(&mut self) {
        self.uniforms.release_warp();
    }
}
