#![cfg(target_arch = "wasm32")]
use crate::core::config::{UniformPatch, BASE_CONFIG};
use crate::core::uniforms::UniformSet;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod stage;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let settings = dom::read_settings();
    console_log::init_with_level(settings.log_level).ok();
    log::info!("cosmos-web starting");
    Ok(())
}

/// Attach to the page and start the render loop. The canvas carries a marker
/// while mounted, so a second call on the same page is rejected.
#[wasm_bindgen]
pub async fn mount() -> Result<Portfolio, JsValue> {
    match init().await {
        Ok(ctx) => Ok(Portfolio { ctx }),
        Err(e) => {
            log::error!("init error: {:?}", e);
            Err(JsValue::from_str(&format!("{:#}", e)))
        }
    }
}

async fn init() -> anyhow::Result<Rc<RefCell<frame::FrameContext>>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document)?;
    dom::claim_canvas(&canvas)?;
    let mounted = mount_into(document, canvas.clone()).await;
    if mounted.is_err() {
        dom::release_canvas(&canvas);
    }
    mounted
}

async fn mount_into(
    document: web::Document,
    canvas: web::HtmlCanvasElement,
) -> anyhow::Result<Rc<RefCell<frame::FrameContext>>> {
    let container = dom::find_scroll_container(&document)?;
    let settings = dom::read_settings();
    log::info!(
        "[render] settings lite={} layers={} static={}",
        settings.lite,
        settings.galaxy.num_layers,
        settings.galaxy.disable_animation
    );

    let input = frame::SharedInput::default();
    input
        .smooth
        .borrow_mut()
        .set_limit(dom::scroll_limit(&container));

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    events::wire_resize(&canvas, input.layout_dirty.clone());

    let backdrop = if settings.lite {
        dom::enable_static_fallback(&document, Some(&canvas));
        frame::Backdrop::Static(UniformSet::new(BASE_CONFIG, settings.galaxy))
    } else {
        match render::GalaxyRenderer::new(&canvas, BASE_CONFIG, settings.galaxy).await {
            Ok(r) => frame::Backdrop::Gpu(r),
            Err(e) => {
                log::error!("WebGPU init error: {:?}", e);
                dom::enable_static_fallback(&document, Some(&canvas));
                frame::Backdrop::Static(UniformSet::new(BASE_CONFIG, settings.galaxy))
            }
        }
    };

    events::wire_wheel(&container, input.smooth.clone());
    events::wire_native_scroll(&container, input.native_offset.clone());
    events::wire_global_keydown(input.smooth.clone());
    events::wire_pointer_handlers(events::PointerWiring {
        canvas: canvas.clone(),
        pointer: input.pointer.clone(),
    });
    events::wire_hash_navigation(&container, input.smooth.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        document.clone(),
        container,
        canvas,
        input,
        backdrop,
        BASE_CONFIG,
    )));
    let handle = frame::start_loop(frame_ctx.clone());
    events::wire_visibility(&document, frame_ctx.clone(), handle);
    log::info!("cosmos-web mounted");
    Ok(frame_ctx)
}

fn parse_patch(value: JsValue) -> Result<UniformPatch, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(UniformPatch::default());
    }
    serde_wasm_bindgen::from_value::<UniformPatch>(value)
        .map_err(|e| JsValue::from_str(&format!("invalid uniform patch: {}", e)))
}

/// JS handle to the mounted page.
#[wasm_bindgen]
pub struct Portfolio {
    ctx: Rc<RefCell<frame::FrameContext>>,
}

#[wasm_bindgen]
impl Portfolio {
    /// Write any subset of the visual fields (plus `warpProgress` /
    /// `exitProgress`) straight to the live uniforms.
    #[wasm_bindgen(js_name = updateUniforms)]
    pub fn update_uniforms(&self, partial: JsValue) -> Result<(), JsValue> {
        let patch = parse_patch(partial)?;
        if !patch.is_empty() {
            self.ctx.borrow_mut().update_uniforms(&patch);
        }
        Ok(())
    }

    /// Patch the resting config. Held back while a wormhole sequence runs.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&self, partial: JsValue) -> Result<(), JsValue> {
        let patch = parse_patch(partial)?;
        if !patch.is_empty() {
            self.ctx.borrow_mut().set_config(&patch);
        }
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = scrollPhase)]
    pub fn scroll_phase(&self) -> String {
        self.ctx.borrow().tracker.phase().as_str().to_string()
    }

    #[wasm_bindgen(getter, js_name = scrollProgress)]
    pub fn scroll_progress(&self) -> f32 {
        self.ctx.borrow().tracker.scroll_progress()
    }

    #[wasm_bindgen(getter, js_name = extraScrollProgress)]
    pub fn extra_scroll_progress(&self) -> f32 {
        self.ctx.borrow().tracker.extra_scroll_progress()
    }

    #[wasm_bindgen(getter, js_name = wormholeProgress)]
    pub fn wormhole_progress(&self) -> f32 {
        self.ctx.borrow().sequencer.wormhole_progress()
    }

    #[wasm_bindgen(getter, js_name = currentSection)]
    pub fn current_section(&self) -> u32 {
        self.ctx.borrow().tracker.current_section() as u32
    }

    pub fn reset(&self) {
        self.ctx.borrow_mut().reset();
    }
}
