use crate::core::config::{UniformPatch, VisualConfig};
use crate::core::pointer::PointerSmoother;
use crate::core::scroll::{ScrollEvent, ScrollPhase, ScrollTracker};
use crate::core::smooth::SmoothScroll;
use crate::core::timeline::{Stage, WormholeSequencer};
use crate::core::uniforms::{UniformSet, UniformSink};
use crate::dom;
use crate::overlay::{self, PublishedState};
use crate::render::GalaxyRenderer;
use crate::stage::DomStage;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Where uniform writes land: the WebGPU renderer, or a CPU-only slot set when
/// the page runs on the static fallback.
pub enum Backdrop {
    Gpu(GalaxyRenderer),
    Static(UniformSet),
}

impl Backdrop {
    pub fn uniforms(&self) -> &UniformSet {
        match self {
            Backdrop::Gpu(r) => r.uniforms(),
            Backdrop::Static(u) => u,
        }
    }

    pub fn apply_props(&mut self, props: &VisualConfig) -> bool {
        match self {
            Backdrop::Gpu(r) => r.apply_props(props),
            Backdrop::Static(u) => u.apply_props(props),
        }
    }
}

impl UniformSink for Backdrop {
    fn update_uniforms(&mut self, patch: &UniformPatch) {
        match self {
            Backdrop::Gpu(r) => r.update_uniforms(patch),
            Backdrop::Static(u) => u.update_uniforms(patch),
        }
    }

    fn acquire_warp(&mut self) {
        match self {
            Backdrop::Gpu(r) => r.acquire_warp(),
            Backdrop::Static(u) => u.acquire_warp(),
        }
    }

    fn release_warp(&mut self) {
        match self {
            Backdrop::Gpu(r) => r.release_warp(),
            Backdrop::Static(u) => u.release_warp(),
        }
    }
}

/// State written by event handlers and consumed once per frame.
#[derive(Clone, Default)]
pub struct SharedInput {
    pub smooth: Rc<RefCell<SmoothScroll>>,
    pub native_offset: Rc<Cell<Option<f64>>>,
    pub pointer: Rc<RefCell<PointerSmoother>>,
    pub layout_dirty: Rc<Cell<bool>>,
}

pub struct FrameContext {
    pub document: web::Document,
    pub container: web::Element,
    pub canvas: web::HtmlCanvasElement,
    pub input: SharedInput,

    pub tracker: ScrollTracker,
    pub sequencer: WormholeSequencer,
    pub backdrop: Backdrop,
    pub base: VisualConfig,

    pub clock: Instant,
    pub last_instant: Instant,
    pub needs_redraw: bool,
    pub published: Option<PublishedState>,
}

impl FrameContext {
    pub fn new(
        document: web::Document,
        container: web::Element,
        canvas: web::HtmlCanvasElement,
        input: SharedInput,
        backdrop: Backdrop,
        base: VisualConfig,
    ) -> Self {
        let now = Instant::now();
        Self {
            document,
            container,
            canvas,
            input,
            tracker: ScrollTracker::default(),
            sequencer: WormholeSequencer::default(),
            backdrop,
            base,
            clock: now,
            last_instant: now,
            needs_redraw: true,
            published: None,
        }
    }

    fn now_sec(&self) -> f64 {
        self.clock.elapsed().as_secs_f64()
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f64();
        self.last_instant = now;
        let now_sec = self.now_sec();

        // --- input sampling ---
        if self.input.layout_dirty.replace(false) {
            self.tracker.invalidate();
            self.input
                .smooth
                .borrow_mut()
                .set_limit(dom::scroll_limit(&self.container));
            self.needs_redraw = true;
        }
        let offset = {
            let mut smooth = self.input.smooth.borrow_mut();
            if let Some(native) = self.input.native_offset.take() {
                smooth.sync_native(native);
            }
            if let Some(off) = smooth.advance(dt_sec) {
                self.container.set_scroll_top(off.round() as i32);
            }
            smooth.offset()
        };
        let (mouse, mouse_active) = {
            let mut pointer = self.input.pointer.borrow_mut();
            if self.backdrop.uniforms().slots().mouse_interaction {
                pointer.step();
                (pointer.position(), pointer.active())
            } else {
                (pointer.position(), 0.0)
            }
        };

        // --- scroll / phase update ---
        let container = &self.container;
        let events = self
            .tracker
            .on_scroll(offset, now_sec * 1000.0, || dom::measure_heights(container));

        let mut stage = DomStage {
            document: &self.document,
            container: &self.container,
            tracker: &mut self.tracker,
            smooth: &self.input.smooth,
        };
        for ev in &events {
            match *ev {
                ScrollEvent::SectionChanged { from, to } => {
                    log::debug!("[scroll] section {} -> {}", from, to);
                }
                ScrollEvent::PhaseChanged { to, .. } => {
                    if to == ScrollPhase::Extra {
                        overlay::set_venture_visible(&self.document, true);
                    }
                }
                ScrollEvent::WormholeTriggered => {
                    self.sequencer
                        .start(&self.base, now_sec, &mut stage, &mut self.backdrop);
                }
            }
        }

        // --- timeline tick (writes the blended uniforms) ---
        let phase = stage.tracker.phase();
        self.sequencer
            .sync_phase(phase, now_sec, &mut stage, &mut self.backdrop);
        if self
            .sequencer
            .tick(now_sec, &mut stage, &mut self.backdrop)
            .is_some()
        {
            self.needs_redraw = true;
        }

        // --- draw ---
        let animating = self.sequencer.is_active();
        if let Backdrop::Gpu(renderer) = &mut self.backdrop {
            renderer.resize_if_needed(self.canvas.width(), self.canvas.height());
            let idle = renderer.uniforms().is_idle(mouse_active);
            if animating || !idle || self.needs_redraw {
                renderer.render(now_sec as f32, mouse, mouse_active);
                self.needs_redraw = false;
            }
        }

        self.publish();
    }

    fn publish(&mut self) {
        let state = PublishedState {
            phase: self.tracker.phase(),
            section: self.tracker.current_section(),
            wormhole_progress: self.sequencer.wormhole_progress(),
        };
        if self.published.as_ref() != Some(&state) {
            overlay::publish(&self.document, &state, self.published.as_ref());
            self.published = Some(state);
        }
    }

    /// Props path: patch the resting config. Deferred on the GPU while a
    /// wormhole sequence owns the uniforms.
    pub fn set_config(&mut self, patch: &UniformPatch) {
        self.base.apply_patch(patch);
        self.backdrop.apply_props(&self.base);
        self.needs_redraw = true;
    }

    /// Imperative write straight to the live uniform slots.
    pub fn update_uniforms(&mut self, patch: &UniformPatch) {
        self.backdrop.update_uniforms(patch);
        self.needs_redraw = true;
    }

    /// Back to the hero section. A running sequence is interrupted, which
    /// performs the same restoration.
    pub fn reset(&mut self) {
        let now_sec = self.now_sec();
        let mut stage = DomStage {
            document: &self.document,
            container: &self.container,
            tracker: &mut self.tracker,
            smooth: &self.input.smooth,
        };
        if !self
            .sequencer
            .interrupt(now_sec, &mut stage, &mut self.backdrop)
        {
            stage.reset_scroll_state();
            stage.scroll_to_top();
        }
        self.needs_redraw = true;
    }

    /// Called when the page becomes visible again; no catch-up for the hidden time.
    pub fn resume(&mut self) {
        self.last_instant = Instant::now();
        self.needs_redraw = true;
    }
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to the `requestAnimationFrame` loop. At most one frame is pending.
#[derive(Clone)]
pub struct LoopHandle {
    tick: TickSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl LoopHandle {
    fn schedule(&self) {
        if self.pending.get().is_some() {
            return;
        }
        let Some(w) = web::window() else {
            return;
        };
        let slot = self.tick.borrow();
        let Some(cb) = slot.as_ref() else {
            return;
        };
        if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            self.pending.set(Some(id));
        }
    }

    pub fn pause(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
            log::debug!("[render] loop paused");
        }
    }

    pub fn resume(&self) {
        if self.pending.get().is_none() {
            log::debug!("[render] loop resumed");
        }
        self.schedule();
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let handle = LoopHandle {
        tick: Rc::new(RefCell::new(None)),
        pending: Rc::new(Cell::new(None)),
    };
    let handle_tick = handle.clone();
    *handle.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        handle_tick.pending.set(None);
        let hidden = {
            let mut ctx = frame_ctx.borrow_mut();
            ctx.frame();
            ctx.document.hidden()
        };
        if !hidden {
            handle_tick.schedule();
        }
    }) as Box<dyn FnMut()>));
    handle.schedule();
    handle
}
