use crate::core::scroll::{section_for_hash, section_scroll_target};
use crate::core::smooth::SmoothScroll;
use crate::dom;
use crate::frame::{FrameContext, LoopHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const LINE_HEIGHT_PX: f64 = 16.0;

/// Wheel delta in pixels regardless of the event's delta mode.
#[inline]
fn wheel_delta_px(ev: &web::WheelEvent, page_height: f64) -> f64 {
    match ev.delta_mode() {
        web::WheelEvent::DOM_DELTA_LINE => ev.delta_y() * LINE_HEIGHT_PX,
        web::WheelEvent::DOM_DELTA_PAGE => ev.delta_y() * page_height,
        _ => ev.delta_y(),
    }
}

/// Route wheel input through the smooth-scroll engine. Non-passive so the
/// native scroll can be suppressed.
pub fn wire_wheel(container: &web::Element, smooth: Rc<RefCell<SmoothScroll>>) {
    let container_for_delta = container.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let page = container_for_delta.client_height() as f64;
        let mut s = smooth.borrow_mut();
        // a stopped engine still swallows the wheel so the page stays put
        if s.on_wheel(wheel_delta_px(&ev, page)) || s.is_stopped() {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = container.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

/// Record offsets produced outside the engine (scrollbar, touch, keys).
pub fn wire_native_scroll(container: &web::Element, native_offset: Rc<Cell<Option<f64>>>) {
    let container_read = container.clone();
    let closure = Closure::wrap(Box::new(move || {
        native_offset.set(Some(container_read.scroll_top() as f64));
    }) as Box<dyn FnMut()>);
    _ = container.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_resize(canvas: &web::HtmlCanvasElement, layout_dirty: Rc<Cell<bool>>) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
        layout_dirty.set(true);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Stop scheduling frames while the document is hidden.
pub fn wire_visibility(
    document: &web::Document,
    frame_ctx: Rc<RefCell<FrameContext>>,
    handle: LoopHandle,
) {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        if doc.hidden() {
            handle.pause();
        } else {
            frame_ctx.borrow_mut().resume();
            handle.resume();
        }
    }) as Box<dyn FnMut()>);
    _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn navigate_to_hash(container: &web::Element, smooth: &RefCell<SmoothScroll>) {
    let Some(index) = dom::location_hash().and_then(|h| section_for_hash(&h)) else {
        return;
    };
    let mut s = smooth.borrow_mut();
    if s.is_stopped() {
        return;
    }
    let target = section_scroll_target(index, container.client_height() as f64);
    log::debug!("[scroll] hash navigation to section {} ({:.0}px)", index, target);
    s.scroll_to(target, false);
}

/// Scroll to `#<section>` on load and on every `hashchange`.
pub fn wire_hash_navigation(container: &web::Element, smooth: Rc<RefCell<SmoothScroll>>) {
    navigate_to_hash(container, &smooth);
    let container_nav = container.clone();
    let closure = Closure::wrap(Box::new(move || {
        navigate_to_hash(&container_nav, &smooth);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
