use crate::core::smooth::SmoothScroll;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keys that move the scroll container natively.
#[inline]
pub fn is_scroll_key(key: &str) -> bool {
    matches!(
        key,
        "ArrowUp" | "ArrowDown" | "PageUp" | "PageDown" | "Home" | "End" | " " | "Spacebar"
    )
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, smooth: &RefCell<SmoothScroll>) {
    // keyboard navigation is locked while the wormhole sequence holds the page
    if smooth.borrow().is_stopped() {
        ev.prevent_default();
        if is_scroll_key(&ev.key()) {
            log::debug!("[keys] ignored {:?} while scroll is locked", ev.key());
        }
    }
}

pub fn wire_global_keydown(smooth: Rc<RefCell<SmoothScroll>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                super::keyboard::handle_global_keydown(&ev, &smooth);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
