use crate::core::pointer::PointerSmoother;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer position in canvas UV with the origin at the bottom-left.
#[inline]
pub fn pointer_canvas_uv(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let w = rect.width().max(1.0);
    let h = rect.height().max(1.0);
    let x = (ev.client_x() as f64 - rect.left()) / w;
    let y = (ev.client_y() as f64 - rect.top()) / h;
    Vec2::new(x as f32, 1.0 - y as f32)
}

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<RefCell<PointerSmoother>>,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_mousemove(&w);
    wire_mouseleave(&w);
}

fn wire_mousemove(w: &PointerWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let uv = pointer_canvas_uv(&ev, &w.canvas);
        w.pointer.borrow_mut().on_move(uv);
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_mouseleave(w: &PointerWiring) {
    let pointer = w.pointer.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        pointer.borrow_mut().on_leave();
    }) as Box<dyn FnMut()>);
    let root = web::window()
        .and_then(|wnd| wnd.document())
        .and_then(|d| d.document_element());
    if let Some(el) = root {
        _ = el.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
