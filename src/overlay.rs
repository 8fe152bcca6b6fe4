use crate::constants::*;
use crate::core::scroll::ScrollPhase;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    set_chrome_hidden(document, false);
}

#[inline]
pub fn hide(document: &web::Document) {
    set_chrome_hidden(document, true);
}

fn set_chrome_hidden(document: &web::Document, hidden: bool) {
    let Ok(list) = document.query_selector_all(UI_CHROME_SELECTOR) else {
        return;
    };
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
            _ = el
                .class_list()
                .toggle_with_force(CLASS_UI_HIDDEN, hidden);
        }
    }
}

#[inline]
pub fn set_scroll_locked(document: &web::Document, locked: bool) {
    if let Some(body) = document.body() {
        _ = body
            .class_list()
            .toggle_with_force(CLASS_SCROLL_LOCKED, locked);
    }
}

#[inline]
pub fn set_venture_visible(document: &web::Document, visible: bool) {
    if let Ok(Some(el)) = document.query_selector(VENTURE_TEXT_SELECTOR) {
        _ = el
            .class_list()
            .toggle_with_force(CLASS_VENTURE_VISIBLE, visible);
    }
}

/// Values other page components read from the DOM.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PublishedState {
    pub phase: ScrollPhase,
    pub section: usize,
    pub wormhole_progress: f32,
}

/// Write the observable state to `<body>`, touching only what changed since `prev`.
pub fn publish(document: &web::Document, state: &PublishedState, prev: Option<&PublishedState>) {
    let Some(body) = document.body() else {
        return;
    };
    if prev.map(|p| p.phase) != Some(state.phase) {
        _ = body.set_attribute(ATTR_SCROLL_PHASE, state.phase.as_str());
    }
    if prev.map(|p| p.section) != Some(state.section) {
        _ = body.set_attribute(ATTR_CURRENT_SECTION, &state.section.to_string());
        highlight_nav_dot(document, state.section);
    }
    // compared at the precision written to CSS
    let progress = format!("{:.3}", state.wormhole_progress);
    let prev_progress = prev.map(|p| format!("{:.3}", p.wormhole_progress));
    if prev_progress.as_deref() != Some(progress.as_str()) {
        _ = body
            .style()
            .set_property(CSS_VAR_WORMHOLE_PROGRESS, &progress);
    }
}

fn highlight_nav_dot(document: &web::Document, section: usize) {
    let Ok(list) = document.query_selector_all(NAV_DOT_SELECTOR) else {
        return;
    };
    let wanted = section.to_string();
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
            let active = el.get_attribute(ATTR_SECTION_INDEX).as_deref() == Some(wanted.as_str());
            _ = el.class_list().toggle_with_force(CLASS_ACTIVE, active);
        }
    }
}
