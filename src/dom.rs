use crate::constants::{
    ATTR_MOUNTED, CANVAS_ID, CLASS_STATIC_FALLBACK, EXTRA_SECTION_SELECTOR, SCROLL_CONTAINER_SELECTOR,
    SECTION_SELECTOR,
};
use crate::core::scroll::HeightMeasurement;
use crate::core::settings::AppSettings;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn find_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Mark the canvas as owned by this mount. Fails if another mount holds it.
pub fn claim_canvas(canvas: &web::HtmlCanvasElement) -> anyhow::Result<()> {
    if canvas.has_attribute(ATTR_MOUNTED) {
        anyhow::bail!("#{} is already mounted", CANVAS_ID);
    }
    canvas
        .set_attribute(ATTR_MOUNTED, "")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

pub fn release_canvas(canvas: &web::HtmlCanvasElement) {
    _ = canvas.remove_attribute(ATTR_MOUNTED);
}

pub fn find_scroll_container(document: &web::Document) -> anyhow::Result<web::Element> {
    document
        .query_selector(SCROLL_CONTAINER_SELECTOR)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", SCROLL_CONTAINER_SELECTOR))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Read the section geometry from the scroll container.
///
/// The extra section "starts" when its top edge reaches the bottom of the
/// viewport, so extra progress hits 1 exactly at the end of the scroll range.
/// Before layout everything reads as zero and the result is invalid.
pub fn measure_heights(container: &web::Element) -> HeightMeasurement {
    let viewport_height = container.client_height() as f64;
    let container_top = container.get_bounding_client_rect().top();
    let scroll_top = container.scroll_top() as f64;
    let content_top = |el: &web::Element| el.get_bounding_client_rect().top() - container_top + scroll_top;

    let mut sections_end = 0.0f64;
    if let Ok(list) = container.query_selector_all(SECTION_SELECTOR) {
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                let bottom = content_top(&el) + el.get_bounding_client_rect().height();
                sections_end = sections_end.max(bottom);
            }
        }
    }

    let extra = container
        .query_selector(EXTRA_SECTION_SELECTOR)
        .ok()
        .flatten();
    let (extra_section_start, extra_section_height) = match extra {
        Some(el) => {
            let top = content_top(&el);
            let height = el.get_bounding_client_rect().height();
            ((top - viewport_height).max(0.0), height)
        }
        None => (f64::INFINITY, 0.0),
    };

    HeightMeasurement {
        normal_sections_height: if extra_section_height > 0.0 {
            extra_section_start
        } else {
            (sections_end - viewport_height).max(0.0)
        },
        extra_section_height,
        extra_section_start,
        viewport_height,
    }
}

/// Largest scroll offset the container allows.
pub fn scroll_limit(container: &web::Element) -> f64 {
    (container.scroll_height() - container.client_height()).max(0) as f64
}

pub fn read_settings() -> AppSettings {
    let params = web::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|s| web::UrlSearchParams::new_with_str(&s).ok());
    match params {
        Some(p) => AppSettings::from_lookup(|key| p.get(key)),
        None => AppSettings::default(),
    }
}

pub fn location_hash() -> Option<String> {
    web::window()
        .and_then(|w| w.location().hash().ok())
        .filter(|h| !h.is_empty())
}

/// Swap the canvas for the static CSS background. Scroll tracking keeps working.
pub fn enable_static_fallback(document: &web::Document, canvas: Option<&web::HtmlCanvasElement>) {
    if let Some(body) = document.body() {
        _ = body.class_list().add_1(CLASS_STATIC_FALLBACK);
    }
    if let Some(c) = canvas {
        _ = c.set_attribute("hidden", "");
    }
}
