//! DOM contract: element ids, selectors and class names the page must provide.

// Elements
pub const CANVAS_ID: &str = "galaxy-canvas";
pub const SCROLL_CONTAINER_SELECTOR: &str = ".scroll";
pub const SECTION_SELECTOR: &str = ".section";
pub const EXTRA_SECTION_SELECTOR: &str = ".extra-section";
pub const VENTURE_TEXT_SELECTOR: &str = ".venture-text";
pub const NAV_DOT_SELECTOR: &str = "[data-section-index]";
// Every element hidden while the wormhole sequence runs (nav, overlay text)
pub const UI_CHROME_SELECTOR: &str = "[data-ui-chrome]";

// Classes
pub const CLASS_UI_HIDDEN: &str = "ui-hidden";
pub const CLASS_SCROLL_LOCKED: &str = "scroll-locked";
pub const CLASS_VENTURE_VISIBLE: &str = "venture-visible";
pub const CLASS_STATIC_FALLBACK: &str = "static-fallback";
pub const CLASS_ACTIVE: &str = "active";

// Observable state published on <body>
pub const ATTR_SCROLL_PHASE: &str = "data-scroll-phase";
pub const ATTR_CURRENT_SECTION: &str = "data-current-section";
pub const ATTR_SECTION_INDEX: &str = "data-section-index";
pub const CSS_VAR_WORMHOLE_PROGRESS: &str = "--wormhole-progress";

// Set on the canvas while a mount owns it
pub const ATTR_MOUNTED: &str = "data-cosmos-mounted";
