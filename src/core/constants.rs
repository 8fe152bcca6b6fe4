// Tuning constants shared by the scroll, timeline and blend logic.

// Motion blend ramps: motion parameters only start moving once the eased
// warp progress passes these thresholds.
pub const SPEED_BLEND_THRESHOLD: f32 = 0.65;
pub const SPEED_BLEND_EXPONENT: f32 = 3.0;
pub const SPEED_EXIT_EXPONENT: i32 = 6;

pub const STAR_SPEED_BLEND_THRESHOLD: f32 = 0.85;
pub const STAR_SPEED_BLEND_EXPONENT: f32 = 3.4;
pub const STAR_SPEED_EXIT_EXPONENT: i32 = 8;

// uStarSpeed = starSpeed * speed * STAR_SPEED_SCALE
pub const STAR_SPEED_SCALE: f32 = 0.1;

// Wormhole timeline (seconds)
pub const CHARGE_DURATION_SEC: f64 = 2.0;
pub const HOLD_DURATION_SEC: f64 = 1.6;
pub const HOLD_PROGRESS: f32 = 1.0;
pub const RETURN_DURATION_SEC: f64 = 0.1;
pub const SCROLL_RESTART_SETTLE_SEC: f64 = 0.05;

// Scroll handling is rate limited to one update per animation frame.
pub const SCROLL_THROTTLE_MS: f64 = 16.0;
// Each content section spans two viewport heights.
pub const VIEWPORTS_PER_SECTION: f64 = 2.0;

pub const SECTION_IDS: [&str; 5] = ["hero", "about", "technologies", "projects", "contact"];

// Smooth scroll
pub const SMOOTH_SCROLL_DURATION_SEC: f64 = 1.2;
pub const SMOOTH_SCROLL_WHEEL_MULTIPLIER: f64 = 1.0;

// Pointer smoothing per frame
pub const POINTER_LERP_FACTOR: f32 = 0.05;
pub const POINTER_IDLE_EPSILON: f32 = 0.001;

// Shader quality tiers (number of parallax layers)
pub const MIN_LAYERS: u32 = 2;
pub const MAX_LAYERS: u32 = 4;
