use super::config::GalaxyOptions;
use super::constants::MAX_LAYERS;

/// Runtime settings read from the page URL query.
///
/// - `lite=1`: skip WebGPU entirely and show the static background
/// - `layers=N`: starfield quality tier, clamped to 2..=4
/// - `static=1`: freeze shader time
/// - `log=<level>`: console log level
#[derive(Clone, Debug, PartialEq)]
pub struct AppSettings {
    pub lite: bool,
    pub galaxy: GalaxyOptions,
    pub log_level: log::Level,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            lite: false,
            galaxy: GalaxyOptions::default(),
            log_level: log::Level::Info,
        }
    }
}

impl AppSettings {
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str| {
            get(key)
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false)
        };
        let layers = get("layers")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(MAX_LAYERS);
        let log_level = get("log")
            .and_then(|v| v.trim().parse::<log::Level>().ok())
            .unwrap_or(defaults.log_level);
        Self {
            lite: flag("lite"),
            galaxy: GalaxyOptions {
                disable_animation: flag("static"),
                ..defaults.galaxy
            }
            .with_layers(layers),
            log_level,
        }
    }
}
