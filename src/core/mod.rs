pub mod blend;
pub mod config;
pub mod constants;
pub mod ease;
pub mod pointer;
pub mod scroll;
pub mod settings;
pub mod smooth;
pub mod timeline;
pub mod uniforms;

pub use config::*;
pub use constants::*;

// Shaders bundled as string constants
pub static GALAXY_WGSL: &str = include_str!("../../shaders/galaxy.wgsl");
