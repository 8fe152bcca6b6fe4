pub mod keyboard;
pub mod pointer;
pub mod scroll;

pub use keyboard::wire_global_keydown;
pub use pointer::{wire_pointer_handlers, PointerWiring};
pub use scroll::{
    wire_hash_navigation, wire_native_scroll, wire_resize, wire_visibility, wire_wheel,
};
