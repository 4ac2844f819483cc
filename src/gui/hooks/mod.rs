pub mod hotkeys;
pub mod overlay_tick;
pub mod types;

pub use hotkeys::HotkeyBindings;
pub use overlay_tick::use_overlay_tick;
pub use types::*;
