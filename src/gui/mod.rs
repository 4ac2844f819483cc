// gui/mod.rs
// Foreground surface: overlay HUD, toasts, hotkeys and the headless loop

pub mod dioxus_app;
pub mod headless;
pub mod hotkeys;
pub mod shutdown;
pub mod toasts;
pub mod util;
mod components {
    pub mod hud;
    pub mod toast_stack;
}
mod hooks;

pub use dioxus_app::{OverlayContext, run_overlay};
pub use headless::run_headless;
pub use hotkeys::{HOTKEYS, HotkeyAction};
pub use shutdown::Shutdown;
pub use toasts::ToastQueue;
