use crate::automation::{Toast, ToastKind};
use crate::gui::toasts::ToastQueue;
use crate::gui::util::ring_bell;
use dioxus::prelude::*;
use std::time::Instant;

/// Overlay state shared by the tick loop, hotkeys and rendering
#[derive(Clone, Copy, PartialEq)]
pub struct OverlaySignals {
    pub hud_held: Signal<bool>,           // F8 currently down
    pub hud_text: Signal<Option<String>>, // HUD line, None when hidden
    pub toasts: Signal<ToastQueue>,
}

impl OverlaySignals {
    /// Queue a toast; alerts also ring the bell
    pub fn push_toast(&mut self, toast: Toast) {
        if toast.kind == ToastKind::Alert {
            ring_bell();
        }
        self.toasts.with_mut(|queue| {
            queue.push(toast, Instant::now());
        });
    }
}
