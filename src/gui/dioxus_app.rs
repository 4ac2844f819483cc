use crate::automation::{AutomationEvent, ScanConfig, TypingController};
use crate::gui::components::{hud::Hud, toast_stack::ToastStack};
use crate::gui::hooks::{HotkeyBindings, OverlaySignals, use_overlay_tick};
use crate::gui::shutdown::Shutdown;
use crate::gui::toasts::ToastQueue;
use crate::gui::util::{OVERLAY_HEIGHT, OVERLAY_WIDTH};
use dioxus::prelude::*;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedReceiver;

/// Everything the overlay needs from `main`, injected as root context
#[derive(Clone)]
pub struct OverlayContext {
    pub config: ScanConfig,
    pub typing: TypingController,
    pub shutdown: Shutdown,
    receiver: Arc<Mutex<Option<UnboundedReceiver<AutomationEvent>>>>,
}

impl OverlayContext {
    pub fn new(
        config: ScanConfig,
        typing: TypingController,
        shutdown: Shutdown,
        receiver: UnboundedReceiver<AutomationEvent>,
    ) -> Self {
        Self {
            config,
            typing,
            shutdown,
            receiver: Arc::new(Mutex::new(Some(receiver))),
        }
    }

    /// The event receiver has a single consumer: the overlay tick loop
    pub fn take_receiver(&self) -> Option<UnboundedReceiver<AutomationEvent>> {
        self.receiver.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Launch the overlay window. Blocks until the window closes.
pub fn run_overlay(context: OverlayContext) {
    use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Screen Match Run")
            .with_decorations(false)
            .with_always_on_top(true)
            .with_focused(false)
            .with_visible(false)
            .with_resizable(false)
            .with_inner_size(LogicalSize::new(OVERLAY_WIDTH, OVERLAY_HEIGHT)),
    );
    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .with_context(context)
        .launch(App);
}

#[component]
fn App() -> Element {
    let ctx = use_context::<OverlayContext>();
    let signals = OverlaySignals {
        hud_held: use_signal(|| false),
        hud_text: use_signal(|| None::<String>),
        toasts: use_signal(ToastQueue::new),
    };
    use_overlay_tick(ctx, signals);

    let hud = signals.hud_text.read().clone();
    let toasts = signals.toasts.read().items().to_vec();

    rsx! {
        div { style: "display:flex; flex-direction:column; gap:6px; padding:6px; font-family: 'Segoe UI', Tahoma, sans-serif; background: rgba(0,0,0,0); user-select:none;",
            HotkeyBindings { signals: signals }
            if let Some(text) = hud {
                Hud { text: text }
            }
            ToastStack { toasts: toasts }
        }
    }
}
