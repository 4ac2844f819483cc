use crate::automation::Toast;
use crate::error::AutomationError;
use crate::gui::dioxus_app::OverlayContext;
use crate::gui::hooks::types::OverlaySignals;
use crate::gui::hotkeys::{HOTKEYS, HotkeyAction};
use crate::input::clipboard::format_coordinates;
use crate::input::{ClipboardSink, EnigoInput, InputDriver, SystemClipboard};
use dioxus::desktop::{HotKeyState, use_global_shortcut};
use dioxus::prelude::*;

const HOTKEY_TOAST_MS: u64 = 1500;

/// Registers the hotkey table. Renders nothing and reads no signals, so it
/// registers once; the registrations are dropped with the window.
#[component]
pub fn HotkeyBindings(signals: OverlaySignals) -> Element {
    let ctx = use_context::<OverlayContext>();
    for (action, accelerator) in HOTKEYS {
        let ctx = ctx.clone();
        let mut signals = signals;
        let registration = use_global_shortcut(accelerator, move |state: HotKeyState| {
            let pressed = state == HotKeyState::Pressed;
            if pressed || action.wants_release() {
                handle_hotkey(action, pressed, &ctx, &mut signals);
            }
        });
        if let Err(e) = registration {
            log::warn!("⚠️ Could not register hotkey {}: {:?}", accelerator, e);
        }
    }
    rsx! {}
}

fn handle_hotkey(action: HotkeyAction, pressed: bool, ctx: &OverlayContext, signals: &mut OverlaySignals) {
    log::debug!("⌨️ Hotkey {:?} pressed={}", action, pressed);
    match action {
        HotkeyAction::ShowHud => signals.hud_held.set(pressed),
        HotkeyAction::CopyCoordinates => {
            let copied = EnigoInput::new()
                .and_then(|input| input.pointer_position())
                .and_then(|(x, y)| {
                    let text = format_coordinates(x, y);
                    SystemClipboard.set_text(&text).map(|_| text)
                });
            match copied {
                Ok(text) => signals.push_toast(Toast::info(format!("📋 Copied {text}"), HOTKEY_TOAST_MS)),
                Err(e) => {
                    log::warn!("⚠️ {}", e);
                    signals.push_toast(Toast::alert(e.to_string(), HOTKEY_TOAST_MS));
                }
            }
        }
        HotkeyAction::StartTyping => match ctx.typing.start() {
            // Detached: the session reports its own outcome as a toast
            Ok(_session) => signals.push_toast(Toast::info("⌨️ Typing started (F10 cancels)", HOTKEY_TOAST_MS)),
            Err(AutomationError::TypingBusy) => {
                signals.push_toast(Toast::info("⌨️ Typing already running", HOTKEY_TOAST_MS))
            }
            Err(e) => {
                log::warn!("⚠️ {}", e);
                signals.push_toast(Toast::alert(e.to_string(), HOTKEY_TOAST_MS));
            }
        },
        HotkeyAction::CancelTyping => {
            if ctx.typing.is_running() {
                ctx.typing.cancel();
            } else {
                signals.push_toast(Toast::info("No typing session running", HOTKEY_TOAST_MS));
            }
        }
        HotkeyAction::Teardown => {
            ctx.shutdown.trigger();
        }
    }
}
