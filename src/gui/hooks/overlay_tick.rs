use crate::display::{DisplayTopology, ScreenSource, XcapScreen};
use crate::gui::dioxus_app::OverlayContext;
use crate::gui::hooks::types::OverlaySignals;
use crate::gui::util::{OVERLAY_WIDTH, hud_line, overlay_position, toast_for_event};
use crate::input::{EnigoInput, InputDriver};
use dioxus::desktop::tao::dpi::PhysicalPosition;
use dioxus::desktop::use_window;
use dioxus::prelude::*;
use std::time::{Duration, Instant};

/// How often the monitor layout is re-read for overlay placement
const TOPOLOGY_REFRESH: Duration = Duration::from_secs(2);

/// Foreground refresh loop: drains worker events into toasts, expires
/// toasts, updates the HUD line, places and shows or hides the window, and
/// closes it once shutdown was requested.
pub fn use_overlay_tick(ctx: OverlayContext, signals: OverlaySignals) {
    let desktop = use_window();
    use_future(move || {
        let ctx = ctx.clone();
        let desktop = desktop.clone();
        async move {
            let mut signals = signals;
            let Some(mut events) = ctx.take_receiver() else {
                log::warn!("⚠️ Overlay event receiver already taken");
                return;
            };
            let pointer = match EnigoInput::new() {
                Ok(input) => Some(input),
                Err(e) => {
                    log::warn!("⚠️ Cursor position unavailable: {}", e);
                    None
                }
            };
            let mut screen = XcapScreen::new();
            let mut topology = DisplayTopology::default();
            let mut topology_read: Option<Instant> = None;
            let mut visible = false;
            let mut position: Option<(i32, i32)> = None;

            loop {
                if ctx.shutdown.is_triggered() {
                    desktop.window.set_visible(false);
                    desktop.close();
                    break;
                }
                let now = Instant::now();

                while let Ok(event) = events.try_recv() {
                    if let Some(toast) = toast_for_event(&event) {
                        signals.push_toast(toast);
                    }
                }
                if signals.toasts.peek().items().iter().any(|t| t.expires_at <= now) {
                    signals.toasts.with_mut(|queue| {
                        queue.prune(now);
                    });
                }

                if topology_read.is_none_or(|at| now.duration_since(at) >= TOPOLOGY_REFRESH) {
                    match screen.enumerate() {
                        Ok(current) => topology = current,
                        Err(e) => log::debug!("🖥️ {}", e),
                    }
                    topology_read = Some(now);
                }

                let cursor = pointer.as_ref().and_then(|p| p.pointer_position().ok());
                let monitor = cursor.map_or(0, |(x, y)| topology.locate(x, y));
                let hud_held = *signals.hud_held.peek();
                let hud = if hud_held {
                    cursor.map(|(x, y)| hud_line(x, y, monitor))
                } else {
                    None
                };
                if *signals.hud_text.peek() != hud {
                    signals.hud_text.set(hud);
                }

                let want_visible = hud_held || !signals.toasts.peek().is_empty();
                if want_visible {
                    if let Some(rect) = topology.get(monitor).or_else(|| topology.get(1)) {
                        let target = overlay_position(rect, OVERLAY_WIDTH);
                        if position != Some(target) {
                            desktop
                                .window
                                .set_outer_position(PhysicalPosition::new(target.0, target.1));
                            position = Some(target);
                        }
                    }
                }
                if want_visible != visible {
                    desktop.window.set_visible(want_visible);
                    visible = want_visible;
                }

                tokio::time::sleep(ctx.config.hud_refresh()).await;
            }
        }
    });
}
