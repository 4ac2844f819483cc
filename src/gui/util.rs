// gui/util.rs
// Pure helpers for the overlay: placement, HUD text and event-to-toast mapping

use crate::automation::{AutomationEvent, Toast};
use crate::display::DisplayRect;

/// Gap between the overlay and the monitor's top-right corner
pub const OVERLAY_MARGIN: i32 = 20;
pub const OVERLAY_WIDTH: u32 = 360;
pub const OVERLAY_HEIGHT: u32 = 240;

const MATCH_TOAST_MS: u64 = 1500;
const ABORT_TOAST_MS: u64 = 5000;

/// Top-left corner for an overlay of `width` pinned to the top-right of `rect`
pub fn overlay_position(rect: &DisplayRect, width: u32) -> (i32, i32) {
    let right = rect.origin_x as i64 + rect.width as i64;
    let x = right - width as i64 - OVERLAY_MARGIN as i64;
    let x = x.max(rect.origin_x as i64);
    (x as i32, rect.origin_y + OVERLAY_MARGIN)
}

/// `monitor` is 1-based, 0 when the cursor is outside every display
pub fn hud_line(x: i32, y: i32, monitor: usize) -> String {
    format!("X: {x}  Y: {y}  Mon: {monitor}")
}

pub fn toast_for_event(event: &AutomationEvent) -> Option<Toast> {
    match event {
        AutomationEvent::StateChanged(_) => None,
        AutomationEvent::Matched(hit) => Some(Toast::info(
            format!(
                "🎯 {} on monitor #{} ({}, {})",
                hit.template_name, hit.display_index, hit.global_x, hit.global_y
            ),
            MATCH_TOAST_MS,
        )),
        AutomationEvent::Toast(toast) => Some(toast.clone()),
        AutomationEvent::SessionAborted(reason) => {
            Some(Toast::alert(format!("Scanning stopped: {reason}"), ABORT_TOAST_MS))
        }
    }
}

/// Audible cue for alert toasts
pub fn ring_bell() {
    use std::io::Write;
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}
