use crate::error::{AutomationError, AutomationResult};

/// Trait for the copy-coordinates hotkey target
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> AutomationResult<()>;
}

/// System clipboard via `arboard`, opened per copy
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> AutomationResult<()> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| AutomationError::Clipboard {
            reason: e.to_string(),
        })?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| AutomationError::Clipboard {
                reason: e.to_string(),
            })
    }
}

/// Clipboard text for a cursor position, `x,y`
pub fn format_coordinates(x: i32, y: i32) -> String {
    format!("{x},{y}")
}
