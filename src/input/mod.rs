// Input module - pointer, keyboard and clipboard side effects
// The scan worker, the typing worker and the overlay each own their own
// driver instance; nothing here is shared across threads.

pub mod clipboard;
pub mod enigo_impl;
pub mod keys;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use enigo_impl::EnigoInput;
pub use keys::{KeyChord, KeyCode, Modifier};

use crate::error::AutomationResult;

/// Trait defining input capabilities (enigo in production, recorders in tests)
pub trait InputDriver {
    fn move_pointer(&mut self, x: i32, y: i32) -> AutomationResult<()>;
    fn click_primary(&mut self) -> AutomationResult<()>;
    /// Press modifiers, click the key, release modifiers in reverse order
    fn send_chord(&mut self, chord: &KeyChord) -> AutomationResult<()>;
    fn type_char(&mut self, c: char) -> AutomationResult<()>;
    fn pointer_position(&self) -> AutomationResult<(i32, i32)>;
}
