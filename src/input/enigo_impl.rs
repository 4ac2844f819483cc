use super::InputDriver;
use super::keys::{KeyChord, KeyCode, Modifier};
use crate::error::{AutomationError, AutomationResult};
use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};

/// Input driver backed by `enigo`
pub struct EnigoInput {
    enigo: Enigo,
}

impl EnigoInput {
    pub fn new() -> AutomationResult<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| AutomationError::action("connect", e))?;
        Ok(Self { enigo })
    }

    fn modifier_key(modifier: Modifier) -> Key {
        match modifier {
            Modifier::Control => Key::Control,
            Modifier::Shift => Key::Shift,
            Modifier::Alt => Key::Alt,
            Modifier::Meta => Key::Meta,
        }
    }

    fn key(code: KeyCode) -> AutomationResult<Key> {
        let key = match code {
            KeyCode::Char(c) => Key::Unicode(c),
            KeyCode::Enter => Key::Return,
            KeyCode::Tab => Key::Tab,
            KeyCode::Escape => Key::Escape,
            KeyCode::Space => Key::Space,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Up => Key::UpArrow,
            KeyCode::Down => Key::DownArrow,
            KeyCode::Left => Key::LeftArrow,
            KeyCode::Right => Key::RightArrow,
            KeyCode::Function(n) => match n {
                1 => Key::F1,
                2 => Key::F2,
                3 => Key::F3,
                4 => Key::F4,
                5 => Key::F5,
                6 => Key::F6,
                7 => Key::F7,
                8 => Key::F8,
                9 => Key::F9,
                10 => Key::F10,
                11 => Key::F11,
                12 => Key::F12,
                other => {
                    return Err(AutomationError::InvalidKeyChord {
                        chord: format!("f{other}"),
                        reason: "function key out of range".to_string(),
                    });
                }
            },
        };
        Ok(key)
    }
}

impl InputDriver for EnigoInput {
    fn move_pointer(&mut self, x: i32, y: i32) -> AutomationResult<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| AutomationError::action("move", e))
    }

    fn click_primary(&mut self) -> AutomationResult<()> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| AutomationError::action("click", e))
    }

    fn send_chord(&mut self, chord: &KeyChord) -> AutomationResult<()> {
        let key = Self::key(chord.key)?;
        let mut pressed = Vec::with_capacity(chord.modifiers.len());
        let mut outcome = Ok(());

        for modifier in &chord.modifiers {
            let modifier_key = Self::modifier_key(*modifier);
            if let Err(e) = self.enigo.key(modifier_key, Direction::Press) {
                outcome = Err(AutomationError::action("key", e));
                break;
            }
            pressed.push(modifier_key);
        }
        if outcome.is_ok() {
            outcome = self
                .enigo
                .key(key, Direction::Click)
                .map_err(|e| AutomationError::action("key", e));
        }
        // Always release what was pressed, even after a failure
        for modifier_key in pressed.into_iter().rev() {
            if let Err(e) = self.enigo.key(modifier_key, Direction::Release) {
                log::warn!("⚠️ Failed to release modifier {:?}: {}", modifier_key, e);
            }
        }
        outcome
    }

    fn type_char(&mut self, c: char) -> AutomationResult<()> {
        let mut buf = [0u8; 4];
        self.enigo
            .text(c.encode_utf8(&mut buf))
            .map_err(|e| AutomationError::action("type", e))
    }

    fn pointer_position(&self) -> AutomationResult<(i32, i32)> {
        self.enigo
            .location()
            .map_err(|e| AutomationError::action("position", e))
    }
}
