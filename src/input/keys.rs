//! Key chord parsing for post-actions and line-submit keys
//!
//! Accepts ids such as `y`, `enter`, `ctrl+j`, `shift+tab` or `f5`.

use crate::error::{AutomationError, AutomationResult};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Control,
    Shift,
    Alt,
    Meta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Escape,
    Space,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Function(u8),
}

/// Zero or more modifiers held while one key is clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub modifiers: Vec<Modifier>,
    pub key: KeyCode,
}

impl KeyChord {
    pub fn single(key: KeyCode) -> Self {
        Self {
            modifiers: Vec::new(),
            key,
        }
    }

    pub fn parse(id: &str) -> AutomationResult<Self> {
        let invalid = |reason: &str| AutomationError::InvalidKeyChord {
            chord: id.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty key id"));
        }
        // A lone "+" is the plus key, not a separator
        if trimmed == "+" {
            return Ok(Self::single(KeyCode::Char('+')));
        }

        let parts: Vec<&str> = trimmed.split('+').map(str::trim).collect();
        let (key_part, modifier_parts) = parts
            .split_last()
            .ok_or_else(|| invalid("empty key id"))?;

        let mut modifiers = Vec::with_capacity(modifier_parts.len());
        for part in modifier_parts {
            let modifier = parse_modifier(part).ok_or_else(|| invalid("unknown modifier"))?;
            if !modifiers.contains(&modifier) {
                modifiers.push(modifier);
            }
        }
        let key = parse_key(key_part).ok_or_else(|| invalid("unknown key"))?;
        Ok(Self { modifiers, key })
    }
}

impl FromStr for KeyChord {
    type Err = AutomationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            let name = match modifier {
                Modifier::Control => "ctrl",
                Modifier::Shift => "shift",
                Modifier::Alt => "alt",
                Modifier::Meta => "meta",
            };
            write!(f, "{name}+")?;
        }
        match self.key {
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Function(n) => write!(f, "f{n}"),
            other => write!(f, "{}", format!("{other:?}").to_lowercase()),
        }
    }
}

fn parse_modifier(name: &str) -> Option<Modifier> {
    match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(Modifier::Control),
        "shift" => Some(Modifier::Shift),
        "alt" | "option" => Some(Modifier::Alt),
        "meta" | "super" | "win" | "cmd" | "command" => Some(Modifier::Meta),
        _ => None,
    }
}

fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c.to_ascii_lowercase()));
    }

    let lower = name.to_ascii_lowercase();
    let key = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "esc" | "escape" => KeyCode::Escape,
        "space" => KeyCode::Space,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "plus" => KeyCode::Char('+'),
        _ => {
            let number = lower.strip_prefix('f')?.parse::<u8>().ok()?;
            if !(1..=12).contains(&number) {
                return None;
            }
            KeyCode::Function(number)
        }
    };
    Some(key)
}
