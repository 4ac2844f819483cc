// gui/hotkeys.rs
// Dispatch table: accelerator -> action, handled on the foreground thread only

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    /// Held: show the HUD line; released: hide it
    ShowHud,
    CopyCoordinates,
    StartTyping,
    CancelTyping,
    Teardown,
}

/// Accelerators in the global-hotkey format
pub const HOTKEYS: [(HotkeyAction, &str); 5] = [
    (HotkeyAction::ShowHud, "F8"),
    (HotkeyAction::CopyCoordinates, "ctrl+shift+KeyC"),
    (HotkeyAction::StartTyping, "F9"),
    (HotkeyAction::CancelTyping, "F10"),
    (HotkeyAction::Teardown, "Escape"),
];

impl HotkeyAction {
    pub fn accelerator(self) -> &'static str {
        HOTKEYS
            .iter()
            .find(|(action, _)| *action == self)
            .map(|(_, accel)| *accel)
            .unwrap_or_default()
    }

    /// Only the HUD cares about key release
    pub fn wants_release(self) -> bool {
        matches!(self, HotkeyAction::ShowHud)
    }

    pub fn description(self) -> &'static str {
        match self {
            HotkeyAction::ShowHud => "hold to show cursor position",
            HotkeyAction::CopyCoordinates => "copy cursor position",
            HotkeyAction::StartTyping => "type typing.txt",
            HotkeyAction::CancelTyping => "cancel typing",
            HotkeyAction::Teardown => "quit",
        }
    }
}

/// Startup instruction text listing every binding
pub fn instructions() -> String {
    HOTKEYS
        .iter()
        .map(|(action, accel)| format!("{}: {}", accel.replace("KeyC", "C"), action.description()))
        .collect::<Vec<_>>()
        .join(" · ")
}
