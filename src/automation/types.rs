// Types and enums for the scan loop and its notifications
use crate::template_matching::MatchHit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Searching,
    Cooldown,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    /// Red toast plus the audible cue
    Alert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub text: String,
    pub duration_ms: u64,
    pub kind: ToastKind,
}

impl Toast {
    pub fn info(text: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            text: text.into(),
            duration_ms,
            kind: ToastKind::Info,
        }
    }

    pub fn alert(text: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            text: text.into(),
            duration_ms,
            kind: ToastKind::Alert,
        }
    }
}

/// Messages from background workers to the foreground loop
#[derive(Debug, Clone)]
pub enum AutomationEvent {
    StateChanged(ScanState),
    Matched(MatchHit),
    Toast(Toast),
    SessionAborted(String),
}

/// How one search window ended
#[derive(Debug, Clone, PartialEq)]
pub enum WindowOutcome {
    Hit(MatchHit),
    NotFound,
    Stopped,
}

/// Counters reported when a scan session ends cleanly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub windows: u64,
    pub passes: u64,
    pub hits: u64,
    pub alerts: u64,
}
