// gui/toasts.rs
// Transient notifications shown in the overlay, newest last

use crate::automation::{Toast, ToastKind};
use std::time::{Duration, Instant};

/// Oldest toasts are dropped beyond this
pub const MAX_VISIBLE_TOASTS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveToast {
    pub id: u64,
    pub text: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<ActiveToast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(ActiveToast {
            id,
            text: toast.text,
            kind: toast.kind,
            expires_at: now + Duration::from_millis(toast.duration_ms),
        });
        if self.items.len() > MAX_VISIBLE_TOASTS {
            let overflow = self.items.len() - MAX_VISIBLE_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    /// Drop expired toasts; returns whether anything was removed
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.expires_at > now);
        self.items.len() != before
    }

    pub fn items(&self) -> &[ActiveToast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
