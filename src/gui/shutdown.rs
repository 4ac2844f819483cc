// gui/shutdown.rs
// Process teardown, safe to request from any thread and any number of times

use crate::automation::{StopSignal, TypingController};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone)]
pub struct Shutdown {
    fired: Arc<AtomicBool>,
    scan_stop: StopSignal,
    typing: Option<TypingController>,
}

impl Shutdown {
    pub fn new(scan_stop: StopSignal, typing: Option<TypingController>) -> Self {
        Self {
            fired: Arc::new(AtomicBool::new(false)),
            scan_stop,
            typing,
        }
    }

    /// Raise every stop flag. Returns `true` only for the call that actually
    /// started the teardown. The overlay notices `is_triggered` on its next
    /// tick and closes its window from the foreground thread.
    pub fn trigger(&self) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        log::info!("🛑 Shutdown requested");
        self.scan_stop.trigger();
        if let Some(typing) = &self.typing {
            typing.cancel();
        }
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}
