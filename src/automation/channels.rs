// Communication channel from background workers to the foreground loop
use super::types::{AutomationEvent, Toast};
use tokio::sync::mpsc;

/// Thread-safe enqueue handle; sending never blocks and never calls into
/// the receiver's thread.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<AutomationEvent>,
}

impl EventSender {
    pub fn send(&self, event: AutomationEvent) {
        if self.tx.send(event).is_err() {
            log::debug!("📭 Event receiver dropped, notification discarded");
        }
    }

    pub fn toast(&self, toast: Toast) {
        self.send(AutomationEvent::Toast(toast));
    }
}

/// Helper function to create the event channel
pub fn create_event_channel() -> (EventSender, mpsc::UnboundedReceiver<AutomationEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, rx)
}
