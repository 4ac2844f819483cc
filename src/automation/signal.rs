// Cooperative cancellation flag shared between the foreground and workers
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::{Duration, Instant, sleep};

#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Sleep for `total` in steps of at most `slice`, returning early once the
    /// signal is raised. Returns `true` when the full duration elapsed.
    pub async fn sleep_sliced(&self, total: Duration, slice: Duration) -> bool {
        let deadline = Instant::now() + total;
        let slice = slice.max(Duration::from_millis(1));
        loop {
            if self.is_set() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            sleep(slice.min(deadline - now)).await;
        }
    }
}

/// Re-armable cancel request for one-at-a-time sessions such as scripted typing
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    flag: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clear a stale request before a new session starts
    pub fn rearm(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
