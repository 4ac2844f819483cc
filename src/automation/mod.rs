// Automation module - scan scheduler, action dispatch and scripted typing
pub mod channels;
pub mod config;
pub mod dispatcher;
pub mod scheduler;
pub mod signal;
pub mod types;
pub mod typing;

#[cfg(test)]
pub(crate) mod testing;

pub use channels::{EventSender, create_event_channel};
pub use config::{CONFIG_FILE_NAME, ScanConfig};
pub use dispatcher::ActionDispatcher;
pub use scheduler::{ScanScheduler, WORKER_THREAD_NAME, spawn_scan_worker};
pub use signal::{CancelFlag, StopSignal};
pub use types::{AutomationEvent, ScanState, SessionSummary, Toast, ToastKind, WindowOutcome};
pub use typing::{PlaybackOutcome, TypingController, TypingTiming, load_text_lines, play_lines, split_lines};
