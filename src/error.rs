use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for scan, capture and input operations.
pub type AutomationResult<T> = Result<T, AutomationError>;

/// The error type shared by the display, matching, input and automation layers.
#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("No templates available to search. Add images to: {folders}")]
    ConfigurationEmpty { folders: String },

    #[error("Screen grab failed for monitor #{display_index}: {reason}")]
    CaptureFailed { display_index: usize, reason: String },

    #[error("Could not read image {path:?}: {reason}")]
    DecodeFailed { path: PathBuf, reason: String },

    #[error("No physical monitors detected")]
    TopologyEmpty,

    #[error("Failed to enumerate monitors: {reason}")]
    DisplayEnumerationFailed { reason: String },

    #[error("Template '{template}' ({template_width}x{template_height}) is larger than frame {frame_width}x{frame_height}")]
    TemplateTooLarge {
        template: String,
        template_width: u32,
        template_height: u32,
        frame_width: u32,
        frame_height: u32,
    },

    #[error("Correlation undefined for template '{template}' on monitor #{display_index}")]
    CorrelationUndefined { template: String, display_index: usize },

    #[error("Input step '{step}' failed: {reason}")]
    ActionFailed { step: &'static str, reason: String },

    #[error("Invalid key chord '{chord}': {reason}")]
    InvalidKeyChord { chord: String, reason: String },

    #[error("Text playback is already running")]
    TypingBusy,

    #[error("Text resource {path:?} not found or empty")]
    TextResourceUnavailable { path: PathBuf },

    #[error("Failed to load config {path:?}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("Invalid config value '{field}': {reason}")]
    ConfigInvalid { field: &'static str, reason: String },

    #[error("Clipboard access failed: {reason}")]
    Clipboard { reason: String },

    #[error("Worker thread failed to start: {source}")]
    WorkerSpawn {
        #[from]
        source: std::io::Error,
    },

    #[error("Worker thread '{name}' panicked")]
    WorkerPanicked { name: &'static str },
}

impl AutomationError {
    /// Only the absence of displays ends a scan session. A failed read of the
    /// display list is retried on the next window like any other isolated failure.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AutomationError::TopologyEmpty)
    }

    pub fn action(step: &'static str, reason: impl std::fmt::Display) -> Self {
        AutomationError::ActionFailed {
            step,
            reason: reason.to_string(),
        }
    }
}
