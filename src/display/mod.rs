// Display module - monitor topology and per-monitor frame capture
// Enumerates physical displays in a shared global coordinate space and grabs
// one grayscale frame per display for the match engine.

pub mod backend;
pub mod types;


// Re-export the main types for easy access
pub use backend::{ScreenSource, XcapScreen};
pub use types::{DisplayRect, DisplayTopology, FrameBuffer};
