pub mod args;
pub mod automation;
pub mod display;
pub mod error;
pub mod gui;
pub mod input;
pub mod template_matching;

pub use error::{AutomationError, AutomationResult};
