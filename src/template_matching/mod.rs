/// Template matching module for finding reference images on screen
///
/// This module provides:
/// - Folder-based template discovery with per-group post-actions
/// - Grayscale template decoding that isolates unreadable files
/// - Normalized cross-correlation search with optional coarse-to-fine pyramid
/// - A single best candidate per scan pass across all displays
pub mod matcher;
pub mod repository;
pub mod types;

pub use matcher::{Correlator, MatchEngine, NccCorrelator, Peak, select_best};
pub use repository::{FolderTemplates, TemplateCatalog, TemplateGroup, TemplateRepository, TemplateSource};
pub use types::{LoadedTemplate, MatchCandidate, MatchHit, ScanResult, TemplateSpec};
