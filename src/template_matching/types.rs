//! Template matching data types

use image::GrayImage;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A reference image source and the action its group requires after a click
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateSpec {
    /// Image location; unique per load and used as the template identity
    pub path: PathBuf,
    /// Group (folder) the template was discovered in
    pub group: String,
    /// Key chord sent after the click, if the group asks for one
    pub post_action: Option<String>,
}

impl TemplateSpec {
    pub fn new(path: impl Into<PathBuf>, group: impl Into<String>, post_action: Option<String>) -> Self {
        Self {
            path: path.into(),
            group: group.into(),
            post_action,
        }
    }

    /// Identity string used in candidates and hits
    pub fn identity(&self) -> String {
        self.path.display().to_string()
    }

    /// Short name for log lines and toasts
    pub fn display_name(&self) -> String {
        Path::new(&self.path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string()
    }
}

/// A decoded template, immutable after load
#[derive(Clone, Debug)]
pub struct LoadedTemplate {
    pub spec: TemplateSpec,
    /// Grayscale pixels compared against captured frames
    pub pixels: GrayImage,
}

impl LoadedTemplate {
    pub fn new(spec: TemplateSpec, pixels: GrayImage) -> Self {
        Self { spec, pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Best (template, display) result of one scan pass, in display-local space
#[derive(Clone, Debug, PartialEq)]
pub struct MatchCandidate {
    /// Position of the template in the list supplied to the pass
    pub template_index: usize,
    /// 1-based display index in the enumeration supplied to the pass
    pub display_index: usize,
    pub local_x: u32,
    pub local_y: u32,
    pub template_width: u32,
    pub template_height: u32,
    pub score: f32,
}

impl MatchCandidate {
    /// Center of the matched window, truncated to whole pixels
    pub fn local_center(&self) -> (u32, u32) {
        (
            self.local_x + self.template_width / 2,
            self.local_y + self.template_height / 2,
        )
    }
}

/// A confident match translated to global screen coordinates
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchHit {
    pub template_identity: String,
    pub template_name: String,
    pub group: String,
    pub post_action: Option<String>,
    pub display_index: usize,
    pub global_x: i32,
    pub global_y: i32,
    pub score: f32,
}

/// Outcome of one scan pass
#[derive(Clone, Debug, PartialEq)]
pub enum ScanResult {
    Hit(MatchHit),
    Miss,
}

impl ScanResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, ScanResult::Hit(_))
    }
}
