//! Configuration for the scan loop, input timing and scripted typing

use crate::error::{AutomationError, AutomationResult};
use crate::input::KeyChord;
use crate::template_matching::TemplateGroup;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Optional override file looked up in the base directory
pub const CONFIG_FILE_NAME: &str = "screen-match.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Minimum correlation score for a hit (0.0 to 1.0)
    pub threshold: f32,
    /// Pause between scan passes inside one search window
    pub retry_ms: u64,
    /// Length of one search window
    pub timeout_ms: u64,
    /// Quiet period after a hit
    pub cooldown_ms: u64,
    /// Granularity of every stop-aware wait
    pub cooldown_slice_ms: u64,
    /// Backoff when there are no templates to search
    pub idle_ms: u64,
    /// Delay between the click and the post-action key
    pub settle_ms: u64,
    pub hud_refresh_ms: u64,
    /// Downscale factor of the coarse search (1 = exhaustive)
    pub pyramid_factor: u32,
    pub type_char_delay_ms: u64,
    pub line_jitter_min_ms: u64,
    pub line_jitter_max_ms: u64,
    /// Chord sent after each typed line
    pub line_submit: String,
    /// Text resource for scripted typing, relative to the base directory
    pub typing_file: String,
    pub groups: Vec<TemplateGroup>,
    /// Post-action for templates given on the command line
    pub legacy_post_action: Option<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold: 0.85,
            retry_ms: 120,
            timeout_ms: 6000,
            cooldown_ms: 3000,
            cooldown_slice_ms: 50,
            idle_ms: 500,
            settle_ms: 100,
            hud_refresh_ms: 30,
            pyramid_factor: 2,
            type_char_delay_ms: 20,
            line_jitter_min_ms: 15,
            line_jitter_max_ms: 200,
            line_submit: "ctrl+j".to_string(),
            typing_file: "typing.txt".to_string(),
            groups: vec![
                TemplateGroup::new("Folder_Type_A", None),
                TemplateGroup::new("Folder_Type_Y", Some("y")),
            ],
            legacy_post_action: Some("y".to_string()),
        }
    }
}

impl ScanConfig {
    /// Load `screen-match.toml` from `base_dir`. A missing file yields the
    /// defaults; a file that does not parse or validate is an error.
    pub fn load(base_dir: &Path) -> AutomationResult<Self> {
        let path = base_dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            log::debug!("⚙️ No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> AutomationResult<Self> {
        let load_err = |reason: String| AutomationError::ConfigLoad {
            path: path.to_path_buf(),
            reason,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let config: ScanConfig = toml::from_str(&contents).map_err(|e| load_err(e.to_string()))?;
        config.validate()?;
        log::info!("⚙️ Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> AutomationResult<()> {
        let invalid = |field: &'static str, reason: &str| {
            Err(AutomationError::ConfigInvalid {
                field,
                reason: reason.to_string(),
            })
        };

        if !(0.0..=1.0).contains(&self.threshold) {
            return invalid("threshold", "must be between 0.0 and 1.0");
        }
        if self.retry_ms == 0 {
            return invalid("retry_ms", "must be greater than zero");
        }
        if self.cooldown_slice_ms == 0 {
            return invalid("cooldown_slice_ms", "must be greater than zero");
        }
        if self.idle_ms == 0 {
            return invalid("idle_ms", "must be greater than zero");
        }
        if self.hud_refresh_ms == 0 {
            return invalid("hud_refresh_ms", "must be greater than zero");
        }
        if self.pyramid_factor == 0 {
            return invalid("pyramid_factor", "must be at least 1");
        }
        if self.line_jitter_min_ms > self.line_jitter_max_ms {
            return invalid("line_jitter_min_ms", "must not exceed line_jitter_max_ms");
        }
        if self.groups.iter().any(|g| g.folder.trim().is_empty()) {
            return invalid("groups", "folder names must not be empty");
        }
        KeyChord::parse(&self.line_submit)?;
        for action in self
            .groups
            .iter()
            .filter_map(|g| g.post_action.as_deref())
            .chain(self.legacy_post_action.as_deref())
        {
            KeyChord::parse(action)?;
        }
        Ok(())
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn slice(&self) -> Duration {
        Duration::from_millis(self.cooldown_slice_ms)
    }

    pub fn idle_backoff(&self) -> Duration {
        Duration::from_millis(self.idle_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn hud_refresh(&self) -> Duration {
        Duration::from_millis(self.hud_refresh_ms)
    }

    pub fn typing_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.typing_file)
    }
}
