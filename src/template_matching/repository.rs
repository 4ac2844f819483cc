//! Template discovery and loading

use super::types::{LoadedTemplate, TemplateSpec};
use crate::error::{AutomationError, AutomationResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Image extensions picked up by folder discovery (compared lowercase)
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// A watched folder and the key chord sent after clicking one of its images
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplateGroup {
    pub folder: String,
    #[serde(default)]
    pub post_action: Option<String>,
}

impl TemplateGroup {
    pub fn new(folder: &str, post_action: Option<&str>) -> Self {
        Self {
            folder: folder.to_string(),
            post_action: post_action.map(str::to_string),
        }
    }
}

/// Where template specs come from
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateCatalog {
    /// Folder-based discovery under a base directory, one group per folder
    Folders {
        base_dir: PathBuf,
        groups: Vec<TemplateGroup>,
    },
    /// Legacy single-tier list given on the command line
    Explicit {
        paths: Vec<PathBuf>,
        post_action: Option<String>,
    },
}

impl TemplateCatalog {
    /// Enumerate template specs in a stable order: groups as configured,
    /// files sorted by name within each folder.
    pub fn discover(&self) -> Vec<TemplateSpec> {
        match self {
            TemplateCatalog::Folders { base_dir, groups } => {
                let mut specs = Vec::new();
                for group in groups {
                    let folder = base_dir.join(&group.folder);
                    if let Err(e) = std::fs::create_dir_all(&folder) {
                        log::warn!("⚠️ Could not create template folder {:?}: {}", folder, e);
                        continue;
                    }
                    specs.extend(
                        scan_image_files(&folder)
                            .into_iter()
                            .map(|path| TemplateSpec::new(path, &group.folder, group.post_action.clone())),
                    );
                }
                specs
            }
            TemplateCatalog::Explicit { paths, post_action } => paths
                .iter()
                .map(|path| TemplateSpec::new(path, "cli", post_action.clone()))
                .collect(),
        }
    }

    /// Human readable list of the watched locations, for "add images" hints
    pub fn describe_locations(&self) -> String {
        match self {
            TemplateCatalog::Folders { groups, .. } => groups
                .iter()
                .map(|g| g.folder.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            TemplateCatalog::Explicit { paths, .. } => paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Files in `folder` with a supported image extension, sorted by file name
fn scan_image_files(folder: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("⚠️ Failed to read directory {:?}: {}", folder, e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_supported_extension(path))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    files
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Decodes template specs into grayscale pixel buffers
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateRepository;

impl TemplateRepository {
    /// Load every spec that decodes; unreadable entries are logged and skipped
    pub fn load(specs: &[TemplateSpec]) -> Vec<LoadedTemplate> {
        let mut loaded = Vec::with_capacity(specs.len());
        for spec in specs {
            match Self::load_one(spec) {
                Ok(template) => loaded.push(template),
                Err(e) => log::warn!("⚠️ {}", e),
            }
        }
        loaded
    }

    pub fn load_one(spec: &TemplateSpec) -> AutomationResult<LoadedTemplate> {
        let decode_err = |reason: String| AutomationError::DecodeFailed {
            path: spec.path.clone(),
            reason,
        };

        let metadata = std::fs::metadata(&spec.path).map_err(|e| decode_err(e.to_string()))?;
        if metadata.len() == 0 {
            return Err(decode_err("zero-byte file".to_string()));
        }

        let pixels = image::open(&spec.path)
            .map_err(|e| decode_err(e.to_string()))?
            .to_luma8();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(decode_err("image has no pixels".to_string()));
        }

        log::debug!(
            "🧩 Loaded template {} ({}x{}, group={})",
            spec.display_name(),
            pixels.width(),
            pixels.height(),
            spec.group
        );
        Ok(LoadedTemplate::new(spec.clone(), pixels))
    }
}

/// Trait feeding the scheduler a fresh template set once per search window
pub trait TemplateSource {
    fn refresh(&mut self) -> Vec<LoadedTemplate>;

    /// Locations the user should put images in when nothing was found
    fn describe(&self) -> String;
}

/// Production source: re-runs discovery and decoding on every refresh so
/// images dropped into the folders during a run are picked up.
pub struct FolderTemplates {
    catalog: TemplateCatalog,
}

impl FolderTemplates {
    pub fn new(catalog: TemplateCatalog) -> Self {
        Self { catalog }
    }
}

impl TemplateSource for FolderTemplates {
    fn refresh(&mut self) -> Vec<LoadedTemplate> {
        let specs = self.catalog.discover();
        if specs.is_empty() {
            return Vec::new();
        }
        let loaded = TemplateRepository::load(&specs);
        log::debug!("🧩 {} of {} template(s) loaded", loaded.len(), specs.len());
        loaded
    }

    fn describe(&self) -> String {
        self.catalog.describe_locations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = GrayImage::from_fn(width, height, |x, y| Luma([((x * 7 + y * 13) % 255) as u8]));
        img.save(path).unwrap();
    }

    fn default_groups() -> Vec<TemplateGroup> {
        vec![
            TemplateGroup::new("Folder_Type_A", None),
            TemplateGroup::new("Folder_Type_Y", Some("y")),
        ]
    }

    #[test]
    fn test_discover_creates_folders_and_orders_files() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = TemplateCatalog::Folders {
            base_dir: dir.path().to_path_buf(),
            groups: default_groups(),
        };

        assert!(catalog.discover().is_empty());
        assert!(dir.path().join("Folder_Type_A").is_dir());
        assert!(dir.path().join("Folder_Type_Y").is_dir());

        write_png(&dir.path().join("Folder_Type_A/b_button.png"), 4, 4);
        write_png(&dir.path().join("Folder_Type_A/a_button.PNG"), 4, 4);
        write_png(&dir.path().join("Folder_Type_Y/accept.png"), 4, 4);
        std::fs::write(dir.path().join("Folder_Type_A/notes.txt"), "skip me").unwrap();

        let specs = catalog.discover();
        let names: Vec<String> = specs.iter().map(|s| s.display_name()).collect();
        assert_eq!(names, vec!["a_button.PNG", "b_button.png", "accept.png"]);
        assert_eq!(specs[0].post_action, None);
        assert_eq!(specs[2].post_action.as_deref(), Some("y"));
        assert_eq!(specs[2].group, "Folder_Type_Y");
    }

    #[test]
    fn test_explicit_catalog_keeps_cli_order() {
        let catalog = TemplateCatalog::Explicit {
            paths: vec![PathBuf::from("z.png"), PathBuf::from("a.png")],
            post_action: Some("y".to_string()),
        };
        let specs = catalog.discover();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].path, PathBuf::from("z.png"));
        assert_eq!(specs[1].post_action.as_deref(), Some("y"));
        assert_eq!(catalog.describe_locations(), "z.png, a.png");
    }

    #[test]
    fn test_load_skips_unreadable_entries() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        let empty = dir.path().join("empty.png");
        let corrupt = dir.path().join("corrupt.png");
        write_png(&good, 6, 3);
        std::fs::write(&empty, b"").unwrap();
        std::fs::write(&corrupt, b"definitely not a png").unwrap();

        let specs = vec![
            TemplateSpec::new(&empty, "A", None),
            TemplateSpec::new(&good, "A", None),
            TemplateSpec::new(dir.path().join("missing.png"), "A", None),
            TemplateSpec::new(&corrupt, "A", None),
        ];
        let loaded = TemplateRepository::load(&specs);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].spec.path, good);
        assert_eq!((loaded[0].width(), loaded[0].height()), (6, 3));
    }

    #[test]
    fn test_zero_byte_file_is_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.png");
        std::fs::write(&empty, b"").unwrap();
        match TemplateRepository::load_one(&TemplateSpec::new(&empty, "A", None)) {
            Err(AutomationError::DecodeFailed { reason, .. }) => assert_eq!(reason, "zero-byte file"),
            other => panic!("expected DecodeFailed, got {:?}", other.map(|t| t.spec)),
        }
    }

    #[test]
    fn test_folder_source_reloads_new_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FolderTemplates::new(TemplateCatalog::Folders {
            base_dir: dir.path().to_path_buf(),
            groups: default_groups(),
        });
        assert!(source.refresh().is_empty());
        assert_eq!(source.describe(), "Folder_Type_A, Folder_Type_Y");

        write_png(&dir.path().join("Folder_Type_Y/late.png"), 5, 5);
        let loaded = source.refresh();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].spec.post_action.as_deref(), Some("y"));
    }
}
