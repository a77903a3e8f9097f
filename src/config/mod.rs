//! Configuration module for pointlabel
//!
//! Settings are read from a single file (TOML, YAML or JSON, chosen by
//! extension) and validated before any dataset work starts. The default
//! location is `<config_dir>/pointlabel/config.toml`.
//!
//! ```toml
//! [data]
//! pointcloud_root = "/data/objects"
//! background_pointcloud_root = "/data/scenes"
//! out_json = "labels.json"
//! projection = "EPSG:32632"
//!
//! [viewer]
//! color_mode = "def_rgb"
//!
//! [labeling]
//! next_on_label = true
//! classification_keymapping = { q = "bad", w = "multiple", e = "ok", r = "good", t = "ignore" }
//! ```

mod error;
mod setup;
mod viewer;

pub use error::{ConfigError, Result};
pub use setup::first_time_setup;
pub use viewer::{ColorMode, LayerStyle, Style, ViewerConfig, ViewerStyle, Viewpoint};

use crate::keybinds::{KeyBindingTable, default_keymapping};
use crate::labels::LabelToken;
use crate::map::Projection;
use ::config::{Config, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "pointlabel";

/// `data` section: where objects, scenes and label files live
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DataConfig {
    /// Root of the foreground object tree
    pub pointcloud_root: PathBuf,

    /// Root of the background tree, laid out as `<chain>/<group>.laz`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_pointcloud_root: Option<PathBuf>,

    /// Per-point instance attribute for single-tree datasets (not supported)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id_field: Option<String>,

    /// Existing label file; setting it turns on resume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_json: Option<PathBuf>,

    /// Where labels are written on save and exit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_json: Option<PathBuf>,

    /// EPSG code of the point coordinates, used by the map lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<String>,
}

/// `labeling` section
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LabelingConfig {
    #[serde(default = "default_next_on_label")]
    pub next_on_label: bool,

    /// Label key (`q`..`t`, or `q_class`..) to label token
    #[serde(default = "default_keymapping")]
    pub classification_keymapping: BTreeMap<String, LabelToken>,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            next_on_label: default_next_on_label(),
            classification_keymapping: default_keymapping(),
        }
    }
}

const fn default_next_on_label() -> bool {
    true
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub data: DataConfig,

    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub labeling: LabelingConfig,
}

impl AppConfig {
    /// Configuration for a foreground root with every other value defaulted
    #[must_use]
    pub fn new(pointcloud_root: impl Into<PathBuf>) -> Self {
        Self {
            data: DataConfig {
                pointcloud_root: pointcloud_root.into(),
                ..DataConfig::default()
            },
            ..Self::default()
        }
    }

    /// Get the path to the default config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoDirectory` if the system config directory cannot
    /// be determined.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoDirectory("config"))?;
        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Load and validate configuration from `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if the file is missing or malformed and
    /// `ConfigError::Validation` if a value is rejected by [`Self::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Write configuration as TOML, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string).map_err(write_err)?;
        Ok(())
    }

    /// Reject inconsistent or out-of-range settings
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.key_bindings()?;

        match (
            &self.data.background_pointcloud_root,
            &self.data.instance_id_field,
        ) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Validation(
                    "background_pointcloud_root and instance_id_field cannot be used together"
                        .to_string(),
                ));
            }
            (None, Some(field)) => {
                return Err(ConfigError::Validation(format!(
                    "instance_id_field '{field}' is not supported; split objects into a \
                     foreground tree and set background_pointcloud_root instead"
                )));
            }
            _ => {}
        }

        self.viewer.validate().map_err(ConfigError::Validation)?;
        self.projection()?;
        Ok(())
    }

    /// Key table for the labeling session
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for invalid bindings.
    pub fn key_bindings(&self) -> Result<KeyBindingTable> {
        Ok(KeyBindingTable::build(
            &self.labeling.classification_keymapping,
        )?)
    }

    /// Parsed map projection, if configured
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for unsupported EPSG codes.
    pub fn projection(&self) -> Result<Option<Projection>> {
        self.data
            .projection
            .as_deref()
            .map(|code| {
                code.parse::<Projection>()
                    .map_err(|e| ConfigError::Validation(e.to_string()))
            })
            .transpose()
    }

    /// Resume is on exactly when an input label file is configured
    #[must_use]
    pub const fn resume(&self) -> bool {
        self.data.in_json.is_some()
    }

    /// Style handed to the viewer
    #[must_use]
    pub fn viewer_style(&self) -> ViewerStyle {
        self.viewer.resolve()
    }
}

/// Fixed autosave location, independent of the configured output
#[must_use]
pub fn autosave_path() -> PathBuf {
    data_dir().join("autosave.json")
}

/// Directory for log files
#[must_use]
pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "config.toml", "[data]\npointcloud_root = \"/data/fg\"\n");

        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.data.pointcloud_root, PathBuf::from("/data/fg"));
        assert!(config.labeling.next_on_label);
        assert_eq!(config.labeling.classification_keymapping, default_keymapping());
        assert_eq!(config.viewer, ViewerConfig::default());
        assert!(!config.resume());
    }

    #[test]
    fn test_full_toml_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "config.toml",
            r#"
[data]
pointcloud_root = "/data/fg"
background_pointcloud_root = "/data/bg"
in_json = "old.json"
out_json = "new.json"
projection = "EPSG:32632"

[viewer]
viewpoint = "side"
color_mode = "def_def"
view_box = [20.0, 20.0, 10.0]

[viewer.foreground_style]
point_size = 4
default_color = [1.0, 0.0, 0.0]

[labeling]
next_on_label = false

[labeling.classification_keymapping]
q_class = 0
w_class = 1
e_class = "noise"
"#,
        );

        let config = AppConfig::load(&path).unwrap();

        assert!(config.resume());
        assert_eq!(config.viewer.viewpoint, Viewpoint::Side);
        assert_eq!(config.viewer.foreground_style.point_size, 4.0);
        assert_eq!(config.viewer.view_box, [20.0, 20.0, 10.0]);
        assert!(!config.labeling.next_on_label);

        let keys = config.key_bindings().unwrap();
        assert_eq!(keys.len(), 3);
        assert_eq!(keys.resolve('q'), Some(&LabelToken::Int(0)));
        assert_eq!(keys.resolve('e'), Some(&LabelToken::from("noise")));
        assert_eq!(keys.resolve('r'), None);

        let style = config.viewer_style();
        assert_eq!(style.foreground.color, Some([1.0, 0.0, 0.0]));
        assert_eq!(style.background.color, Some([0.5, 0.5, 0.5]));

        assert!(matches!(
            config.projection().unwrap(),
            Some(Projection::Utm { zone: 32, north: true })
        ));
    }

    #[test]
    fn test_yaml_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "config.yaml",
            "data:\n  pointcloud_root: /data/fg\nlabeling:\n  classification_keymapping:\n    q: keep\n    w: drop\n",
        );

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.key_bindings().unwrap().len(), 2);
    }

    #[test]
    fn test_rejects_reserved_sentinel() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "config.toml",
            "[data]\npointcloud_root = \"/fg\"\n[labeling.classification_keymapping]\nq = -100\n",
        );

        let result = AppConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_rejects_unknown_and_duplicate_keys() {
        let mut config = AppConfig::new("/fg");
        config.labeling.classification_keymapping = BTreeMap::from([("x".to_string(), LabelToken::Int(1))]);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.labeling.classification_keymapping = BTreeMap::from([
            ("q".to_string(), LabelToken::Int(1)),
            ("q_class".to_string(), LabelToken::Int(2)),
        ]);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_instance_id_field_rules() {
        let mut config = AppConfig::new("/fg");
        config.data.instance_id_field = Some("tree_id".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.data.background_pointcloud_root = Some(PathBuf::from("/bg"));
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.data.instance_id_field = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_unsupported_projection() {
        let mut config = AppConfig::new("/fg");
        config.data.projection = Some("EPSG:2056".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.data.projection = Some("EPSG:4326".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = TempDir::new().unwrap();
        let result = AppConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = AppConfig::new("/data/fg");
        config.data.out_json = Some(PathBuf::from("labels.json"));
        config.labeling.next_on_label = false;
        config.save(&path).unwrap();

        let reloaded = AppConfig::load(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_autosave_path_is_fixed() {
        assert_eq!(autosave_path(), autosave_path());
        assert!(autosave_path().ends_with("pointlabel/autosave.json"));
    }
}
