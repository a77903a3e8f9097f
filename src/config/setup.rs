//! Interactive setup wizard for first-time configuration
//!
//! Asks for the dataset roots and output file and writes a TOML config
//! with every other value at its default.

use super::{AppConfig, ConfigError, Result};
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::{Path, PathBuf};

/// Prompt for the essential settings and save them to `path`
///
/// Guides the user through:
/// 1. The foreground object root (required)
/// 2. The background scene root (optional, empty to skip)
/// 3. The output label file
/// 4. Whether to jump to the next object after labeling
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read, the answers fail
/// validation, or the configuration cannot be saved.
pub fn first_time_setup(path: &Path) -> Result<AppConfig> {
    println!("Welcome to pointlabel! Let's describe your dataset.\n");

    let theme = ColorfulTheme::default();
    let input_err = |e: dialoguer::Error| ConfigError::Setup(format!("Failed to read input: {e}"));

    let pointcloud_root: String = Input::with_theme(&theme)
        .with_prompt("Foreground object directory")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if Path::new(input).is_dir() {
                Ok(())
            } else {
                Err("not an existing directory")
            }
        })
        .interact_text()
        .map_err(input_err)?;

    let background_root: String = Input::with_theme(&theme)
        .with_prompt("Background scene directory (empty for none)")
        .allow_empty(true)
        .interact_text()
        .map_err(input_err)?;

    let out_json: String = Input::with_theme(&theme)
        .with_prompt("Label output file")
        .default("labels.json".to_string())
        .interact_text()
        .map_err(input_err)?;

    let next_on_label = Confirm::with_theme(&theme)
        .with_prompt("Move to the next object after labeling?")
        .default(true)
        .interact()
        .map_err(input_err)?;

    let mut config = AppConfig::new(pointcloud_root);
    config.data.background_pointcloud_root = optional_path(&background_root);
    config.data.out_json = optional_path(&out_json);
    config.labeling.next_on_label = next_on_label;

    config.validate()?;
    config.save(path)?;

    println!("\nConfiguration saved to {}", path.display());
    Ok(config)
}

fn optional_path(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}
