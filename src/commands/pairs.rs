//! Pairs command - dry run of background matching

use super::build_dataset;
use crate::config::AppConfig;
use crate::dataset::DatasetEntry;
use crate::ui::OutputWriter;

/// Execute the pairs command
///
/// # Errors
///
/// Returns `PointlabelError::Dataset` if the dataset cannot be built.
pub fn execute(config: &AppConfig, warnings_only: bool, output: &dyn OutputWriter) -> crate::Result<()> {
    let dataset = build_dataset(config, output)?;

    let expects_background = config.data.background_pointcloud_root.is_some();
    let mut paired = 0;
    for entry in dataset.entries() {
        let has_background = entry.background_absolute_path.is_some();
        if has_background {
            paired += 1;
        }
        if !warnings_only || (expects_background && !has_background) {
            output.write(&describe(entry));
        }
    }

    output.info(&format!(
        "{} objects, {paired} with background, {} warnings",
        dataset.len(),
        dataset.warnings().len()
    ));
    Ok(())
}

fn describe(entry: &DatasetEntry) -> String {
    let background = entry
        .background_absolute_path
        .as_ref()
        .map_or_else(|| "(none)".to_string(), |path| path.display().to_string());
    format!("{} -> {background}", entry.foreground_relative_path)
}
