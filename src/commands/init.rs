//! Init command - interactive configuration

use crate::PointlabelError;
use crate::config::first_time_setup;
use crate::ui::OutputWriter;
use std::path::Path;

/// Execute the init command
///
/// # Errors
///
/// Returns `PointlabelError::InvalidInput` if `path` exists and `force` is
/// not set, or `PointlabelError::Config` if setup fails.
pub fn execute(path: &Path, force: bool, output: &dyn OutputWriter) -> crate::Result<()> {
    if path.exists() && !force {
        return Err(PointlabelError::InvalidInput(format!(
            "{} already exists; use --force to overwrite it",
            path.display()
        )));
    }

    let config = first_time_setup(path)?;
    output.success(&format!(
        "Run `pointlabel` to start labeling {}",
        config.data.pointcloud_root.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::StdoutWriter;
    use tempfile::TempDir;

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[data]\npointcloud_root = \"/fg\"\n").unwrap();

        let result = execute(&path, false, &StdoutWriter::quiet());
        assert!(matches!(result, Err(PointlabelError::InvalidInput(_))));
    }
}
