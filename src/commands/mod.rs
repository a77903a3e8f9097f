//! Command implementations
//!
//! Each command is a module with an `execute` function that takes the loaded
//! configuration and parsed CLI args and reports through an `OutputWriter`.

pub mod init;
pub mod label;
pub mod pairs;
pub mod status;

pub use init::execute as init;
pub use label::execute as label;
pub use pairs::execute as pairs;
pub use status::execute as status;

use crate::config::AppConfig;
use crate::dataset::DatasetIndex;
use crate::ui::OutputWriter;

/// Build the dataset described by `config` and print its pairing warnings
fn build_dataset(config: &AppConfig, output: &dyn OutputWriter) -> crate::Result<DatasetIndex> {
    let dataset = DatasetIndex::build(
        &config.data.pointcloud_root,
        config.data.background_pointcloud_root.as_deref(),
    )?;

    for warning in dataset.warnings() {
        output.warning(&warning.to_string());
    }
    Ok(dataset)
}
