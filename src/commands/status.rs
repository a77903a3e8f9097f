//! Status command - labeling progress of a label file

use super::build_dataset;
use crate::config::AppConfig;
use crate::labels::{LabelStore, Reconciliation};
use crate::session::DEFAULT_OUTPUT;
use crate::ui::OutputWriter;
use std::path::{Path, PathBuf};

/// Counts reported by the status command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub total: usize,
    pub labeled: usize,
    /// Entries in the file that are not in the dataset
    pub dropped: usize,
    /// `(label, count)`, most frequent first
    pub histogram: Vec<(String, usize)>,
}

impl StatusReport {
    #[must_use]
    pub fn from_reconciliation(reconciliation: &Reconciliation) -> Self {
        let store = &reconciliation.store;
        let mut histogram: Vec<(String, usize)> = store
            .histogram()
            .into_iter()
            .map(|(token, count)| (token.to_string(), count))
            .collect();
        histogram.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            total: store.len(),
            labeled: store.labeled_count(),
            dropped: reconciliation.dropped.len(),
            histogram,
        }
    }

    #[must_use]
    pub const fn unlabeled(&self) -> usize {
        self.total - self.labeled
    }
}

/// Label file used when none is given: `out_json`, then `in_json`, then the default
#[must_use]
pub fn default_label_file(config: &AppConfig) -> PathBuf {
    config
        .data
        .out_json
        .clone()
        .or_else(|| config.data.in_json.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
}

/// Execute the status command
///
/// # Errors
///
/// Returns `PointlabelError` if the dataset cannot be built or the label
/// file is malformed.
pub fn execute(config: &AppConfig, path: Option<&Path>, output: &dyn OutputWriter) -> crate::Result<()> {
    let path = path.map_or_else(|| default_label_file(config), Path::to_path_buf);
    let dataset = build_dataset(config, output)?;

    let loaded = LabelStore::load(Some(&path))?;
    let report = StatusReport::from_reconciliation(&LabelStore::reconcile(loaded, dataset.keys()));

    output.write(&format!("{}", path.display()));
    output.write(&format!("  total      {}", report.total));
    output.write(&format!("  labeled    {}", report.labeled));
    output.write(&format!("  unlabeled  {}", report.unlabeled()));
    if report.dropped > 0 {
        output.warning(&format!(
            "{} entries in the file are not part of the dataset",
            report.dropped
        ));
    }
    for (label, count) in &report.histogram {
        output.write(&format!("  {label:<12} {count}"));
    }
    Ok(())
}
