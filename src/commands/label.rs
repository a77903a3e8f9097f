//! Label command - the interactive labeling session

use super::build_dataset;
use crate::cli::LabelArgs;
use crate::config::{self, AppConfig};
use crate::keybinds::help;
use crate::labels::{LabelStore, Reconciliation};
use crate::session::{DEFAULT_OUTPUT, Session, SessionOptions};
use crate::ui::{OutputWriter, Viewer, ViewerState};

/// Execute the label command
///
/// Configuration and dataset problems are reported before the terminal view
/// opens. After the view closes, labels are written to the output file even
/// if the view failed.
///
/// # Errors
///
/// Returns `PointlabelError` for invalid key bindings, an empty or missing
/// dataset, a corrupt input label file, a terminal failure, or a failed
/// final save.
pub fn execute(config: &AppConfig, args: &LabelArgs, output: &dyn OutputWriter) -> crate::Result<()> {
    let mut config = config.clone();
    args.apply(&mut config);
    let resume = args.resume(&config);

    let keys = config.key_bindings()?;
    let projection = config.projection()?;
    let dataset = build_dataset(&config, output)?;

    let loaded = LabelStore::load(config.data.in_json.as_deref())?;
    let Reconciliation { store, dropped } = LabelStore::reconcile(loaded, dataset.keys());
    if !dropped.is_empty() {
        output.warning(&format!(
            "{} labeled entries are not part of the dataset and were dropped",
            dropped.len()
        ));
    }

    let options = SessionOptions {
        next_on_label: config.labeling.next_on_label,
        autosave_path: config::autosave_path(),
    };
    output.info(&format!("Autosaving to {}", options.autosave_path.display()));

    let mut session = Session::initialize(&dataset, &keys, store, options, resume);
    output.info(&format!(
        "{} objects, {} labeled, starting at #{}",
        session.len(),
        session.labels().labeled_count(),
        session.cursor() + 1
    ));

    output.info(&format!("Classes: {}", help::class_guide(&keys).join(", ")));

    let out_json = config.data.out_json.clone();
    let mut state = ViewerState::new(out_json.clone(), projection);
    let viewer = Viewer::new(config.viewer_style());
    let viewed = viewer.run(&mut session, &mut state);

    let persisted = session.persist(out_json.as_deref());
    match &persisted {
        Ok(path) if out_json.is_none() => output.warning(&format!(
            "No out_json configured; labels written to {} (default {DEFAULT_OUTPUT})",
            path.display()
        )),
        Ok(path) => output.success(&format!(
            "Saved {} labels to {}",
            session.labels().labeled_count(),
            path.display()
        )),
        Err(e) => output.error(&format!(
            "Final save failed ({e}); the last autosave is kept at {}",
            session.options().autosave_path.display()
        )),
    }

    viewed?;
    persisted?;
    Ok(())
}
