//! In-memory label record with JSON load and atomic save

use super::error::{LabelError, Result};
use super::types::{LabelToken, LabelValue, UNLABELED};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Labels parsed from a label file, keyed by relative foreground path
pub type LabelMap = BTreeMap<String, LabelValue>;

/// Result of matching a loaded label file against the current dataset
#[derive(Debug)]
pub struct Reconciliation {
    /// Store holding exactly one value per dataset entry
    pub store: LabelStore,
    /// Keys from the file with no matching dataset entry
    pub dropped: Vec<String>,
}

/// Owner of the label record for one labeling session.
///
/// Every key of the store is a relative foreground path of the dataset; the
/// key set is fixed by [`LabelStore::reconcile`] and only values change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelStore {
    labels: LabelMap,
}

impl LabelStore {
    /// Parse a label file.
    ///
    /// `None` or a path that does not exist yields an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::Read` if the file exists but cannot be read, and
    /// `LabelError::FileFormat` if its content is not a flat JSON object whose
    /// values are strings, integers or `null`.
    pub fn load(path: Option<&Path>) -> Result<LabelMap> {
        let Some(path) = path else {
            return Ok(LabelMap::new());
        };

        if !path.exists() {
            tracing::warn!(path = %path.display(), "label file does not exist, starting without labels");
            return Ok(LabelMap::new());
        }

        let content = fs::read_to_string(path).map_err(|source| LabelError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let labels: LabelMap =
            serde_json::from_str(&content).map_err(|e| LabelError::FileFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        tracing::info!(path = %path.display(), count = labels.len(), "loaded label file");
        Ok(labels)
    }

    /// Build the session's store from a loaded mapping and the dataset keys.
    ///
    /// Keys missing from `loaded` start out unlabeled. Loaded keys that are
    /// not part of the dataset are dropped and reported.
    pub fn reconcile<'a, I>(mut loaded: LabelMap, dataset_keys: I) -> Reconciliation
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut labels = LabelMap::new();
        for key in dataset_keys {
            let value = loaded.remove(key).unwrap_or_default();
            labels.insert(key.to_string(), value);
        }

        let dropped: Vec<String> = loaded.into_keys().collect();
        for key in &dropped {
            tracing::warn!(entry = %key, "dropping label for a file that is no longer in the dataset");
        }

        Reconciliation {
            store: Self { labels },
            dropped,
        }
    }

    /// Label value of an entry
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LabelValue> {
        self.labels.get(key)
    }

    /// Assign a label to an existing entry.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::ReservedSentinel` if `token` is the unlabeled
    /// sentinel and `LabelError::UnknownEntry` if `key` is not in the store.
    pub fn set(&mut self, key: &str, token: LabelToken) -> Result<()> {
        if token.is_reserved() {
            return Err(LabelError::ReservedSentinel(UNLABELED));
        }
        let slot = self
            .labels
            .get_mut(key)
            .ok_or_else(|| LabelError::UnknownEntry(key.to_string()))?;
        *slot = LabelValue::Labeled(token);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of entries holding a real label
    #[must_use]
    pub fn labeled_count(&self) -> usize {
        self.labels.values().filter(|v| !v.is_unlabeled()).count()
    }

    /// Iterate over `(key, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelValue)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Count entries per label token; unlabeled entries are not included.
    #[must_use]
    pub fn histogram(&self) -> BTreeMap<LabelToken, usize> {
        let mut counts = BTreeMap::new();
        for token in self.labels.values().filter_map(LabelValue::token) {
            *counts.entry(token.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Write the full record as a flat JSON object.
    ///
    /// The data goes to a temporary file next to `path` which is then renamed
    /// over it, so an interrupted write leaves any previous file intact.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::Persistence` if any step of the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.write_atomically(path)
            .map_err(|source| LabelError::Persistence {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Save to the fixed autosave location.
    ///
    /// # Errors
    ///
    /// Same as [`LabelStore::save`].
    pub fn autosave(&self, tmp_path: &Path) -> Result<()> {
        self.save(tmp_path)?;
        tracing::debug!(path = %tmp_path.display(), "autosaved labels");
        Ok(())
    }

    fn write_atomically(&self, path: &Path) -> io::Result<()> {
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let mut tmp = NamedTempFile::new_in(&parent)?;
        serde_json::to_writer_pretty(&mut tmp, &self.labels)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
