//! Discovery and background pairing of foreground point clouds

use super::error::{DatasetError, Result};
use super::types::{DatasetEntry, RelPath, is_point_cloud};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Ordered, immutable list of dataset entries.
///
/// Entries are sorted by `(object group, file name)` so that every object
/// group occupies one contiguous run and the order is stable across runs on
/// an unchanged filesystem. This is not plain path order: files directly in
/// `s/` come before everything in `s/b/`.
#[derive(Debug)]
pub struct DatasetIndex {
    foreground_root: PathBuf,
    background_root: Option<PathBuf>,
    entries: Vec<DatasetEntry>,
    /// `(1-based position inside group, group length)` per entry
    group_positions: Vec<(usize, usize)>,
    warnings: Vec<DatasetError>,
}

impl DatasetIndex {
    /// Walk `foreground_root` and pair every point cloud with its background.
    ///
    /// For `fg/<chain>/<group>/<object>.laz` the background is the single
    /// point cloud directly in `bg/<chain>/` whose stem is `<group>`. Groups
    /// with zero or several candidates are recorded in [`warnings`] and their
    /// entries get no background.
    ///
    /// [`warnings`]: DatasetIndex::warnings
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::RootNotFound` if `foreground_root` is not a
    /// directory and `DatasetError::Empty` if it holds no point clouds.
    pub fn build(foreground_root: &Path, background_root: Option<&Path>) -> Result<Self> {
        if !foreground_root.is_dir() {
            return Err(DatasetError::RootNotFound {
                root: foreground_root.to_path_buf(),
            });
        }

        let mut discovered = discover(foreground_root);
        discovered.sort_by(|(a, _), (b, _)| {
            (a.parent(), a.file_name()).cmp(&(b.parent(), b.file_name()))
        });

        let mut warnings = Vec::new();
        let entries: Vec<DatasetEntry> = match background_root {
            None => discovered
                .into_iter()
                .map(|(rel, path)| DatasetEntry {
                    foreground_path: path,
                    foreground_relative_path: rel,
                    background_absolute_path: None,
                })
                .collect(),
            Some(bg_root) => {
                let mut matcher = BackgroundMatcher::new(bg_root);
                discovered
                    .into_iter()
                    .map(|(rel, path)| {
                        let background = matcher.resolve(&rel, &mut warnings);
                        DatasetEntry {
                            foreground_path: path,
                            foreground_relative_path: rel,
                            background_absolute_path: background,
                        }
                    })
                    .collect()
            }
        };

        for warning in &warnings {
            tracing::warn!("{warning}");
        }

        let index = Self::from_entries(
            foreground_root.to_path_buf(),
            background_root.map(Path::to_path_buf),
            entries,
        )?;

        tracing::info!(
            root = %foreground_root.display(),
            entries = index.len(),
            warnings = warnings.len(),
            "built dataset index"
        );

        Ok(Self { warnings, ..index })
    }

    /// Wrap an already ordered entry list.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Empty` if `entries` is empty.
    pub fn from_entries(
        foreground_root: PathBuf,
        background_root: Option<PathBuf>,
        entries: Vec<DatasetEntry>,
    ) -> Result<Self> {
        if entries.is_empty() {
            return Err(DatasetError::Empty {
                root: foreground_root,
            });
        }

        let group_positions = group_positions(&entries);
        Ok(Self {
            foreground_root,
            background_root,
            entries,
            group_positions,
            warnings: Vec::new(),
        })
    }

    #[must_use]
    pub fn entries(&self) -> &[DatasetEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DatasetEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for an index that was successfully built
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Relative foreground paths in dataset order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|e| e.foreground_relative_path.as_str())
    }

    /// `(1-based position inside its object group, group length)`
    #[must_use]
    pub fn group_position(&self, index: usize) -> Option<(usize, usize)> {
        self.group_positions.get(index).copied()
    }

    /// Non-fatal pairing problems found while building
    #[must_use]
    pub fn warnings(&self) -> &[DatasetError] {
        &self.warnings
    }

    #[must_use]
    pub fn foreground_root(&self) -> &Path {
        &self.foreground_root
    }

    #[must_use]
    pub fn background_root(&self) -> Option<&Path> {
        self.background_root.as_deref()
    }
}

/// Point clouds below `root` with their relative identity.
///
/// Files whose relative path is not valid UTF-8 are skipped with a warning.
fn discover(root: &Path) -> Vec<(RelPath, PathBuf)> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("skipping unreadable path during discovery: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_point_cloud(entry.path()))
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(root).ok()?;
            match RelPath::try_from_path(relative) {
                Some(rel) => Some((rel, entry.into_path())),
                None => {
                    tracing::warn!(
                        path = %entry.path().display(),
                        "skipping file with a non UTF-8 name"
                    );
                    None
                }
            }
        })
        .collect()
}

fn group_positions(entries: &[DatasetEntry]) -> Vec<(usize, usize)> {
    let mut positions = Vec::with_capacity(entries.len());
    let mut start = 0;
    while start < entries.len() {
        let group = entries[start].group();
        let len = entries[start..]
            .iter()
            .take_while(|e| e.group() == group)
            .count();
        positions.extend((1..=len).map(|pos| (pos, len)));
        start += len;
    }
    positions
}

/// Resolves backgrounds once per object group
struct BackgroundMatcher<'a> {
    root: &'a Path,
    resolved: HashMap<RelPath, Option<PathBuf>>,
}

impl<'a> BackgroundMatcher<'a> {
    fn new(root: &'a Path) -> Self {
        Self {
            root,
            resolved: HashMap::new(),
        }
    }

    fn resolve(&mut self, foreground: &RelPath, warnings: &mut Vec<DatasetError>) -> Option<PathBuf> {
        let group_dir = foreground.parent();
        if group_dir.is_empty() {
            warnings.push(DatasetError::NoObjectGroup {
                path: foreground.to_string(),
            });
            return None;
        }

        if let Some(cached) = self.resolved.get(&group_dir) {
            return cached.clone();
        }

        let group = group_dir.file_name().to_string();
        let directory = self.root.join(group_dir.parent().to_path_buf());
        let candidates = candidates(&directory, &group);

        let background = if candidates.len() == 1 {
            candidates.first().cloned()
        } else {
            warnings.push(DatasetError::BackgroundMatch {
                group,
                directory,
                candidates,
            });
            None
        };

        self.resolved.insert(group_dir, background.clone());
        background
    }
}

/// Point clouds directly inside `directory` whose stem equals `group`
fn candidates(directory: &Path, group: &str) -> Vec<PathBuf> {
    let Ok(read_dir) = fs::read_dir(directory) else {
        return Vec::new();
    };

    let mut found: Vec<PathBuf> = read_dir
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_point_cloud(path))
        .filter(|path| path.file_stem().is_some_and(|stem| stem == group))
        .collect();
    found.sort();
    found
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod index_tests;
