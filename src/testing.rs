//! Testing utilities for pointlabel
//!
//! Provides `DatasetFixture`, a temporary foreground/background tree of
//! empty point-cloud files, plus a few helpers for building sessions.
//!
//! Only available when compiled with `cfg(test)`.

use crate::dataset::DatasetIndex;
use crate::keybinds::KeyBindingTable;
use crate::labels::{LabelMap, LabelStore, LabelToken};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary dataset directory that is removed on drop
///
/// # Examples
/// ```ignore
/// let fixture = DatasetFixture::new();
/// fixture.add_background("s1/city.laz");
/// fixture.add_foreground("s1/city/01.laz");
/// let index = fixture.index_with_background();
/// ```
pub struct DatasetFixture {
    dir: TempDir,
}

impl DatasetFixture {
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create fixture directory");
        fs::create_dir_all(dir.path().join("fg")).expect("Failed to create foreground root");
        fs::create_dir_all(dir.path().join("bg")).expect("Failed to create background root");
        Self { dir }
    }

    /// Fixture with `count` foreground files under `scene/group/`
    pub fn with_objects(count: usize) -> Self {
        let fixture = Self::new();
        for i in 0..count {
            fixture.add_foreground(&format!("scene/group/{i:02}.laz"));
        }
        fixture
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn foreground_root(&self) -> PathBuf {
        self.dir.path().join("fg")
    }

    #[must_use]
    pub fn background_root(&self) -> PathBuf {
        self.dir.path().join("bg")
    }

    /// Create an empty file below the foreground root
    pub fn add_foreground(&self, rel: &str) -> PathBuf {
        touch(&self.foreground_root().join(rel))
    }

    /// Create an empty file below the background root
    pub fn add_background(&self, rel: &str) -> PathBuf {
        touch(&self.background_root().join(rel))
    }

    /// # Panics
    /// Panics if the index cannot be built.
    pub fn index(&self) -> DatasetIndex {
        DatasetIndex::build(&self.foreground_root(), None).expect("Failed to build index")
    }

    /// # Panics
    /// Panics if the index cannot be built.
    pub fn index_with_background(&self) -> DatasetIndex {
        DatasetIndex::build(&self.foreground_root(), Some(&self.background_root()))
            .expect("Failed to build index")
    }
}

impl Default for DatasetFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create an empty file, including parent directories
///
/// # Panics
/// Panics if the file cannot be created.
pub fn touch(path: &Path) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, b"").expect("Failed to create file");
    path.to_path_buf()
}

/// Key table from `(key, label)` string pairs
///
/// # Panics
/// Panics if the mapping is invalid.
pub fn keymap(pairs: &[(&str, &str)]) -> KeyBindingTable {
    let mapping: BTreeMap<String, LabelToken> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), LabelToken::from(*v)))
        .collect();
    KeyBindingTable::build(&mapping).expect("Failed to build key table")
}

/// Store with every entry of `index` unlabeled
pub fn empty_store(index: &DatasetIndex) -> LabelStore {
    LabelStore::reconcile(LabelMap::new(), index.keys()).store
}

/// Minimal LAS public header for version `1.minor`
///
/// Scale is 0.01 on every axis; offsets are zero.
pub fn las_header_bytes(minor: u8, point_count: u32, min: [f64; 3], max: [f64; 3]) -> Vec<u8> {
    let len: usize = match minor {
        0..=2 => 227,
        3 => 235,
        _ => 375,
    };
    let mut bytes = vec![0u8; len];
    bytes[..4].copy_from_slice(b"LASF");
    bytes[24] = 1;
    bytes[25] = minor;
    bytes[94..96].copy_from_slice(&(len as u16).to_le_bytes());
    bytes[96..100].copy_from_slice(&(len as u32).to_le_bytes());
    bytes[107..111].copy_from_slice(&point_count.to_le_bytes());
    for axis in 0..3 {
        let at = 131 + axis * 8;
        bytes[at..at + 8].copy_from_slice(&0.01f64.to_le_bytes());
        let at = 179 + axis * 16;
        bytes[at..at + 8].copy_from_slice(&max[axis].to_le_bytes());
        bytes[at + 8..at + 16].copy_from_slice(&min[axis].to_le_bytes());
    }
    bytes
}

/// Write a header-only LAS file with the given bounds
///
/// # Panics
/// Panics if the file cannot be written.
pub fn write_las(path: &Path, min: [f64; 3], max: [f64; 3]) -> PathBuf {
    touch(path);
    fs::write(path, las_header_bytes(2, 1, min, max)).expect("Failed to write LAS header");
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let fixture = DatasetFixture::new();
        let fg = fixture.add_foreground("a/b/c.laz");
        assert!(fg.is_file());
        assert!(fg.starts_with(fixture.foreground_root()));
    }

    #[test]
    fn test_fixture_cleanup() {
        let path = {
            let fixture = DatasetFixture::with_objects(2);
            fixture.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
