use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// File extensions recognized as point clouds (compared case-insensitively)
pub const POINT_CLOUD_EXTENSIONS: &[&str] = &["las", "laz"];

/// Whether `path` has one of the [`POINT_CLOUD_EXTENSIONS`]
#[must_use]
pub fn is_point_cloud(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            POINT_CLOUD_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Relative path with `/` separators, used as the identity of a dataset entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelPath(String);

impl RelPath {
    /// Build from a relative filesystem path.
    ///
    /// Only normal components are kept, so `./a/b.laz` and `a/b.laz` are the
    /// same identity on every platform.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let parts: Vec<String> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Self(parts.join("/"))
    }

    /// Like [`RelPath::from_path`], but `None` if a component is not valid
    /// UTF-8. Lossy conversion would let two distinct files share a key.
    #[must_use]
    pub fn try_from_path(path: &Path) -> Option<Self> {
        let parts = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_str().map(str::to_string)),
                _ => None,
            })
            .collect::<Option<Vec<String>>>()?;
        Some(Self(parts.join("/")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The containing directory, empty for top-level files
    #[must_use]
    pub fn parent(&self) -> Self {
        self.0
            .rsplit_once('/')
            .map_or_else(|| Self(String::new()), |(dir, _)| Self(dir.to_string()))
    }

    /// Last component
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Native path for joining onto a root directory
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        self.0.split('/').filter(|p| !p.is_empty()).collect()
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RelPath {
    fn from(value: &str) -> Self {
        Self::from_path(Path::new(value))
    }
}

/// One foreground object and its background, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetEntry {
    /// Path relative to the foreground root; the label-store key
    pub foreground_relative_path: RelPath,
    /// Foreground file on disk
    pub foreground_path: PathBuf,
    /// Matched background file, `None` without a background root or match
    pub background_absolute_path: Option<PathBuf>,
}

impl DatasetEntry {
    /// Directory holding the foreground file, relative to the foreground root
    #[must_use]
    pub fn group(&self) -> RelPath {
        self.foreground_relative_path.parent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_point_cloud() {
        assert!(is_point_cloud(Path::new("a/b.laz")));
        assert!(is_point_cloud(Path::new("a/b.LAS")));
        assert!(!is_point_cloud(Path::new("a/b.ply")));
        assert!(!is_point_cloud(Path::new("a/laz")));
    }

    #[test]
    fn test_relpath_normalizes() {
        let rel = RelPath::from_path(Path::new("./s1/city/01.laz"));
        assert_eq!(rel.as_str(), "s1/city/01.laz");
        assert_eq!(rel.parent().as_str(), "s1/city");
        assert_eq!(rel.file_name(), "01.laz");
        assert_eq!(rel.parent().parent().parent().as_str(), "");
    }

    #[test]
    fn test_relpath_top_level() {
        let rel = RelPath::from("01.laz");
        assert!(rel.parent().is_empty());
        assert_eq!(rel.file_name(), "01.laz");
        assert_eq!(rel.to_path_buf(), PathBuf::from("01.laz"));
    }

    #[test]
    fn test_try_from_path() {
        let rel = RelPath::try_from_path(Path::new("./s1/city/01.laz"));
        assert_eq!(rel, Some(RelPath::from("s1/city/01.laz")));
    }

    #[cfg(unix)]
    #[test]
    fn test_try_from_path_rejects_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("s1").join(OsStr::from_bytes(b"a\xff.laz"));
        assert_eq!(RelPath::try_from_path(&path), None);
    }
}
