//! LAS/LAZ public header reader
//!
//! Only the fixed-size public header is read. It is stored uncompressed in
//! both `.las` and `.laz` files, so point count and bounds are available
//! without decoding any points.

mod error;

pub use error::{PointCloudError, Result};

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Size of the LAS 1.0 - 1.2 public header
const MIN_HEADER_LEN: usize = 227;
/// Size of the LAS 1.4 public header
const MAX_HEADER_LEN: usize = 375;

const SIGNATURE: &[u8; 4] = b"LASF";

const VERSION_MAJOR: usize = 24;
const VERSION_MINOR: usize = 25;
const POINT_FORMAT: usize = 104;
const LEGACY_POINT_COUNT: usize = 107;
const SCALE: usize = 131;
const OFFSET: usize = 155;
const BOUNDS: usize = 179;
const POINT_COUNT_14: usize = 247;

/// Summary of a point-cloud file
#[derive(Debug, Clone, PartialEq)]
pub struct LasHeader {
    pub version_major: u8,
    pub version_minor: u8,
    /// Point data record format with the compression bits cleared
    pub point_format: u8,
    /// Set by LASzip on compressed files
    pub compressed: bool,
    pub point_count: u64,
    pub scale: [f64; 3],
    pub offset: [f64; 3],
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl LasHeader {
    /// Read the public header of the file at `path`
    ///
    /// # Errors
    ///
    /// Returns `PointCloudError` if the file cannot be read, lacks the
    /// `LASF` signature, or is shorter than a public header.
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| PointCloudError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut bytes = Vec::with_capacity(MAX_HEADER_LEN);
        file.take(MAX_HEADER_LEN as u64)
            .read_to_end(&mut bytes)
            .map_err(|source| PointCloudError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Self::parse(&bytes).map_err(|e| e.at(path))
    }

    /// Parse a header from its raw bytes
    ///
    /// # Errors
    ///
    /// Same as [`Self::read`], with an empty path.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SIGNATURE.len() || &bytes[..SIGNATURE.len()] != SIGNATURE {
            return Err(PointCloudError::NotLas {
                path: Default::default(),
            });
        }
        if bytes.len() < MIN_HEADER_LEN {
            return Err(truncated(bytes.len()));
        }

        let version_major = bytes[VERSION_MAJOR];
        let version_minor = bytes[VERSION_MINOR];
        if version_major != 1 || version_minor > 4 {
            return Err(PointCloudError::UnsupportedVersion {
                path: Default::default(),
                major: version_major,
                minor: version_minor,
            });
        }

        let format_byte = bytes[POINT_FORMAT];
        let legacy_count = u64::from(read_u32(bytes, LEGACY_POINT_COUNT)?);
        let point_count = if version_minor >= 4 && legacy_count == 0 {
            read_u64(bytes, POINT_COUNT_14)?
        } else {
            legacy_count
        };

        let scale = read_xyz(bytes, SCALE)?;
        let offset = read_xyz(bytes, OFFSET)?;

        // Bounds are stored as max x, min x, max y, min y, max z, min z
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        for axis in 0..3 {
            max[axis] = read_f64(bytes, BOUNDS + axis * 16)?;
            min[axis] = read_f64(bytes, BOUNDS + axis * 16 + 8)?;
        }

        Ok(Self {
            version_major,
            version_minor,
            point_format: format_byte & 0x3F,
            compressed: format_byte & 0xC0 != 0,
            point_count,
            scale,
            offset,
            min,
            max,
        })
    }

    /// Centre of the bounding box
    #[must_use]
    pub fn center(&self) -> [f64; 3] {
        [0, 1, 2].map(|axis| (self.min[axis] + self.max[axis]) / 2.0)
    }

    /// Horizontal centre, used for the map lookup
    #[must_use]
    pub fn center_xy(&self) -> (f64, f64) {
        let [x, y, _] = self.center();
        (x, y)
    }

    /// Size of the bounding box along each axis
    #[must_use]
    pub fn extent(&self) -> [f64; 3] {
        [0, 1, 2].map(|axis| self.max[axis] - self.min[axis])
    }
}

impl fmt::Display for LasHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [dx, dy, dz] = self.extent();
        write!(
            f,
            "LAS {}.{}{} | {} points | {dx:.1} x {dy:.1} x {dz:.1} m",
            self.version_major,
            self.version_minor,
            if self.compressed { " (compressed)" } else { "" },
            self.point_count,
        )
    }
}

impl PointCloudError {
    fn at(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            Self::Read { source, .. } => Self::Read { path, source },
            Self::NotLas { .. } => Self::NotLas { path },
            Self::Truncated { len, .. } => Self::Truncated { path, len },
            Self::UnsupportedVersion { major, minor, .. } => {
                Self::UnsupportedVersion { path, major, minor }
            }
        }
    }
}

fn truncated(len: usize) -> PointCloudError {
    PointCloudError::Truncated {
        path: Default::default(),
        len,
    }
}

fn field<const N: usize>(bytes: &[u8], at: usize) -> Result<[u8; N]> {
    bytes
        .get(at..at + N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| truncated(bytes.len()))
}

fn read_u32(bytes: &[u8], at: usize) -> Result<u32> {
    field(bytes, at).map(u32::from_le_bytes)
}

fn read_u64(bytes: &[u8], at: usize) -> Result<u64> {
    field(bytes, at).map(u64::from_le_bytes)
}

fn read_f64(bytes: &[u8], at: usize) -> Result<f64> {
    field(bytes, at).map(f64::from_le_bytes)
}

fn read_xyz(bytes: &[u8], at: usize) -> Result<[f64; 3]> {
    Ok([
        read_f64(bytes, at)?,
        read_f64(bytes, at + 8)?,
        read_f64(bytes, at + 16)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{las_header_bytes, touch};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_legacy_header() {
        let bytes = las_header_bytes(2, 1234, [10.0, 20.0, 0.0], [30.0, 60.0, 5.0]);
        let header = LasHeader::parse(&bytes).unwrap();

        assert_eq!((header.version_major, header.version_minor), (1, 2));
        assert_eq!(header.point_count, 1234);
        assert_eq!(header.min, [10.0, 20.0, 0.0]);
        assert_eq!(header.max, [30.0, 60.0, 5.0]);
        assert_eq!(header.center_xy(), (20.0, 40.0));
        assert_eq!(header.extent(), [20.0, 40.0, 5.0]);
        assert_eq!(header.scale, [0.01, 0.01, 0.01]);
        assert!(!header.compressed);
    }

    #[test]
    fn test_parse_las_14_point_count() {
        let mut bytes = las_header_bytes(4, 0, [0.0; 3], [1.0; 3]);
        bytes[POINT_COUNT_14..POINT_COUNT_14 + 8].copy_from_slice(&5_000_000_000u64.to_le_bytes());

        let header = LasHeader::parse(&bytes).unwrap();
        assert_eq!(header.point_count, 5_000_000_000);
    }

    #[test]
    fn test_compressed_flag() {
        let mut bytes = las_header_bytes(2, 1, [0.0; 3], [1.0; 3]);
        bytes[POINT_FORMAT] = 0x80 | 3;

        let header = LasHeader::parse(&bytes).unwrap();
        assert!(header.compressed);
        assert_eq!(header.point_format, 3);
    }

    #[test]
    fn test_rejects_other_files() {
        assert!(matches!(
            LasHeader::parse(b"PLY format"),
            Err(PointCloudError::NotLas { .. })
        ));
        assert!(matches!(
            LasHeader::parse(b"LASF\0\0"),
            Err(PointCloudError::Truncated { len: 6, .. })
        ));

        let mut bytes = las_header_bytes(2, 1, [0.0; 3], [1.0; 3]);
        bytes[VERSION_MAJOR] = 2;
        assert!(matches!(
            LasHeader::parse(&bytes),
            Err(PointCloudError::UnsupportedVersion { major: 2, .. })
        ));
    }

    #[test]
    fn test_read_reports_path() {
        let dir = TempDir::new().unwrap();
        let empty = touch(&dir.path().join("empty.laz"));

        match LasHeader::read(&empty) {
            Err(PointCloudError::NotLas { path }) => assert_eq!(path, empty),
            other => panic!("unexpected result: {other:?}"),
        }

        let missing = dir.path().join("missing.laz");
        assert!(matches!(
            LasHeader::read(&missing),
            Err(PointCloudError::Read { .. })
        ));
    }

    #[test]
    fn test_read_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tree.laz");
        let mut bytes = las_header_bytes(2, 42, [1.0, 2.0, 3.0], [3.0, 4.0, 5.0]);
        bytes.extend_from_slice(&[0xAB; 64]);
        fs::write(&path, bytes).unwrap();

        let header = LasHeader::read(&path).unwrap();
        assert_eq!(header.point_count, 42);
        assert_eq!(header.center(), [2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_display_summary() {
        let bytes = las_header_bytes(2, 7, [0.0; 3], [10.0, 5.0, 2.0]);
        let header = LasHeader::parse(&bytes).unwrap();
        assert_eq!(header.to_string(), "LAS 1.2 | 7 points | 10.0 x 5.0 x 2.0 m");
    }
}
