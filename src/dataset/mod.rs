//! Dataset resolution
//!
//! Builds the ordered list of foreground objects to label and pairs each
//! one with the background scan it was extracted from. The directory
//! convention is:
//!
//! ```text
//! background_root/s1/city.laz
//! foreground_root/s1/city/01.laz   ─┐
//! foreground_root/s1/city/02.laz   ─┴─ background: background_root/s1/city.laz
//! ```
//!
//! The foreground tree mirrors the background tree plus one directory per
//! object group, named after the background file's stem.

mod error;
mod index;
mod types;

pub use error::{DatasetError, Result};
pub use index::DatasetIndex;
pub use types::{DatasetEntry, POINT_CLOUD_EXTENSIONS, RelPath, is_point_cloud};
