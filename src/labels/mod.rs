//! Label record for a labeling session
//!
//! Labels are keyed by the POSIX-style path of each foreground file relative
//! to the foreground root. On disk they are a flat JSON object:
//!
//! ```json
//! {
//!   "s1/city/01.laz": "bad",
//!   "s1/city/02.laz": 3,
//!   "s1/town/01.laz": -100
//! }
//! ```
//!
//! `-100` (or a missing key, or `null`) means the entry has not been labeled.

mod error;
mod store;
mod types;

pub use error::{LabelError, Result};
pub use store::{LabelMap, LabelStore, Reconciliation};
pub use types::{LabelToken, LabelValue, UNLABELED};
