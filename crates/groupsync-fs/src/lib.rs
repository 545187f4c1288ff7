//! Filesystem access for Xcode Group Sync
//!
//! Provides normalized path handling, source directory enumeration and
//! atomic writes for the project file.

pub mod error;
pub mod io;
pub mod listing;
pub mod path;

pub use error::{Error, Result};
pub use listing::list_files;
pub use path::NormalizedPath;
