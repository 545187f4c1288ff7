//! Xcode project object graph
//!
//! Reads and writes `project.pbxproj` in its JSON property-list form and
//! exposes the handful of records the group sync touches:
//!
//! - **Groups** (`PBXGroup`) and their ordered children
//! - **File references** (`PBXFileReference`)
//! - **Native targets** and their **sources build phase**
//! - **Build files** linking a file reference into a build phase
//!
//! Every record lives in one arena keyed by [`ObjectId`]. Parent links are
//! kept in a separate index rather than inside the records, so the graph has
//! no ownership cycles.
//!
//! ```text
//! PBXProject ── mainGroup ──> PBXGroup ── children ──> PBXGroup / PBXFileReference
//!      │
//!      └── targets ──> PBXNativeTarget ── buildPhases ──> PBXSourcesBuildPhase
//!                                                              │
//!                                                  files ──> PBXBuildFile ── fileRef ──┘
//! ```

pub mod error;
pub mod file_type;
pub mod id;
pub mod object;
pub mod project;

pub use error::{Error, Result};
pub use file_type::last_known_file_type;
pub use id::ObjectId;
pub use object::{
    BuildFile, FileReference, Group, NativeTarget, Object, ProjectObject, SourceTree,
    SourcesBuildPhase,
};
pub use project::Project;
