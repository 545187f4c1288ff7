//! Error types for groupsync-project

use std::path::PathBuf;

use crate::ObjectId;

/// Result type for groupsync-project operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, editing or writing a project
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The project file uses the classic OpenStep text encoding
    #[error(
        "Unsupported project encoding: expected the JSON form of project.pbxproj \
         (convert with `plutil -convert json`)"
    )]
    UnsupportedEncoding,

    /// Loading the project file at `path` failed
    #[error("Failed to load project at {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// A referenced object is not in the object table
    #[error("Missing object {id}")]
    MissingObject { id: ObjectId },

    /// An object has an `isa` we know but fields we cannot decode
    #[error("Invalid {isa} object {id}: {message}")]
    InvalidObject {
        id: ObjectId,
        isa: String,
        message: String,
    },

    /// The object exists but is not a `PBXGroup`
    #[error("Object {id} is not a group")]
    NotAGroup { id: ObjectId },

    /// The object exists but is not a `PBXSourcesBuildPhase`
    #[error("Object {id} is not a sources build phase")]
    NotABuildPhase { id: ObjectId },

    /// The group's location cannot be expressed as a filesystem path
    #[error("Cannot resolve filesystem path of {id}")]
    UnresolvablePath { id: ObjectId },

    /// A file that should be added to a group does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Filesystem error from groupsync-fs
    #[error(transparent)]
    Fs(#[from] groupsync_fs::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
