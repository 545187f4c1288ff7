//! Error types for groupsync-core

/// Result type for groupsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synchronizing a group.
///
/// Every variant aborts the run before the project file is written.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No native target carries the configured name
    #[error("Target '{name}' not found in project")]
    InvalidTargetName { name: String },

    /// The target has no sources build phase
    #[error("Target '{target}' has no sources build phase")]
    InvalidBuildPhase { target: String },

    /// The sources build phase has no files list
    #[error("Sources build phase of target '{target}' has no files")]
    InvalidSourceFiles { target: String },

    /// No group resolves to the configured group path
    #[error("Group not found at {path}")]
    GroupNotFound { path: String },

    /// A file to add cannot be located under the source root
    #[error("Cannot resolve file path for {path}")]
    InvalidFilePath { path: String },

    /// The folder the project file is derived from has no name
    #[error("Unable to find root folder in {path}")]
    UnableToFindRootFolder { path: String },

    /// The filename pattern is not a valid regular expression
    #[error("Invalid filename pattern '{pattern}': {source}")]
    InvalidFilenamePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A build-phase addition has no record in the project
    #[error("File {path} has no project record to compile")]
    UnregisteredFile { path: String },

    // Transparent wrappers for underlying crate errors
    /// Project model error from groupsync-project
    #[error(transparent)]
    Project(#[from] groupsync_project::Error),

    /// Filesystem error from groupsync-fs
    #[error(transparent)]
    Fs(#[from] groupsync_fs::Error),
}
