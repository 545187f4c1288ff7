//! Run configuration and the paths derived from it

use groupsync_fs::NormalizedPath;

use crate::{Error, Result};

/// Name of the manifest inside an `.xcodeproj` bundle.
pub const PROJECT_FILE_NAME: &str = "project.pbxproj";

/// Default extension of the files enumerated in the source folder.
pub const DEFAULT_FILE_EXTENSION: &str = "swift";

/// Everything one synchronization run needs to know.
///
/// `group_path`, `path_to_xcodeproj` and `path_to_files` are joined onto
/// their base as written, so a leading slash does not make them absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub src_root: NormalizedPath,
    pub group_path: String,
    pub target_name: String,
    /// Empty means "derive from the group folder".
    pub path_to_xcodeproj: String,
    pub path_to_files: String,
    pub filename_pattern: String,
    pub file_extension: String,
    pub dry_run: bool,
}

impl SyncConfig {
    pub fn new(
        src_root: impl Into<NormalizedPath>,
        group_path: impl Into<String>,
        target_name: impl Into<String>,
        path_to_files: impl Into<String>,
        filename_pattern: impl Into<String>,
    ) -> Self {
        Self {
            src_root: src_root.into(),
            group_path: group_path.into(),
            target_name: target_name.into(),
            path_to_xcodeproj: String::new(),
            path_to_files: path_to_files.into(),
            filename_pattern: filename_pattern.into(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            dry_run: false,
        }
    }

    pub fn with_path_to_xcodeproj(mut self, path: impl Into<String>) -> Self {
        self.path_to_xcodeproj = path.into();
        self
    }

    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The group folder on disk: `src_root + group_path`.
    pub fn root(&self) -> NormalizedPath {
        self.src_root.join(&self.group_path)
    }

    /// The folder whose files are enumerated: `root + path_to_files`.
    pub fn files_dir(&self) -> NormalizedPath {
        self.root().join(&self.path_to_files)
    }

    /// The `.xcodeproj` bundle.
    ///
    /// Without an explicit `path_to_xcodeproj` the bundle is named after the
    /// last component of the group folder and lives inside it.
    pub fn xcodeproj(&self) -> Result<NormalizedPath> {
        if !self.path_to_xcodeproj.is_empty() {
            return Ok(self.src_root.join(&self.path_to_xcodeproj));
        }

        let root = self.root();
        let folder = root
            .file_name()
            .ok_or_else(|| Error::UnableToFindRootFolder {
                path: root.to_string(),
            })?;
        Ok(root.join(&format!("{folder}.xcodeproj")))
    }

    /// The `project.pbxproj` manifest read and written by the run.
    pub fn project_file(&self) -> Result<NormalizedPath> {
        Ok(self.xcodeproj()?.join(PROJECT_FILE_NAME))
    }

    /// Full path the synchronized group must resolve to when the project is
    /// read with a source root of `/`.
    pub fn group_full_path(&self) -> NormalizedPath {
        NormalizedPath::root()
            .join(&self.group_path)
            .join(&self.path_to_files)
    }
}
