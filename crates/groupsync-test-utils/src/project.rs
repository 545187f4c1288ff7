//! [`TestProject`] sandbox for sync scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use crate::ProjectFixture;

/// A temporary source root laid out the way the default
/// [`ProjectFixture`] describes it:
///
/// ```text
/// <src-root>/
/// └── App/
///     ├── App.xcodeproj/project.pbxproj
///     └── Generated/                    <- enumerated source folder
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use groupsync_test_utils::{ProjectFixture, TestProject};
///
/// let project = TestProject::new();
/// project.add_source("Model.swift");
/// project.write_project(&ProjectFixture::new());
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// `--group-path` matching the default fixture
    pub const GROUP_PATH: &'static str = "/App";
    /// `--path-to-files` matching the default fixture
    pub const FILES_PATH: &'static str = "/Generated";
    /// `--target-name` matching the default fixture
    pub const TARGET: &'static str = "App";

    /// Create the sandbox with an empty source folder.
    pub fn new() -> Self {
        let project = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        fs::create_dir_all(project.files_dir()).unwrap();
        project
    }

    /// Create a sandbox holding a copy of `template`'s contents.
    ///
    /// The copy is laid out however the template is; the helpers tied to the
    /// default layout, such as [`files_dir`](Self::files_dir), do not apply.
    pub fn from_template(template: &Path) -> Self {
        let project = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        copy_dir(template, project.src_root());
        project
    }

    /// The source root (`--src-root`).
    pub fn src_root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn src_root_str(&self) -> String {
        self.src_root().to_string_lossy().into_owned()
    }

    /// The enumerated source folder.
    pub fn files_dir(&self) -> PathBuf {
        self.src_root().join("App").join("Generated")
    }

    /// The project file derived from the group path.
    pub fn project_file(&self) -> PathBuf {
        self.src_root()
            .join("App")
            .join("App.xcodeproj")
            .join("project.pbxproj")
    }

    /// Write `fixture` as the project file.
    pub fn write_project(&self, fixture: &ProjectFixture) {
        let path = self.project_file();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, fixture.to_json()).unwrap();
    }

    /// Create an empty source file in the source folder.
    pub fn add_source(&self, name: &str) {
        fs::write(self.files_dir().join(name), "// generated\n").unwrap();
    }

    /// Delete a source file from the source folder.
    pub fn remove_source(&self, name: &str) {
        fs::remove_file(self.files_dir().join(name)).unwrap();
    }

    /// Raw project file content.
    pub fn project_contents(&self) -> String {
        fs::read_to_string(self.project_file()).unwrap()
    }

    /// Project file parsed as JSON.
    pub fn project_json(&self) -> Value {
        serde_json::from_str(&self.project_contents()).unwrap()
    }

    /// Command-line arguments for a sync of the default fixture.
    pub fn sync_args(&self, filename_pattern: &str) -> Vec<String> {
        vec![
            "--src-root".to_string(),
            self.src_root_str(),
            "--group-path".to_string(),
            Self::GROUP_PATH.to_string(),
            "--target-name".to_string(),
            Self::TARGET.to_string(),
            "--path-to-xcodeproj".to_string(),
            String::new(),
            "--path-to-files".to_string(),
            Self::FILES_PATH.to_string(),
            "--filename-pattern".to_string(),
            filename_pattern.to_string(),
        ]
    }
}

/// The workspace's `test-fixtures` directory.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("test-fixtures")
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}
