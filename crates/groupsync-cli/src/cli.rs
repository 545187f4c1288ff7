//! CLI argument parsing using clap derive

use clap::Parser;
use groupsync_core::SyncConfig;
use groupsync_fs::NormalizedPath;

use crate::error::{CliError, Result};

/// Xcode Group Sync - Keep an Xcode group and a target's sources in step with a folder
///
/// Meant to run as a build phase script, where Xcode exports SRCROOT and
/// TARGET_NAME.
#[derive(Parser, Debug)]
#[command(name = "xcode-group-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Absolute root the other paths are relative to
    #[arg(long, env = "SRCROOT")]
    pub src_root: String,

    /// Path of the group folder relative to the source root
    #[arg(long)]
    pub group_path: String,

    /// Target whose sources build phase is synchronized (case-insensitive)
    #[arg(long, env = "TARGET_NAME")]
    pub target_name: String,

    /// Location of the .xcodeproj relative to the source root; pass an empty
    /// string to use <group folder>/<group folder name>.xcodeproj
    #[arg(long)]
    pub path_to_xcodeproj: String,

    /// Folder to enumerate, relative to the group folder
    #[arg(long)]
    pub path_to_files: String,

    /// Regular expression selecting the build phase entries this tool manages
    #[arg(long, allow_hyphen_values = true)]
    pub filename_pattern: String,

    /// Extension of the files to enumerate
    #[arg(long, default_value = groupsync_core::config::DEFAULT_FILE_EXTENSION)]
    pub file_extension: String,

    /// Preview changes without writing the project file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Turn the parsed arguments into a run configuration.
    ///
    /// The source root must exist; it is resolved to its canonical absolute
    /// form.
    pub fn into_config(self) -> Result<SyncConfig> {
        if self.src_root.is_empty() {
            return Err(CliError::user(
                "--src-root is empty; pass it explicitly or set SRCROOT",
            ));
        }
        let src_root = NormalizedPath::new(&self.src_root).canonicalize()?;
        tracing::debug!(src_root = %src_root, "resolved source root");

        Ok(SyncConfig::new(
            src_root,
            self.group_path,
            self.target_name,
            self.path_to_files,
            self.filename_pattern,
        )
        .with_path_to_xcodeproj(self.path_to_xcodeproj)
        .with_file_extension(self.file_extension)
        .with_dry_run(self.dry_run))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use groupsync_test_utils::TestProject;
    use pretty_assertions::assert_eq;

    const REQUIRED: [&str; 13] = [
        "xcode-group-sync",
        "--src-root",
        "/Users/dev/Project",
        "--group-path",
        "/App",
        "--target-name",
        "App",
        "--path-to-xcodeproj",
        "",
        "--path-to-files",
        "/Generated",
        "--filename-pattern",
        r"\.swift$",
    ];

    fn parse(extra: &[&str]) -> Cli {
        Cli::parse_from(REQUIRED.iter().chain(extra).copied())
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_required_options() {
        let cli = parse(&[]);
        assert_eq!(cli.src_root, "/Users/dev/Project");
        assert_eq!(cli.group_path, "/App");
        assert_eq!(cli.target_name, "App");
        assert_eq!(cli.path_to_xcodeproj, "");
        assert_eq!(cli.path_to_files, "/Generated");
        assert_eq!(cli.filename_pattern, r"\.swift$");
        assert_eq!(cli.file_extension, "swift");
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_optional_flags() {
        let cli = parse(&["--dry-run", "-v", "--file-extension", "m"]);
        assert!(cli.dry_run);
        assert!(cli.verbose);
        assert_eq!(cli.file_extension, "m");
    }

    #[test]
    fn path_to_xcodeproj_is_required() {
        let args: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|arg| *arg != "--path-to-xcodeproj" && !arg.is_empty())
            .collect();
        assert!(Cli::try_parse_from(args).is_err());
    }

    fn canonical(path: &std::path::Path) -> NormalizedPath {
        NormalizedPath::new(path).canonicalize().unwrap()
    }

    #[test]
    fn into_config_carries_every_option() {
        let sandbox = TestProject::new();
        let mut cli = parse(&["--dry-run", "--file-extension", "m"]);
        cli.src_root = sandbox.src_root_str();

        let config = cli.into_config().unwrap();

        let root = canonical(sandbox.src_root());
        assert_eq!(config.src_root, root);
        assert_eq!(config.target_name, "App");
        assert_eq!(config.file_extension, "m");
        assert!(config.dry_run);
        assert_eq!(
            config.project_file().unwrap(),
            root.join("App/App.xcodeproj/project.pbxproj")
        );
    }

    #[cfg(unix)]
    #[test]
    fn into_config_resolves_linked_src_root() {
        let sandbox = TestProject::new();
        let link = sandbox.src_root().join("Linked");
        std::os::unix::fs::symlink(sandbox.src_root().join("App"), &link).unwrap();
        let mut cli = parse(&[]);
        cli.src_root = link.to_string_lossy().into_owned();

        let config = cli.into_config().unwrap();

        assert_eq!(config.src_root, canonical(&sandbox.src_root().join("App")));
    }

    #[test]
    fn into_config_rejects_missing_src_root() {
        let sandbox = TestProject::new();
        let mut cli = parse(&[]);
        cli.src_root = sandbox.src_root().join("missing").to_string_lossy().into_owned();

        assert!(matches!(cli.into_config(), Err(CliError::Fs(_))));
    }

    #[test]
    fn into_config_rejects_empty_src_root() {
        let mut cli = parse(&[]);
        cli.src_root = String::new();
        assert!(matches!(cli.into_config(), Err(CliError::User { .. })));
    }
}
