//! The `GroupSync` orchestrator

use groupsync_fs::{NormalizedPath, list_files};
use groupsync_project::{ObjectId, Project};
use regex::Regex;
use tracing::{debug, info};

use super::{
    Delta, SourceFile, compute_delta, reconcile_build_phase, reconcile_group, remove_orphans,
};
use crate::{Error, Result, SyncConfig};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Changes were made and the project file was rewritten
    Applied,
    /// Nothing had to change; the project file was left alone
    Skipped,
    /// Changes were computed but not written
    DryRun,
}

/// Report from a synchronization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Target whose build phase was synchronized
    pub target: String,
    pub outcome: SyncOutcome,
    /// Paths detached from the group
    pub group_removed: Vec<String>,
    /// Paths added to the group
    pub group_added: Vec<String>,
    /// Paths no longer compiled by the target
    pub phase_removed: Vec<String>,
    /// Paths newly compiled by the target
    pub phase_added: Vec<String>,
    /// File references deleted from the project
    pub orphans_removed: Vec<ObjectId>,
}

impl SyncReport {
    pub fn has_changes(&self) -> bool {
        self.outcome != SyncOutcome::Skipped
    }
}

/// Keeps one group and one target's sources build phase in step with a
/// folder on disk.
///
/// [`run`](Self::run) loads the project file, reconciles it and writes it
/// back when something changed. [`sync`](Self::sync) performs the
/// reconciliation on an already loaded project.
#[derive(Debug, Clone)]
pub struct GroupSync {
    config: SyncConfig,
}

impl GroupSync {
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    /// Load, reconcile and, when the outcome is [`SyncOutcome::Applied`],
    /// persist the project file.
    ///
    /// Nothing is written when any step fails.
    pub fn run(&self) -> Result<SyncReport> {
        let project_file = self.config.project_file()?;
        debug!(path = %project_file, "loading project");
        let mut project = Project::load(&project_file)?;

        let report = self.sync(&mut project)?;
        if report.outcome == SyncOutcome::Applied {
            project.save(&project_file)?;
        }

        info!(
            target_name = %report.target,
            outcome = ?report.outcome,
            group_added = report.group_added.len(),
            group_removed = report.group_removed.len(),
            phase_removed = report.phase_removed.len(),
            "sync finished"
        );
        Ok(report)
    }

    /// Reconcile `project` in memory against the files on disk.
    pub fn sync(&self, project: &mut Project) -> Result<SyncReport> {
        let config = &self.config;

        let group_path = config.group_full_path();
        let group_id = project
            .find_group_by_full_path(&group_path, &NormalizedPath::root())
            .ok_or_else(|| Error::GroupNotFound {
                path: group_path.to_string(),
            })?;
        debug!(group = %group_id, path = %group_path, "found group");

        let on_disk: Vec<SourceFile> = list_files(&config.files_dir(), &config.file_extension)?
            .into_iter()
            .map(|name| SourceFile::placeholder(name, &group_id))
            .collect();

        let children = group_children(project, &group_id);
        let group_delta = compute_delta(&on_disk, &children);
        log_delta("group", &group_delta);
        let group_delta = reconcile_group(project, &group_id, group_delta, &config.src_root)?;

        let (phase_id, entries) = self.compiled_sources(project)?;
        let pattern = Regex::new(&config.filename_pattern).map_err(|source| {
            Error::InvalidFilenamePattern {
                pattern: config.filename_pattern.clone(),
                source,
            }
        })?;
        let managed: Vec<SourceFile> = entries
            .iter()
            .filter(|id| project.element_path(id).is_some_and(|path| pattern.is_match(path)))
            .map(|id| SourceFile::from_record(project, id))
            .collect();

        let provisional = compute_delta(&on_disk, &managed);
        log_delta("build phase", &provisional);
        let phase_delta = provisional.with_additions(group_delta.files_to_add().to_vec());
        reconcile_build_phase(project, &phase_id, &phase_delta)?;

        let orphans_removed = remove_orphans(project, phase_delta.files_to_remove());

        let outcome = if !group_delta.has_changes() && !phase_delta.has_changes() {
            SyncOutcome::Skipped
        } else if config.dry_run {
            SyncOutcome::DryRun
        } else {
            SyncOutcome::Applied
        };

        Ok(SyncReport {
            target: config.target_name.clone(),
            outcome,
            group_removed: paths(group_delta.files_to_remove()),
            group_added: paths(group_delta.files_to_add()),
            phase_removed: paths(phase_delta.files_to_remove()),
            phase_added: paths(phase_delta.files_to_add()),
            orphans_removed,
        })
    }

    /// The target's sources build phase and the file references it compiles.
    fn compiled_sources(&self, project: &Project) -> Result<(ObjectId, Vec<ObjectId>)> {
        let name = &self.config.target_name;
        let target_id = project
            .native_target_named(name)
            .map(|(id, _)| id.clone())
            .ok_or_else(|| Error::InvalidTargetName { name: name.clone() })?;
        let phase_id =
            project
                .sources_build_phase(&target_id)
                .ok_or_else(|| Error::InvalidBuildPhase {
                    target: name.clone(),
                })?;
        let entries =
            project
                .build_phase_file_refs(&phase_id)
                .ok_or_else(|| Error::InvalidSourceFiles {
                    target: name.clone(),
                })?;

        debug!(target_id = %target_id, phase = %phase_id, entries = entries.len(), "found build phase");
        Ok((phase_id, entries))
    }
}

/// Children of a group that resolve to a record.
fn group_children(project: &Project, group_id: &ObjectId) -> Vec<SourceFile> {
    project
        .group(group_id)
        .map(|group| {
            group
                .children
                .iter()
                .filter(|id| project.contains(id))
                .map(|id| SourceFile::from_record(project, id))
                .collect()
        })
        .unwrap_or_default()
}

fn paths(files: &[SourceFile]) -> Vec<String> {
    files
        .iter()
        .map(|file| file.display_path().to_string())
        .collect()
}

fn log_delta(list: &str, delta: &Delta<SourceFile>) {
    debug!(
        list,
        remove = ?paths(delta.files_to_remove()),
        add = ?paths(delta.files_to_add()),
        "computed delta"
    );
}
