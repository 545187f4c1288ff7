//! Cross-crate tests for the reconciliation pipeline
//!
//! These drive the individual steps by hand, the way `GroupSync` chains them,
//! so that each hand-off between crates can be checked on its own.

use groupsync_core::{
    Delta, GroupSync, SourceFile, SyncConfig, SyncOutcome, compute_delta, reconcile_build_phase,
    reconcile_group, remove_orphans,
};
use groupsync_fs::{NormalizedPath, list_files};
use groupsync_project::{ObjectId, Project};
use groupsync_test_utils::fixture::{child_paths, compiled_paths, ids_with_isa};
use groupsync_test_utils::{ProjectFixture, TestProject};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn load(sandbox: &TestProject) -> (Project, NormalizedPath) {
    let path = NormalizedPath::new(sandbox.project_file());
    (Project::load(&path).unwrap(), path)
}

fn on_disk(sandbox: &TestProject, group: &ObjectId) -> Vec<SourceFile> {
    list_files(&NormalizedPath::new(sandbox.files_dir()), "swift")
        .unwrap()
        .into_iter()
        .map(|name| SourceFile::placeholder(name, group))
        .collect()
}

fn records(project: &Project, ids: &[ObjectId]) -> Vec<SourceFile> {
    ids.iter()
        .map(|id| SourceFile::from_record(project, id))
        .collect()
}

#[test]
fn test_build_phase_adds_exactly_the_group_records() {
    let sandbox = TestProject::new();
    let mut fixture = ProjectFixture::new();
    fixture.add_group_file("Listed.swift");
    sandbox.write_project(&fixture);
    sandbox.add_source("Listed.swift");
    sandbox.add_source("New.swift");

    let (mut project, path) = load(&sandbox);
    let group = ObjectId::new(fixture.leaf_group());
    let phase = ObjectId::new(fixture.sources_phase());
    let source_root = NormalizedPath::new(sandbox.src_root());
    let files = on_disk(&sandbox, &group);

    let children = project.group(&group).unwrap().children.clone();
    let group_delta = compute_delta(&files, &records(&project, &children));
    let group_delta = reconcile_group(&mut project, &group, group_delta, &source_root).unwrap();
    assert_eq!(group_delta.files_to_add().len(), 1);
    let created = group_delta.files_to_add()[0].id.clone().unwrap();

    let compiled = project.build_phase_file_refs(&phase).unwrap();
    let provisional = compute_delta(&files, &records(&project, &compiled));
    // The build phase on its own would add both files
    assert_eq!(provisional.files_to_add().len(), 2);

    let phase_delta = provisional.with_additions(group_delta.files_to_add().to_vec());
    reconcile_build_phase(&mut project, &phase, &phase_delta).unwrap();
    assert_eq!(project.build_phase_file_refs(&phase).unwrap(), vec![created]);

    project.save(&path).unwrap();
    let document = sandbox.project_json();
    assert_eq!(
        child_paths(&document, fixture.leaf_group()),
        strings(&["Listed.swift", "New.swift"])
    );
    assert_eq!(
        compiled_paths(&document, fixture.sources_phase()),
        strings(&["New.swift"])
    );
}

#[test]
fn test_removed_files_leave_no_records_behind() {
    let sandbox = TestProject::new();
    let mut fixture = ProjectFixture::new();
    fixture.add_compiled_file("Gone.swift");
    sandbox.write_project(&fixture);

    let (mut project, _) = load(&sandbox);
    let group = ObjectId::new(fixture.leaf_group());
    let phase = ObjectId::new(fixture.sources_phase());
    let source_root = NormalizedPath::new(sandbox.src_root());

    let children = project.group(&group).unwrap().children.clone();
    let group_delta = compute_delta(&[], &records(&project, &children));
    reconcile_group(&mut project, &group, group_delta, &source_root).unwrap();

    let compiled = project.build_phase_file_refs(&phase).unwrap();
    let phase_delta: Delta<SourceFile> = compute_delta(&[], &records(&project, &compiled));
    reconcile_build_phase(&mut project, &phase, &phase_delta).unwrap();
    let orphans = remove_orphans(&mut project, phase_delta.files_to_remove());

    assert_eq!(orphans, compiled);
    let document: Value = serde_json::from_str(&project.to_json_string().unwrap()).unwrap();
    assert!(ids_with_isa(&document, "PBXFileReference").is_empty());
    assert!(ids_with_isa(&document, "PBXBuildFile").is_empty());
    assert!(child_paths(&document, fixture.leaf_group()).is_empty());
}

#[test]
fn test_in_memory_sync_matches_persisted_run() {
    let sandbox = TestProject::new();
    let mut fixture = ProjectFixture::new();
    fixture.add_compiled_file("Old.swift");
    sandbox.write_project(&fixture);
    sandbox.add_source("New.swift");

    let config = SyncConfig::new(
        sandbox.src_root(),
        TestProject::GROUP_PATH,
        TestProject::TARGET,
        TestProject::FILES_PATH,
        r"\.swift$",
    );
    let sync = GroupSync::new(config);

    let (mut project, _) = load(&sandbox);
    let planned = sync.sync(&mut project).unwrap();
    let applied = sync.run().unwrap();

    assert_eq!(planned.outcome, SyncOutcome::Applied);
    assert_eq!(planned.group_added, applied.group_added);
    assert_eq!(planned.group_removed, applied.group_removed);
    assert_eq!(planned.phase_removed, applied.phase_removed);

    let document = sandbox.project_json();
    assert_eq!(
        compiled_paths(&document, fixture.sources_phase()),
        strings(&["New.swift"])
    );
}
