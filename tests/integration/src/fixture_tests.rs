//! Golden tests against the `Sample` project in `test-fixtures/projects`
//!
//! The fixture compiles one hand-written file and a folder of generated
//! files; only the generated ones are managed.

use groupsync_core::{GroupSync, SyncConfig, SyncOutcome};
use groupsync_test_utils::fixture::{child_paths, compiled_paths, ids_with_isa};
use groupsync_test_utils::{TestProject, fixtures_dir};
use pretty_assertions::assert_eq;
use serde_json::Value;

const GENERATED_GROUP: &str = "5A0000000000000000000004";
const SOURCES_PHASE: &str = "5A000000000000000000000D";
const STALE_REF: &str = "5A0000000000000000000009";
const STALE_BUILD_FILE: &str = "5A000000000000000000000C";
const PRODUCT_REF: &str = "5A0000000000000000000006";

fn sample() -> TestProject {
    TestProject::from_template(&fixtures_dir().join("projects"))
}

fn config(sandbox: &TestProject) -> SyncConfig {
    SyncConfig::new(
        sandbox.src_root(),
        "/Sample",
        "Sample",
        "/Generated",
        r"\.generated\.swift$",
    )
}

fn project_json(sandbox: &TestProject) -> Value {
    let path = sandbox
        .src_root()
        .join("Sample")
        .join("Sample.xcodeproj")
        .join("project.pbxproj");
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[test]
fn test_sample_sync_manages_generated_files_only() {
    let sandbox = sample();

    let report = GroupSync::new(config(&sandbox)).run().unwrap();

    assert_eq!(report.outcome, SyncOutcome::Applied);
    assert_eq!(report.group_added, strings(&["Models.generated.swift"]));
    assert_eq!(report.group_removed, strings(&["Stale.generated.swift"]));
    assert_eq!(report.phase_removed, strings(&["Stale.generated.swift"]));

    let document = project_json(&sandbox);
    assert_eq!(
        child_paths(&document, GENERATED_GROUP),
        strings(&["Api.generated.swift", "Models.generated.swift"])
    );
    assert_eq!(
        compiled_paths(&document, SOURCES_PHASE),
        strings(&[
            "AppDelegate.swift",
            "Api.generated.swift",
            "Models.generated.swift"
        ])
    );

    let objects = &document["objects"];
    assert!(objects[STALE_REF].is_null());
    assert!(objects[STALE_BUILD_FILE].is_null());
    assert_eq!(objects[PRODUCT_REF]["path"], "Sample.app");
    assert_eq!(ids_with_isa(&document, "XCBuildConfiguration").len(), 4);
}

#[test]
fn test_sample_keeps_untouched_settings() {
    let sandbox = sample();
    let before = project_json(&sandbox);

    GroupSync::new(config(&sandbox)).run().unwrap();

    let after = project_json(&sandbox);
    for id in ["5A0000000000000000000001", "5A0000000000000000000010", "5A0000000000000000000012"] {
        assert_eq!(after["objects"][id], before["objects"][id]);
    }
    assert_eq!(after["rootObject"], before["rootObject"]);
    assert_eq!(after["objectVersion"], before["objectVersion"]);
}

#[test]
fn test_sample_second_run_is_skipped() {
    let sandbox = sample();
    let sync = GroupSync::new(config(&sandbox));

    sync.run().unwrap();
    let after_first = project_json(&sandbox);

    assert_eq!(sync.run().unwrap().outcome, SyncOutcome::Skipped);
    assert_eq!(project_json(&sandbox), after_first);
}

#[test]
fn test_sample_target_lookup_ignores_case() {
    let sandbox = sample();
    let mut config = config(&sandbox);
    config.target_name = "SAMPLE".to_string();

    assert_eq!(
        GroupSync::new(config).run().unwrap().outcome,
        SyncOutcome::Applied
    );
}
