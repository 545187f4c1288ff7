//! [`ProjectFixture`] builder for `project.pbxproj` documents.
//!
//! Fixtures are built as raw JSON so that this crate does not depend on the
//! crates it helps to test. Identifiers are deterministic: `FIXTURE` followed
//! by a 17-digit hexadecimal counter, 24 characters in total like Xcode's.

use serde_json::{Map, Value, json};

/// Builder for a minimal but realistic Xcode project.
///
/// [`ProjectFixture::new`] lays out:
///
/// ```text
/// main group
/// └── App            (path "App")
///     └── Generated  (path "Generated")   <- leaf group
/// target "App"
/// ├── Frameworks build phase
/// └── Sources build phase                 <- sources phase
/// ```
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    next_id: u64,
    objects: Map<String, Value>,
    root: String,
    main_group: String,
    leaf_group: String,
    target: String,
    sources_phase: String,
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectFixture {
    /// The default layout: target `App`, groups `App/Generated`.
    pub fn new() -> Self {
        Self::with_layout("App", &["App", "Generated"])
    }

    /// A project with one target named `target` and a chain of nested
    /// groups under the main group, one per entry of `groups`.
    pub fn with_layout(target: &str, groups: &[&str]) -> Self {
        let mut fixture = Self {
            next_id: 0,
            objects: Map::new(),
            root: String::new(),
            main_group: String::new(),
            leaf_group: String::new(),
            target: String::new(),
            sources_phase: String::new(),
        };

        let main_group = fixture.insert(json!({
            "isa": "PBXGroup",
            "children": [],
            "sourceTree": "<group>"
        }));
        let mut leaf = main_group.clone();
        for path in groups {
            leaf = fixture.add_group(&leaf, path);
        }

        let frameworks = fixture.insert(json!({
            "isa": "PBXFrameworksBuildPhase",
            "buildActionMask": "2147483647",
            "files": [],
            "runOnlyForDeploymentPostprocessing": "0"
        }));
        let sources = fixture.insert(json!({
            "isa": "PBXSourcesBuildPhase",
            "buildActionMask": "2147483647",
            "files": [],
            "runOnlyForDeploymentPostprocessing": "0"
        }));
        let configurations = fixture.insert(json!({
            "isa": "XCConfigurationList",
            "buildConfigurations": [],
            "defaultConfigurationIsVisible": "0"
        }));
        let native_target = fixture.insert(json!({
            "isa": "PBXNativeTarget",
            "buildConfigurationList": configurations,
            "buildPhases": [frameworks, sources],
            "name": target,
            "productType": "com.apple.product-type.application"
        }));
        let root = fixture.insert(json!({
            "isa": "PBXProject",
            "compatibilityVersion": "Xcode 14.0",
            "mainGroup": main_group,
            "projectDirPath": "",
            "targets": [native_target]
        }));

        fixture.root = root;
        fixture.main_group = main_group;
        fixture.leaf_group = leaf;
        fixture.target = native_target;
        fixture.sources_phase = sources;
        fixture
    }

    fn insert(&mut self, object: Value) -> String {
        self.next_id += 1;
        let id = format!("FIXTURE{:017X}", self.next_id);
        self.objects.insert(id.clone(), object);
        id
    }

    fn push(&mut self, owner: &str, key: &str, id: &str) {
        let list = self
            .objects
            .get_mut(owner)
            .and_then(|object| object.get_mut(key))
            .and_then(Value::as_array_mut)
            .unwrap_or_else(|| panic!("fixture object {owner} has no {key} list"));
        list.push(Value::String(id.to_string()));
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn main_group(&self) -> &str {
        &self.main_group
    }

    /// The innermost group created by the layout.
    pub fn leaf_group(&self) -> &str {
        &self.leaf_group
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn sources_phase(&self) -> &str {
        &self.sources_phase
    }

    /// Add a `<group>`-relative subgroup and return its id.
    pub fn add_group(&mut self, parent: &str, path: &str) -> String {
        let id = self.insert(json!({
            "isa": "PBXGroup",
            "children": [],
            "path": path,
            "sourceTree": "<group>"
        }));
        self.push(parent, "children", &id);
        id
    }

    /// Add a file reference to `group` and return its id.
    pub fn add_file(&mut self, group: &str, path: &str) -> String {
        let id = self.insert(json!({
            "isa": "PBXFileReference",
            "lastKnownFileType": "sourcecode.swift",
            "path": path,
            "sourceTree": "<group>"
        }));
        self.push(group, "children", &id);
        id
    }

    /// Add a file reference to the leaf group and return its id.
    pub fn add_group_file(&mut self, path: &str) -> String {
        let group = self.leaf_group.clone();
        self.add_file(&group, path)
    }

    /// Add a build file for `file_ref` to the sources phase and return its id.
    pub fn compile(&mut self, file_ref: &str) -> String {
        let id = self.insert(json!({
            "isa": "PBXBuildFile",
            "fileRef": file_ref
        }));
        let phase = self.sources_phase.clone();
        self.push(&phase, "files", &id);
        id
    }

    /// Add a file to the leaf group and compile it; returns the file ref id.
    pub fn add_compiled_file(&mut self, path: &str) -> String {
        let file_ref = self.add_group_file(path);
        self.compile(&file_ref);
        file_ref
    }

    /// Drop the `files` key from the sources phase.
    pub fn without_sources_files(mut self) -> Self {
        if let Some(Value::Object(phase)) = self.objects.get_mut(&self.sources_phase) {
            phase.remove("files");
        }
        self
    }

    /// Remove the sources phase from the target's build phases.
    pub fn without_sources_phase(mut self) -> Self {
        let phase = self.sources_phase.clone();
        if let Some(phases) = self
            .objects
            .get_mut(&self.target)
            .and_then(|target| target.get_mut("buildPhases"))
            .and_then(Value::as_array_mut)
        {
            phases.retain(|id| id.as_str() != Some(phase.as_str()));
        }
        self
    }

    pub fn to_value(&self) -> Value {
        json!({
            "archiveVersion": "1",
            "classes": {},
            "objectVersion": "56",
            "objects": self.objects,
            "rootObject": self.root
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.to_value()).unwrap()
    }
}

/// Paths of a group's children in a serialized project, in order.
pub fn child_paths(document: &Value, group: &str) -> Vec<String> {
    let objects = &document["objects"];
    objects[group]["children"]
        .as_array()
        .map(|children| {
            children
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|id| objects[id]["path"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Paths of the files a sources phase compiles in a serialized project, in order.
pub fn compiled_paths(document: &Value, phase: &str) -> Vec<String> {
    let objects = &document["objects"];
    objects[phase]["files"]
        .as_array()
        .map(|files| {
            files
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|build_file| objects[build_file]["fileRef"].as_str())
                .filter_map(|file_ref| objects[file_ref]["path"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Identifiers of every object with the given `isa`.
pub fn ids_with_isa(document: &Value, isa: &str) -> Vec<String> {
    document["objects"]
        .as_object()
        .map(|objects| {
            objects
                .iter()
                .filter(|(_, object)| object["isa"] == isa)
                .map(|(id, _)| id.clone())
                .collect()
        })
        .unwrap_or_default()
}
