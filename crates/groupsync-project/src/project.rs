//! The project object table

use std::collections::{BTreeMap, HashMap, HashSet};

use groupsync_fs::{NormalizedPath, io};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::object::{BuildFile, FileReference, Group, NativeTarget, SourceTree, SourcesBuildPhase};
use crate::{Error, Object, ObjectId, Result, last_known_file_type};

/// On-disk shape of `project.pbxproj` in JSON form.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    archive_version: Value,
    #[serde(default)]
    classes: Map<String, Value>,
    object_version: Value,
    objects: BTreeMap<ObjectId, Value>,
    root_object: ObjectId,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// An Xcode project loaded into memory.
///
/// Records are stored in an arena keyed by [`ObjectId`]. The `parents` index
/// maps every group child to the group that lists it; it is built on load and
/// kept current by the editing methods below.
#[derive(Debug, Clone)]
pub struct Project {
    archive_version: Value,
    classes: Map<String, Value>,
    object_version: Value,
    extra: Map<String, Value>,
    root_object: ObjectId,
    objects: BTreeMap<ObjectId, Object>,
    parents: HashMap<ObjectId, ObjectId>,
}

impl Project {
    /// Parse the JSON form of a `project.pbxproj`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEncoding`] for the classic OpenStep text
    /// form, [`Error::Json`] for malformed JSON, [`Error::InvalidObject`] for
    /// undecodable records and [`Error::MissingObject`] when `rootObject` is
    /// not a `PBXProject` in the table.
    pub fn parse(content: &str) -> Result<Self> {
        let trimmed = content.trim_start();
        if trimmed.starts_with("//") {
            return Err(Error::UnsupportedEncoding);
        }

        let document: Document = serde_json::from_str(content)?;

        let mut objects = BTreeMap::new();
        for (id, value) in document.objects {
            let object = Object::from_json(&id, value)?;
            objects.insert(id, object);
        }

        if !matches!(objects.get(&document.root_object), Some(Object::Project(_))) {
            return Err(Error::MissingObject {
                id: document.root_object,
            });
        }

        let mut project = Self {
            archive_version: document.archive_version,
            classes: document.classes,
            object_version: document.object_version,
            extra: document.extra,
            root_object: document.root_object,
            objects,
            parents: HashMap::new(),
        };
        project.rebuild_parents();

        debug!(objects = project.objects.len(), "parsed project");
        Ok(project)
    }

    /// Load a project from a `project.pbxproj` file.
    ///
    /// Read and parse failures are both reported as [`Error::Load`] naming
    /// `path`.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        io::read_text(path)
            .map_err(Error::from)
            .and_then(|content| Self::parse(&content))
            .map_err(|source| Error::Load {
                path: path.to_native(),
                source: Box::new(source),
            })
    }

    /// Serialize the project to its JSON form.
    pub fn to_json_string(&self) -> Result<String> {
        let mut objects = BTreeMap::new();
        for (id, object) in &self.objects {
            objects.insert(id.clone(), object.to_json()?);
        }

        let document = Document {
            archive_version: self.archive_version.clone(),
            classes: self.classes.clone(),
            object_version: self.object_version.clone(),
            objects,
            root_object: self.root_object.clone(),
            extra: self.extra.clone(),
        };

        let mut content = serde_json::to_string_pretty(&document)?;
        content.push('\n');
        Ok(content)
    }

    /// Write the project atomically to `path`.
    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        let content = self.to_json_string()?;
        io::write_text(path, &content)?;
        debug!(path = %path, objects = self.objects.len(), "saved project");
        Ok(())
    }

    fn rebuild_parents(&mut self) {
        self.parents.clear();
        for (id, object) in &self.objects {
            if let Object::Group(group) = object {
                for child in &group.children {
                    self.parents.insert(child.clone(), id.clone());
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn object(&self, id: &ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All `PBXGroup` records, in identifier order.
    pub fn groups(&self) -> impl Iterator<Item = (&ObjectId, &Group)> {
        self.objects.iter().filter_map(|(id, object)| match object {
            Object::Group(group) => Some((id, group)),
            _ => None,
        })
    }

    pub fn group(&self, id: &ObjectId) -> Option<&Group> {
        match self.objects.get(id) {
            Some(Object::Group(group)) => Some(group),
            _ => None,
        }
    }

    pub fn file_reference(&self, id: &ObjectId) -> Option<&FileReference> {
        match self.objects.get(id) {
            Some(Object::FileReference(file)) => Some(file),
            _ => None,
        }
    }

    /// Identifiers of every `PBXFileReference` in the table.
    pub fn file_reference_ids(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, object)| matches!(object, Object::FileReference(_)))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// The group listing `id` among its children.
    pub fn parent_of(&self, id: &ObjectId) -> Option<&ObjectId> {
        self.parents.get(id)
    }

    /// Whether any group still lists `id` as a child.
    pub fn is_group_child(&self, id: &ObjectId) -> bool {
        self.groups().any(|(_, group)| group.children.contains(id))
    }

    /// The `path` attribute of an element.
    pub fn element_path(&self, id: &ObjectId) -> Option<&str> {
        self.objects.get(id).and_then(Object::path)
    }

    /// Resolve an element to a filesystem path under `source_root`.
    ///
    /// Returns `None` when the element is missing, is anchored to a build
    /// setting such as `BUILT_PRODUCTS_DIR`, or sits in a group chain that
    /// loops back on itself.
    pub fn full_path(&self, id: &ObjectId, source_root: &NormalizedPath) -> Option<NormalizedPath> {
        self.resolve_full_path(id, source_root, 0)
    }

    fn resolve_full_path(
        &self,
        id: &ObjectId,
        source_root: &NormalizedPath,
        depth: usize,
    ) -> Option<NormalizedPath> {
        if depth > self.objects.len() {
            return None;
        }

        let (path, tree) = match self.objects.get(id)? {
            Object::Group(group) => (group.path.as_deref(), &group.source_tree),
            Object::FileReference(file) => (file.path.as_deref(), &file.source_tree),
            _ => return None,
        };

        let base = match tree {
            SourceTree::Absolute => return path.map(NormalizedPath::new),
            SourceTree::SourceRoot => source_root.clone(),
            SourceTree::Group => match self.parents.get(id) {
                Some(parent) => self.resolve_full_path(parent, source_root, depth + 1)?,
                None => source_root.clone(),
            },
            SourceTree::Other(_) => return None,
        };

        Some(match path {
            Some(path) => base.join(path),
            None => base,
        })
    }

    /// Find the first group whose full path, resolved against
    /// `source_root`, equals `full_path`.
    pub fn find_group_by_full_path(
        &self,
        full_path: &NormalizedPath,
        source_root: &NormalizedPath,
    ) -> Option<ObjectId> {
        self.groups()
            .find(|(id, _)| self.full_path(id, source_root).as_ref() == Some(full_path))
            .map(|(id, _)| id.clone())
    }

    /// The first `PBXNativeTarget` whose name matches `name`, ignoring case.
    pub fn native_target_named(&self, name: &str) -> Option<(&ObjectId, &NativeTarget)> {
        let wanted = name.to_lowercase();
        self.objects.iter().find_map(|(id, object)| match object {
            Object::NativeTarget(target) if target.name.to_lowercase() == wanted => {
                Some((id, target))
            }
            _ => None,
        })
    }

    /// The first `PBXSourcesBuildPhase` of a target.
    pub fn sources_build_phase(&self, target_id: &ObjectId) -> Option<ObjectId> {
        let Some(Object::NativeTarget(target)) = self.objects.get(target_id) else {
            return None;
        };
        target
            .build_phases
            .iter()
            .find(|phase| matches!(self.objects.get(phase), Some(Object::SourcesBuildPhase(_))))
            .cloned()
    }

    pub fn build_phase(&self, id: &ObjectId) -> Option<&SourcesBuildPhase> {
        match self.objects.get(id) {
            Some(Object::SourcesBuildPhase(phase)) => Some(phase),
            _ => None,
        }
    }

    /// File elements referenced by a build phase's entries.
    ///
    /// Entries whose build file or file element cannot be found are
    /// skipped. Returns `None` when the phase is missing or has no `files`
    /// list.
    pub fn build_phase_file_refs(&self, phase_id: &ObjectId) -> Option<Vec<ObjectId>> {
        let files = self.build_phase(phase_id)?.files.as_ref()?;
        let refs = files
            .iter()
            .filter_map(|build_file_id| match self.objects.get(build_file_id) {
                Some(Object::BuildFile(build_file)) => build_file.file_ref.clone(),
                _ => None,
            })
            .filter(|file_ref| self.objects.contains_key(file_ref))
            .collect();
        Some(refs)
    }

    // ------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------

    /// A fresh identifier not used by any record.
    pub fn generate_id(&self) -> ObjectId {
        loop {
            let id = ObjectId::generate();
            if !self.objects.contains_key(&id) {
                return id;
            }
        }
    }

    /// Create a file reference for `file` and append it to a group.
    ///
    /// The reference is stored relative to the group when the file lies
    /// inside the group's folder, relative to the source root when it lies
    /// under that, and as an absolute path otherwise.
    ///
    /// # Errors
    ///
    /// Fails when the group is missing, when `file` does not exist, or when
    /// the group's own location cannot be resolved.
    pub fn add_file_to_group(
        &mut self,
        group_id: &ObjectId,
        file: &NormalizedPath,
        source_root: &NormalizedPath,
    ) -> Result<ObjectId> {
        if self.group(group_id).is_none() {
            return Err(Error::NotAGroup {
                id: group_id.clone(),
            });
        }
        if !file.is_file() {
            return Err(Error::FileNotFound {
                path: file.to_native(),
            });
        }
        let group_path = self
            .full_path(group_id, source_root)
            .ok_or_else(|| Error::UnresolvablePath {
                id: group_id.clone(),
            })?;

        let (path, source_tree) = if let Some(relative) = file.relative_to(&group_path) {
            (relative, SourceTree::Group)
        } else if let Some(relative) = file.relative_to(source_root) {
            (relative, SourceTree::SourceRoot)
        } else {
            (file.clone(), SourceTree::Absolute)
        };

        let file_name = file.file_name().map(str::to_string);
        let name = file_name.filter(|name| name != path.as_str());
        let reference = FileReference {
            name,
            path: Some(path.as_str().to_string()),
            source_tree,
            last_known_file_type: file
                .extension()
                .and_then(last_known_file_type)
                .map(str::to_string),
            extra: Map::new(),
        };

        let id = self.generate_id();
        self.objects
            .insert(id.clone(), Object::FileReference(reference));
        if let Some(Object::Group(group)) = self.objects.get_mut(group_id) {
            group.children.push(id.clone());
        }
        self.parents.insert(id.clone(), group_id.clone());

        debug!(%id, group = %group_id, path = %path, "added file reference");
        Ok(id)
    }

    /// Remove the listed children from a group without deleting them.
    ///
    /// Returns the identifiers that were actually detached, in the group's
    /// original order.
    pub fn detach_children(
        &mut self,
        group_id: &ObjectId,
        ids: &HashSet<ObjectId>,
    ) -> Result<Vec<ObjectId>> {
        let Some(Object::Group(group)) = self.objects.get_mut(group_id) else {
            return Err(Error::NotAGroup {
                id: group_id.clone(),
            });
        };

        let mut detached = Vec::new();
        group.children.retain(|child| {
            if ids.contains(child) {
                detached.push(child.clone());
                false
            } else {
                true
            }
        });

        for child in &detached {
            if self.parents.get(child) == Some(group_id) {
                self.parents.remove(child);
            }
        }
        Ok(detached)
    }

    /// Append a new build file referencing `file_ref` to a sources phase.
    pub fn add_build_file(&mut self, phase_id: &ObjectId, file_ref: &ObjectId) -> Result<ObjectId> {
        if self.build_phase(phase_id).is_none() {
            return Err(Error::NotABuildPhase {
                id: phase_id.clone(),
            });
        }

        let id = self.generate_id();
        self.objects.insert(
            id.clone(),
            Object::BuildFile(BuildFile {
                file_ref: Some(file_ref.clone()),
                extra: Map::new(),
            }),
        );
        if let Some(Object::SourcesBuildPhase(phase)) = self.objects.get_mut(phase_id) {
            phase.files.get_or_insert_with(Vec::new).push(id.clone());
        }

        debug!(%id, phase = %phase_id, file_ref = %file_ref, "added build file");
        Ok(id)
    }

    /// Drop every build file in a phase that references one of `file_refs`.
    ///
    /// The dropped `PBXBuildFile` records are deleted from the table, since
    /// nothing but their phase lists them. Returns their identifiers.
    pub fn remove_build_files(
        &mut self,
        phase_id: &ObjectId,
        file_refs: &HashSet<ObjectId>,
    ) -> Result<Vec<ObjectId>> {
        let referencing: HashSet<ObjectId> = self
            .objects
            .iter()
            .filter_map(|(id, object)| match object {
                Object::BuildFile(BuildFile {
                    file_ref: Some(file_ref),
                    ..
                }) if file_refs.contains(file_ref) => Some(id.clone()),
                _ => None,
            })
            .collect();

        let Some(Object::SourcesBuildPhase(phase)) = self.objects.get_mut(phase_id) else {
            return Err(Error::NotABuildPhase {
                id: phase_id.clone(),
            });
        };

        let mut removed = Vec::new();
        if let Some(files) = phase.files.as_mut() {
            files.retain(|build_file| {
                if referencing.contains(build_file) {
                    removed.push(build_file.clone());
                    false
                } else {
                    true
                }
            });
        }

        for id in &removed {
            self.objects.remove(id);
        }
        debug!(phase = %phase_id, removed = removed.len(), "removed build files");
        Ok(removed)
    }

    /// Delete a record from the table.
    ///
    /// Other records that still list `id` are left as they are.
    pub fn delete(&mut self, id: &ObjectId) -> Option<Object> {
        let removed = self.objects.remove(id)?;
        self.parents.remove(id);
        debug!(%id, isa = removed.isa(), "deleted object");
        Some(removed)
    }
}
