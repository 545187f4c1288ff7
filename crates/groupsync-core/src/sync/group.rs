//! Applying a delta to a group's children

use std::collections::HashSet;

use groupsync_fs::NormalizedPath;
use groupsync_project::{ObjectId, Project};
use tracing::debug;

use super::{Delta, SourceFile};
use crate::{Error, Result};

/// Apply `delta` to the children of `group_id`.
///
/// Removed children are detached from the group but stay in the project;
/// the orphan cleaner decides whether they go. Each addition is a
/// placeholder whose path is resolved against the group's folder under
/// `source_root` and registered as a new file reference.
///
/// Returns the final delta: the same removals, with the additions replaced
/// by the records that were created.
pub fn reconcile_group(
    project: &mut Project,
    group_id: &ObjectId,
    delta: Delta<SourceFile>,
    source_root: &NormalizedPath,
) -> Result<Delta<SourceFile>> {
    let (files_to_remove, files_to_add) = delta.into_parts();

    let stale: HashSet<ObjectId> = files_to_remove
        .iter()
        .filter_map(|file| file.id.clone())
        .collect();
    if !stale.is_empty() {
        let detached = project.detach_children(group_id, &stale)?;
        debug!(group = %group_id, count = detached.len(), "detached group children");
    }

    let mut created = Vec::with_capacity(files_to_add.len());
    for file in &files_to_add {
        let path = resolve(project, group_id, file, source_root)?;
        let id = project.add_file_to_group(group_id, &path, source_root)?;
        created.push(SourceFile::from_record(project, &id));
    }

    Ok(Delta::new(files_to_remove, created))
}

/// Absolute location of a placeholder on disk.
fn resolve(
    project: &Project,
    group_id: &ObjectId,
    file: &SourceFile,
    source_root: &NormalizedPath,
) -> Result<NormalizedPath> {
    let invalid = || Error::InvalidFilePath {
        path: file.display_path().to_string(),
    };

    let relative = file.path.as_deref().ok_or_else(invalid)?;
    let parent = file.parent.as_ref().unwrap_or(group_id);
    let folder = project
        .full_path(parent, source_root)
        .ok_or_else(invalid)?;

    let path = folder.join(relative);
    debug!(path = %path, "resolved file to add");
    Ok(path)
}
