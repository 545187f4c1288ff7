//! Deleting file references the build phase no longer compiles

use std::collections::HashSet;

use groupsync_project::{ObjectId, Project};
use tracing::{debug, warn};

use super::SourceFile;

/// Delete every file reference whose id appears in `removed`.
///
/// References are deleted even when a group still lists them; such ids are
/// logged, since the group now points at a missing record. Returns the
/// deleted ids in table order.
pub fn remove_orphans(project: &mut Project, removed: &[SourceFile]) -> Vec<ObjectId> {
    let ids: HashSet<&ObjectId> = removed.iter().filter_map(|file| file.id.as_ref()).collect();
    if ids.is_empty() {
        return Vec::new();
    }

    let orphans: Vec<ObjectId> = project
        .file_reference_ids()
        .into_iter()
        .filter(|id| ids.contains(id))
        .collect();

    for id in &orphans {
        if project.is_group_child(id) {
            warn!(%id, "deleting file reference still listed by a group");
        }
        project.delete(id);
    }

    debug!(count = orphans.len(), "removed orphaned file references");
    orphans
}
