//! Applying a delta to a sources build phase

use std::collections::HashSet;

use groupsync_project::{ObjectId, Project};
use tracing::debug;

use super::{Delta, SourceFile};
use crate::{Error, Result};

/// Apply the final build-phase `delta` to `phase_id`.
///
/// Entries compiling a removed file are dropped, and their build-file
/// records deleted. Every addition must already be a project record, as
/// returned by [`reconcile_group`](super::reconcile_group); one build file
/// is appended for each.
pub fn reconcile_build_phase(
    project: &mut Project,
    phase_id: &ObjectId,
    delta: &Delta<SourceFile>,
) -> Result<()> {
    let stale: HashSet<ObjectId> = delta
        .files_to_remove()
        .iter()
        .filter_map(|file| file.id.clone())
        .collect();
    if !stale.is_empty() {
        let removed = project.remove_build_files(phase_id, &stale)?;
        debug!(phase = %phase_id, count = removed.len(), "dropped build phase entries");
    }

    for file in delta.files_to_add() {
        let file_ref = file.id.as_ref().ok_or_else(|| Error::UnregisteredFile {
            path: file.display_path().to_string(),
        })?;
        project.add_build_file(phase_id, file_ref)?;
    }

    Ok(())
}
