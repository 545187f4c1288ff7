//! Reading and atomically replacing the project file

use std::fs;
use std::io::Write;
use std::path::Path;

use fs2::FileExt;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{Error, NormalizedPath, Result};

/// Replace the contents of `path` with `content` in one step.
///
/// The content is staged in a temporary file beside the target, held under
/// an exclusive advisory lock while it is written and synced, then renamed
/// over the target. Readers see the old content or the new one, never a mix.
/// The staged file is removed whenever the replacement fails.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    // Dropping `staged` on any early return deletes the temporary file
    let mut staged = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    let staged_path = staged.path().to_path_buf();
    if let Ok(existing) = fs::metadata(&target) {
        staged
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| Error::io(&staged_path, e))?;
    }

    staged
        .as_file()
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: target.clone(),
        })?;
    staged
        .write_all(content)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| Error::io(&staged_path, e))?;

    let file = staged
        .persist(&target)
        .map_err(|e| Error::io(&target, e.error))?;
    // Closing the handle releases the lock
    drop(file);

    debug!(path = %path, bytes = content.len(), "replaced file");
    Ok(())
}

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    fs::read_to_string(&native).map_err(|e| Error::io(&native, e))
}

/// [`write_atomic`] for text.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
