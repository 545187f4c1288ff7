//! Source directory enumeration

use std::fs;

use tracing::{debug, warn};

use crate::{Error, NormalizedPath, Result};

/// List the files directly inside `dir` whose extension is `extension`.
///
/// Only the file names are returned, sorted, so repeated runs over the same
/// directory see the same order. Entries are classified through symlinks:
/// directories and links to directories are skipped even when their name
/// carries the extension, and so are dangling links. Names that are not
/// valid UTF-8 cannot be written to the project and are skipped with a
/// warning. The extension comparison is case-sensitive.
pub fn list_files(dir: &NormalizedPath, extension: &str) -> Result<Vec<String>> {
    let native = dir.to_native();
    let entries = fs::read_dir(&native).map_err(|e| Error::io(&native, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&native, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Ok(name) = entry.file_name().into_string() else {
            warn!(path = %path.display(), "skipping file with a non UTF-8 name");
            continue;
        };
        if NormalizedPath::new(&name).extension() == Some(extension) {
            names.push(name);
        }
    }
    names.sort();

    debug!(dir = %dir, extension, count = names.len(), "listed source files");
    Ok(names)
}
