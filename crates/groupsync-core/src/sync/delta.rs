//! Path-keyed differences between two membership lists

use groupsync_project::{ObjectId, Project};

/// Items that can be compared by their logical path.
///
/// Two items with no path compare equal.
pub trait LogicalPath {
    fn logical_path(&self) -> Option<&str>;
}

impl LogicalPath for String {
    fn logical_path(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl LogicalPath for &str {
    fn logical_path(&self) -> Option<&str> {
        Some(*self)
    }
}

/// A file as the sync sees it: a path, plus the project record backing it
/// once one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the enclosing group.
    pub path: Option<String>,
    /// Record identifier; `None` for files only seen on disk so far.
    pub id: Option<ObjectId>,
    /// The group listing the file.
    pub parent: Option<ObjectId>,
}

impl SourceFile {
    /// A file found on disk that has no record yet.
    pub fn placeholder(path: impl Into<String>, parent: &ObjectId) -> Self {
        Self {
            path: Some(path.into()),
            id: None,
            parent: Some(parent.clone()),
        }
    }

    /// The file backed by record `id`.
    pub fn from_record(project: &Project, id: &ObjectId) -> Self {
        Self {
            path: project.element_path(id).map(str::to_string),
            id: Some(id.clone()),
            parent: project.parent_of(id).cloned(),
        }
    }

    pub fn display_path(&self) -> &str {
        self.path.as_deref().unwrap_or("<no path>")
    }
}

impl LogicalPath for SourceFile {
    fn logical_path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

/// What has to change to turn one membership list into another.
///
/// A delta is never edited once built. The build-phase delta is finished
/// with [`Delta::with_additions`], which consumes the provisional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta<T> {
    files_to_remove: Vec<T>,
    files_to_add: Vec<T>,
}

impl<T> Default for Delta<T> {
    fn default() -> Self {
        Self {
            files_to_remove: Vec::new(),
            files_to_add: Vec::new(),
        }
    }
}

impl<T> Delta<T> {
    pub fn new(files_to_remove: Vec<T>, files_to_add: Vec<T>) -> Self {
        Self {
            files_to_remove,
            files_to_add,
        }
    }

    /// Items of the old list missing from the new one, in old-list order.
    pub fn files_to_remove(&self) -> &[T] {
        &self.files_to_remove
    }

    /// Items of the new list missing from the old one, in new-list order.
    pub fn files_to_add(&self) -> &[T] {
        &self.files_to_add
    }

    pub fn has_changes(&self) -> bool {
        !self.files_to_remove.is_empty() || !self.files_to_add.is_empty()
    }

    /// Keep the removals and replace the additions.
    pub fn with_additions(self, files_to_add: Vec<T>) -> Self {
        Self {
            files_to_remove: self.files_to_remove,
            files_to_add,
        }
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<T>) {
        (self.files_to_remove, self.files_to_add)
    }
}

/// Compare `new` (authoritative) against `old` by logical path.
///
/// Duplicate paths are not collapsed: each copy is matched on its own.
pub fn compute_delta<T: LogicalPath + Clone>(new: &[T], old: &[T]) -> Delta<T> {
    let files_to_remove = missing_from(old, new);
    let files_to_add = missing_from(new, old);
    Delta::new(files_to_remove, files_to_add)
}

fn missing_from<T: LogicalPath + Clone>(items: &[T], other: &[T]) -> Vec<T> {
    items
        .iter()
        .filter(|item| {
            !other
                .iter()
                .any(|candidate| candidate.logical_path() == item.logical_path())
        })
        .cloned()
        .collect()
}
