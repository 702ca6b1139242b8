use std::path::{Path, PathBuf};

/// Opaque token identifying a file to the store that enumerated it.
///
/// Planning never looks inside; only `FileStore::rename` resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle(PathBuf);

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// A single file taking part in a rename batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Current file name including extension
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Last modification time, ms since epoch
    pub modified: Option<i64>,
    /// Creation time, ms since epoch
    pub created: Option<i64>,
    /// Extension including the leading dot, empty if none
    pub extension: String,
    pub handle: FileHandle,
}

impl FileRecord {
    /// Build a record; a missing creation time falls back to the modification time.
    pub fn new(
        name: impl Into<String>,
        size: u64,
        modified: Option<i64>,
        created: Option<i64>,
        handle: FileHandle,
    ) -> Self {
        let name = name.into();
        let extension = extension_of(&name).to_string();

        Self {
            name,
            size,
            modified,
            created: created.or(modified),
            extension,
            handle,
        }
    }

    /// Timestamp used for date ordering: creation, then modification, then 0
    pub fn sort_timestamp(&self) -> i64 {
        self.created.or(self.modified).unwrap_or(0)
    }
}

/// Extension from the last dot onward. A leading dot alone (".bashrc") is not one.
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i > 0 => &name[i..],
        _ => "",
    }
}
