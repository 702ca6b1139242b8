//! File-system primitives used by planning and execution.
//!
//! The planner only asks whether a name exists; the executor only asks for a
//! rename of an opaque handle. Both go through [`FileStore`] so the core can
//! be driven against the local disk or an in-memory double.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::record::FileHandle;

/// Category of a failed rename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    PermissionDenied,
    NotFound,
    Locked,
    InvalidName,
    Unknown,
}

impl FailureKind {
    pub fn description(&self) -> &'static str {
        match self {
            FailureKind::PermissionDenied => "permission denied",
            FailureKind::NotFound => "file not found",
            FailureKind::Locked => "file locked",
            FailureKind::InvalidName => "invalid name",
            FailureKind::Unknown => "unknown error",
        }
    }
}

/// A rename rejected by the store, with the host's message kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl RenameFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for RenameFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.description(), self.message)
    }
}

impl std::error::Error for RenameFailure {}

impl From<io::Error> for RenameFailure {
    fn from(err: io::Error) -> Self {
        RenameFailure::new(classify_io_error(&err), err.to_string())
    }
}

/// Storage location the files of one batch live in
pub trait FileStore {
    /// Whether `name` is taken in the folder. Errors other than "not found"
    /// are returned so callers can decide how cautious to be.
    fn name_exists(&self, name: &str) -> io::Result<bool>;

    /// Rename the file behind `handle` to `new_name` within the same folder.
    fn rename(&self, handle: &FileHandle, new_name: &str) -> Result<(), RenameFailure>;
}

/// A folder on the local file system
#[derive(Debug, Clone)]
pub struct LocalFolder {
    root: PathBuf,
}

impl LocalFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileStore for LocalFolder {
    fn name_exists(&self, name: &str) -> io::Result<bool> {
        match fs::symlink_metadata(self.root.join(name)) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn rename(&self, handle: &FileHandle, new_name: &str) -> Result<(), RenameFailure> {
        let source = handle.path();
        let destination = source.with_file_name(new_name);

        trace!(from = ?source, to = ?destination, "Renaming");

        // fs::rename silently replaces an existing target on Unix
        if fs::symlink_metadata(&destination).is_ok() {
            return Err(RenameFailure::new(
                FailureKind::Unknown,
                format!("Target already exists: {}", new_name),
            ));
        }

        fs::rename(source, &destination)?;
        Ok(())
    }
}

/// Map an I/O error onto the rename failure categories
pub fn classify_io_error(err: &io::Error) -> FailureKind {
    match err.kind() {
        io::ErrorKind::PermissionDenied => return FailureKind::PermissionDenied,
        io::ErrorKind::NotFound => return FailureKind::NotFound,
        io::ErrorKind::InvalidInput => return FailureKind::InvalidName,
        _ => {}
    }

    match err.raw_os_error() {
        Some(code) if LOCKED_CODES.contains(&code) => FailureKind::Locked,
        Some(code) if INVALID_NAME_CODES.contains(&code) => FailureKind::InvalidName,
        _ => FailureKind::Unknown,
    }
}

// EBUSY, ETXTBSY
#[cfg(unix)]
const LOCKED_CODES: &[i32] = &[16, 26];
// EINVAL, ENAMETOOLONG (Linux), ENAMETOOLONG (BSD/macOS)
#[cfg(unix)]
const INVALID_NAME_CODES: &[i32] = &[22, 36, 63];

// ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION
#[cfg(windows)]
const LOCKED_CODES: &[i32] = &[32, 33];
// ERROR_INVALID_NAME, ERROR_FILENAME_EXCED_RANGE
#[cfg(windows)]
const INVALID_NAME_CODES: &[i32] = &[123, 206];

#[cfg(not(any(unix, windows)))]
const LOCKED_CODES: &[i32] = &[];
#[cfg(not(any(unix, windows)))]
const INVALID_NAME_CODES: &[i32] = &[];
