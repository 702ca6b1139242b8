use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tracing::{debug, trace};

use crate::oplog::is_log_file_name;
use crate::record::{FileHandle, FileRecord};

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// List the regular files directly inside `target`, ordered by name.
///
/// Subdirectories and previously written operation logs are skipped.
pub fn enumerate_files(target: &Path) -> Result<Vec<FileRecord>, ScannerError> {
    debug!(path = ?target, "Scanning directory");

    if !target.exists() {
        return Err(ScannerError::PathNotFound(target.to_path_buf()));
    }

    if !target.is_dir() {
        return Err(ScannerError::NotADirectory(target.to_path_buf()));
    }

    let mut records = Vec::new();

    let read_dir = fs::read_dir(target).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(target.to_path_buf())
        } else {
            ScannerError::IoError(e)
        }
    })?;

    for entry in read_dir {
        let entry = entry?;
        let path = entry.path();

        trace!(entry = ?path, "Examining entry");

        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                debug!(path = ?path, error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if !metadata.is_file() {
            trace!(path = ?path, "Skipping non-file");
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();

        if is_log_file_name(&name) {
            trace!(name = %name, "Skipping operation log");
            continue;
        }

        let modified = metadata.modified().ok().map(to_millis);
        let created = metadata.created().ok().map(to_millis);

        debug!(name = %name, size = metadata.len(), "Found file");
        records.push(FileRecord::new(
            name,
            metadata.len(),
            modified,
            created,
            FileHandle::new(path),
        ));
    }

    records.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(count = records.len(), "Scan complete");

    Ok(records)
}

fn to_millis(time: SystemTime) -> i64 {
    DateTime::<Utc>::from(time).timestamp_millis()
}
