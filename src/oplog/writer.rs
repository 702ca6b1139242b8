use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::RenameConfig;
use crate::executor::{OperationLogEntry, OperationResult};

use super::types::*;

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Error types for operation log persistence
#[derive(Debug, thiserror::Error)]
pub enum OpLogError {
    #[error("Failed to write operation log: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize operation log: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Failed to read operation log: {0}")]
    ReadError(String),

    #[error("Operation log version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
}

/// Persist the audit trail of one execution into `target_dir`
pub fn write_operation_log(
    entries: &[OperationLogEntry],
    result: &OperationResult,
    config: &RenameConfig,
    target_dir: &Path,
) -> Result<PathBuf, OpLogError> {
    let log = create_log(entries, result, config, target_dir);
    write_log_file(&log, target_dir)
}

fn create_log(
    entries: &[OperationLogEntry],
    result: &OperationResult,
    config: &RenameConfig,
    target_dir: &Path,
) -> OperationLogFile {
    OperationLogFile {
        version: OPLOG_VERSION.to_string(),
        executed_at: result.started_at,
        target_directory: target_dir.to_path_buf(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        settings: LogSettings {
            sort: config.sort,
            pattern: config.pattern.clone(),
            padding: config.plan.padding,
            start_index: config.plan.start_index,
        },
        summary: LogSummary {
            total_files: result.total_files,
            succeeded: result.successful.len(),
            failed: result.failed.len(),
            duration_ms: result.duration.as_millis() as u64,
        },
        entries: entries.to_vec(),
    }
}

/// Write `log` into `target_dir` under a name no other log uses.
///
/// A clash with an earlier log (or a pending temp file) moves on to
/// `-1`, `-2`, ... suffixes; existing logs are never replaced.
pub fn write_log_file(log: &OperationLogFile, target_dir: &Path) -> Result<PathBuf, OpLogError> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = target_dir.join(log.filename_with_suffix(attempt));
        if path.exists() {
            debug!(path = ?path, "Operation log name taken");
            continue;
        }

        let temp_path = path.with_extension("json.tmp");
        let file = match OpenOptions::new().write(true).create_new(true).open(&temp_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = ?temp_path, "Operation log temp file taken");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if attempt > 0 {
            warn!(attempt, "Operation log name clashed, using suffixed name");
        }

        return persist(log, file, &temp_path, &path);
    }

    Err(OpLogError::WriteError(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free operation log name in {}", target_dir.display()),
    )))
}

fn persist(
    log: &OperationLogFile,
    file: File,
    temp_path: &Path,
    path: &Path,
) -> Result<PathBuf, OpLogError> {
    let written = (|| -> Result<(), OpLogError> {
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, log)?;
        writer.flush()?;
        fs::rename(temp_path, path)?;
        Ok(())
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(temp_path);
        return Err(e);
    }

    info!("Operation log written to: {:?}", path);

    Ok(path.to_path_buf())
}
