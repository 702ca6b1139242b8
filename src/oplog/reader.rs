use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::types::*;
use super::writer::OpLogError;

/// Load an operation log, checking its schema version before the contents.
///
/// A log from another schema version is reported as a version mismatch even
/// when its fields no longer match the current layout.
pub fn read_operation_log(path: &Path) -> Result<OperationLogFile, OpLogError> {
    let text = fs::read_to_string(path)
        .map_err(|e| OpLogError::ReadError(format!("Cannot open {}: {}", path.display(), e)))?;

    let raw: Value = serde_json::from_str(&text)
        .map_err(|e| OpLogError::ReadError(format!("Invalid JSON: {}", e)))?;

    match raw.get("version").and_then(Value::as_str) {
        Some(OPLOG_VERSION) => {}
        Some(found) => {
            return Err(OpLogError::VersionMismatch {
                expected: OPLOG_VERSION.to_string(),
                found: found.to_string(),
            })
        }
        None => return Err(OpLogError::ReadError("Missing schema version".to_string())),
    }

    let log: OperationLogFile = serde_json::from_value(raw)
        .map_err(|e| OpLogError::ReadError(format!("Unexpected log layout: {}", e)))?;

    debug!(entries = log.entries.len(), "Operation log loaded");

    Ok(log)
}
