use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::executor::OperationLogEntry;
use crate::planner::Padding;
use crate::sorter::SortKey;

pub const OPLOG_VERSION: &str = "1.0";

/// File names written by this tool start with this prefix
pub const LOG_FILE_PREFIX: &str = "seqrename-log-";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationLogFile {
    /// Schema version for compatibility
    pub version: String,

    /// When the batch started
    pub executed_at: DateTime<Utc>,

    /// Folder the batch ran in
    pub target_directory: PathBuf,

    /// Tool version that created this log
    pub tool_version: String,

    /// Configuration the plan was built with
    pub settings: LogSettings,

    pub summary: LogSummary,

    /// Every attempted rename, in execution order
    pub entries: Vec<OperationLogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogSettings {
    pub sort: SortKey,
    pub pattern: String,
    pub padding: Padding,
    pub start_index: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogSummary {
    pub total_files: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

impl OperationLogFile {
    /// Generate the filename for this log
    pub fn generate_filename(&self) -> String {
        self.filename_with_suffix(0)
    }

    /// Filename with a numeric suffix; 0 means no suffix
    pub fn filename_with_suffix(&self, suffix: u32) -> String {
        let timestamp = self.executed_at.format("%Y%m%d-%H%M%S");
        match suffix {
            0 => format!("{}{}.json", LOG_FILE_PREFIX, timestamp),
            n => format!("{}{}-{}.json", LOG_FILE_PREFIX, timestamp, n),
        }
    }
}

/// Whether `name` looks like a log written by this tool
pub fn is_log_file_name(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && (name.ends_with(".json") || name.ends_with(".json.tmp"))
}
