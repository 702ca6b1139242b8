use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::store::FailureKind;

/// A rename that went through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameSuccess {
    pub original_name: String,
    pub new_name: String,
}

/// A rename the store rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameFailed {
    pub original_name: String,
    pub new_name: String,
    pub kind: FailureKind,
    /// Error text as reported by the host
    pub error: String,
}

/// Outcome of applying a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub successful: Vec<RenameSuccess>,
    pub failed: Vec<RenameFailed>,
    pub total_files: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration: Duration,
}

impl OperationResult {
    pub fn empty(at: DateTime<Utc>) -> Self {
        Self {
            successful: Vec::new(),
            failed: Vec::new(),
            total_files: 0,
            started_at: at,
            finished_at: at,
            duration: Duration::ZERO,
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    Success,
    Failure,
}

/// One attempted rename in the audit trail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationLogEntry {
    pub timestamp: DateTime<Utc>,
    pub original_name: String,
    pub new_name: String,
    pub status: LogStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
