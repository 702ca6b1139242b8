use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::record::{FileHandle, FileRecord};

/// Default bound on forward probing when a candidate name is taken
pub const DEFAULT_MAX_PROBE_ATTEMPTS: u32 = 1000;

/// Zero-padding width of the sequence number: 0 (none), 2, 3, 4 or 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Padding(u8);

impl Padding {
    pub const ALLOWED: [u8; 5] = [0, 2, 3, 4, 5];

    pub fn width(&self) -> usize {
        self.0 as usize
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Padding {
    type Error = InvalidPadding;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidPadding(value))
        }
    }
}

impl From<Padding> for u8 {
    fn from(padding: Padding) -> u8 {
        padding.0
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid padding {0} (expected 0, 2, 3, 4 or 5)")]
pub struct InvalidPadding(pub u8);

/// Parameters of one planning run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOptions {
    pub padding: Padding,
    /// First sequence number handed out
    pub start_index: u64,
    /// How many later indices are tried before a collision is declared unresolvable
    pub max_probe_attempts: u32,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            padding: Padding::default(),
            start_index: 1,
            max_probe_attempts: DEFAULT_MAX_PROBE_ATTEMPTS,
        }
    }
}

/// One planned rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    pub original_name: String,
    pub new_name: String,
    /// Sequence index before collision adjustment
    pub original_index: u64,
    /// Sequence index actually used in `new_name`
    pub actual_index: u64,
    pub collision_resolved: bool,
    pub file: FileRecord,
}

impl PreviewEntry {
    pub fn size(&self) -> u64 {
        self.file.size
    }

    pub fn created(&self) -> Option<i64> {
        self.file.created
    }

    pub fn extension(&self) -> &str {
        &self.file.extension
    }

    pub fn handle(&self) -> &FileHandle {
        &self.file.handle
    }
}

/// Audit record of a sequence index moved forward to dodge an existing name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionResolution {
    /// File being renamed
    pub file_name: String,
    /// Name that was taken
    pub original_name: String,
    pub original_index: u64,
    pub resolved_name: String,
    pub resolved_index: u64,
    /// Number of forward probes needed
    pub attempts: u32,
}

/// A complete, collision-free rename plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    pub entries: Vec<PreviewEntry>,
    pub collisions: Vec<CollisionResolution>,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Reasons a whole plan is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Invalid naming pattern: {}", .errors.join("; "))]
    InvalidPattern { errors: Vec<String> },

    #[error("No free name found for '{file}' after {attempts} attempts starting at index {start_index}")]
    UnresolvableCollision {
        file: String,
        start_index: u64,
        attempts: u32,
    },

    #[error("Duplicate target name '{name}' planned for '{file}'")]
    DuplicateName { name: String, file: String },

    #[error("No sequence number left for '{file}': the previous file took the largest index")]
    IndexExhausted { file: String },
}

impl PlanError {
    /// Name of the file that stopped planning, if any
    pub fn offending_file(&self) -> Option<&str> {
        match self {
            PlanError::InvalidPattern { .. } => None,
            PlanError::UnresolvableCollision { file, .. } => Some(file),
            PlanError::DuplicateName { file, .. } => Some(file),
            PlanError::IndexExhausted { file } => Some(file),
        }
    }
}
