use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::record::FileRecord;

/// Field and direction used to order a batch before numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    SizeAsc,
    SizeDesc,
    DateAsc,
    DateDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::SizeAsc,
        SortKey::SizeDesc,
        SortKey::DateAsc,
        SortKey::DateDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::SizeAsc => "size-asc",
            SortKey::SizeDesc => "size-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SortKey::SizeAsc => "Size (smallest first)",
            SortKey::SizeDesc => "Size (largest first)",
            SortKey::DateAsc => "Creation date (oldest first)",
            SortKey::DateDesc => "Creation date (newest first)",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SortError::InvalidArgument(s.to_string()))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("Invalid sort key '{0}' (expected one of: size-asc, size-desc, date-asc, date-desc)")]
    InvalidArgument(String),
}

/// Count of files per size class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeBreakdown {
    /// Under 1 MB
    pub small: usize,
    /// 1 MB up to 10 MB
    pub medium: usize,
    /// 10 MB up to 100 MB
    pub large: usize,
    /// 100 MB and above
    pub huge: usize,
}

/// Aggregate figures over a set of files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStats {
    pub count: usize,
    pub total_size: u64,
    pub average_size: u64,
    pub largest: Option<FileRecord>,
    pub smallest: Option<FileRecord>,
    pub oldest: Option<FileRecord>,
    pub newest: Option<FileRecord>,
    pub size_breakdown: SizeBreakdown,
}
