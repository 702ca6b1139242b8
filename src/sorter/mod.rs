mod format;
mod stats;
mod types;

pub use format::{format_date_relative, format_date_relative_at, format_size};
pub use stats::compute_stats;
pub use types::*;

use std::collections::BTreeMap;
use tracing::debug;

use crate::record::FileRecord;

/// Return a new sequence of `files` ordered by `key`.
///
/// The sort is stable, so files comparing equal keep their input order.
pub fn sort_files(files: &[FileRecord], key: SortKey) -> Vec<FileRecord> {
    let mut sorted = files.to_vec();

    match key {
        SortKey::SizeAsc => sorted.sort_by(|a, b| a.size.cmp(&b.size)),
        SortKey::SizeDesc => sorted.sort_by(|a, b| b.size.cmp(&a.size)),
        SortKey::DateAsc => sorted.sort_by(|a, b| a.sort_timestamp().cmp(&b.sort_timestamp())),
        SortKey::DateDesc => sorted.sort_by(|a, b| b.sort_timestamp().cmp(&a.sort_timestamp())),
    }

    debug!(count = sorted.len(), key = %key, "Sorted files");

    sorted
}

/// Files whose size lies within the inclusive bounds
pub fn filter_by_size(files: &[FileRecord], min: Option<u64>, max: Option<u64>) -> Vec<FileRecord> {
    files
        .iter()
        .filter(|f| min.map_or(true, |m| f.size >= m) && max.map_or(true, |m| f.size <= m))
        .cloned()
        .collect()
}

/// Files whose date (creation, falling back to modification) lies within the inclusive bounds
pub fn filter_by_date_range(
    files: &[FileRecord],
    start: Option<i64>,
    end: Option<i64>,
) -> Vec<FileRecord> {
    files
        .iter()
        .filter(|f| {
            let ts = f.sort_timestamp();
            start.map_or(true, |s| ts >= s) && end.map_or(true, |e| ts <= e)
        })
        .cloned()
        .collect()
}

/// Files with any of the given extensions; matching ignores case and the leading dot
pub fn filter_by_extension<S: AsRef<str>>(files: &[FileRecord], extensions: &[S]) -> Vec<FileRecord> {
    let wanted: Vec<String> = extensions
        .iter()
        .map(|e| normalize_extension(e.as_ref()))
        .collect();

    files
        .iter()
        .filter(|f| wanted.contains(&normalize_extension(&f.extension)))
        .cloned()
        .collect()
}

/// Files grouped by lower-cased extension; files without one are keyed by `""`
pub fn group_by_extension(files: &[FileRecord]) -> BTreeMap<String, Vec<FileRecord>> {
    let mut groups: BTreeMap<String, Vec<FileRecord>> = BTreeMap::new();
    for file in files {
        groups
            .entry(file.extension.to_lowercase())
            .or_default()
            .push(file.clone());
    }
    groups
}

/// Case-insensitive substring search over file names
pub fn search_by_name(files: &[FileRecord], query: &str) -> Vec<FileRecord> {
    let needle = query.to_lowercase();
    files
        .iter()
        .filter(|f| f.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.is_empty() || ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}
