use crate::record::FileRecord;

use super::types::{FileStats, SizeBreakdown};

const MB: u64 = 1024 * 1024;

pub fn compute_stats(files: &[FileRecord]) -> FileStats {
    if files.is_empty() {
        return FileStats::default();
    }

    let total_size: u64 = files.iter().map(|f| f.size).sum();

    let mut size_breakdown = SizeBreakdown::default();
    for file in files {
        match file.size {
            s if s < MB => size_breakdown.small += 1,
            s if s < 10 * MB => size_breakdown.medium += 1,
            s if s < 100 * MB => size_breakdown.large += 1,
            _ => size_breakdown.huge += 1,
        }
    }

    // Ties keep the earliest file in input order
    let largest = pick(files, |candidate, best| candidate.size > best.size);
    let smallest = pick(files, |candidate, best| candidate.size < best.size);
    let oldest = pick(files, |candidate, best| {
        candidate.sort_timestamp() < best.sort_timestamp()
    });
    let newest = pick(files, |candidate, best| {
        candidate.sort_timestamp() > best.sort_timestamp()
    });

    FileStats {
        count: files.len(),
        total_size,
        average_size: total_size / files.len() as u64,
        largest,
        smallest,
        oldest,
        newest,
        size_breakdown,
    }
}

fn pick(files: &[FileRecord], better: impl Fn(&FileRecord, &FileRecord) -> bool) -> Option<FileRecord> {
    files
        .iter()
        .reduce(|best, candidate| if better(candidate, best) { candidate } else { best })
        .cloned()
}
