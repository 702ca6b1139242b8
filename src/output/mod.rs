use crate::config::RenameConfig;
use crate::executor::OperationResult;
use crate::oplog::OperationLogFile;
use crate::planner::RenamePlan;
use crate::record::FileRecord;
use crate::sorter::{format_date_relative, format_size, FileStats};
use std::io::{self, Write};

/// Display a file listing followed by aggregate statistics
pub fn display_file_list(
    files: &[FileRecord],
    stats: &FileStats,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer)?;

    if files.is_empty() {
        writeln!(writer, "No matching files.")?;
        return Ok(());
    }

    for (i, file) in files.iter().enumerate() {
        writeln!(
            writer,
            "  {:>4}. {:<40} {:>10}  {}",
            i + 1,
            file.name,
            format_size(file.size),
            format_date_relative(file.sort_timestamp())
        )?;
    }

    writeln!(writer)?;
    display_stats(stats, writer)
}

/// Display aggregate statistics
pub fn display_stats(stats: &FileStats, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Files:      {}", stats.count)?;
    writeln!(writer, "Total size: {}", format_size(stats.total_size))?;
    writeln!(writer, "Average:    {}", format_size(stats.average_size))?;

    if let Some(largest) = &stats.largest {
        writeln!(writer, "Largest:    {} ({})", largest.name, format_size(largest.size))?;
    }
    if let Some(smallest) = &stats.smallest {
        writeln!(writer, "Smallest:   {} ({})", smallest.name, format_size(smallest.size))?;
    }
    if let Some(oldest) = &stats.oldest {
        writeln!(
            writer,
            "Oldest:     {} ({})",
            oldest.name,
            format_date_relative(oldest.sort_timestamp())
        )?;
    }
    if let Some(newest) = &stats.newest {
        writeln!(
            writer,
            "Newest:     {} ({})",
            newest.name,
            format_date_relative(newest.sort_timestamp())
        )?;
    }

    let breakdown = &stats.size_breakdown;
    writeln!(
        writer,
        "Sizes:      {} under 1 MB, {} under 10 MB, {} under 100 MB, {} larger",
        breakdown.small, breakdown.medium, breakdown.large, breakdown.huge
    )?;

    Ok(())
}

/// Display a rename plan without touching any file
pub fn display_preview(
    plan: &RenamePlan,
    config: &RenameConfig,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              PREVIEW")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Sort:       {}", config.sort.description())?;
    writeln!(writer, "Pattern:    {}", config.pattern)?;
    writeln!(writer, "Padding:    {}", config.plan.padding)?;
    writeln!(writer, "Operations: {}", plan.len())?;
    writeln!(writer)?;

    if plan.is_empty() {
        writeln!(writer, "No files to rename.")?;
        return Ok(());
    }

    writeln!(writer, "Planned changes:")?;
    writeln!(writer)?;

    for entry in &plan.entries {
        writeln!(writer, "  {}. {} -> {}", entry.actual_index, entry.original_name, entry.new_name)?;

        if entry.collision_resolved {
            writeln!(
                writer,
                "     [!] Number {} was taken, used {} instead",
                entry.original_index, entry.actual_index
            )?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;
    writeln!(writer, "  {} files would be renamed", plan.len())?;

    if !plan.collisions.is_empty() {
        writeln!(
            writer,
            "  {} names were moved past existing files",
            plan.collisions.len()
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "Run 'execute' with the same options to apply these changes.")?;

    Ok(())
}

/// Display the outcome of an execution
pub fn display_execution_result(result: &OperationResult, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "Renamed {} of {} files in {} ms.",
        result.successful.len(),
        result.total_files,
        result.duration.as_millis()
    )?;

    if result.has_failures() {
        writeln!(writer)?;
        writeln!(writer, "Failed:")?;
        for failure in &result.failed {
            writeln!(
                writer,
                "  {} -> {}: {} ({})",
                failure.original_name,
                failure.new_name,
                failure.kind.description(),
                failure.error
            )?;
        }
    }

    Ok(())
}

/// Display a saved operation log
pub fn display_operation_log(log: &OperationLogFile, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Executed:   {}", log.executed_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(writer, "Directory:  {}", log.target_directory.display())?;
    writeln!(writer, "Pattern:    {}", log.settings.pattern)?;
    writeln!(writer, "Sort:       {}", log.settings.sort)?;
    writeln!(
        writer,
        "Result:     {} renamed, {} failed, {} total",
        log.summary.succeeded, log.summary.failed, log.summary.total_files
    )?;
    writeln!(writer)?;

    for entry in &log.entries {
        match &entry.error {
            Some(error) => writeln!(
                writer,
                "  FAIL {} -> {}: {}",
                entry.original_name, entry.new_name, error
            )?,
            None => writeln!(writer, "  OK   {} -> {}", entry.original_name, entry.new_name)?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{LogStatus, OperationLogEntry, RenameFailed, RenameSuccess};
    use crate::oplog::{LogSettings, LogSummary, OPLOG_VERSION};
    use crate::planner::{CollisionResolution, Padding, PreviewEntry};
    use crate::record::FileHandle;
    use crate::sorter::{compute_stats, SortKey};
    use crate::store::FailureKind;
    use chrono::Utc;
    use std::path::PathBuf;
    use std::time::Duration;

    fn record(name: &str, size: u64) -> FileRecord {
        FileRecord::new(name, size, Some(0), None, FileHandle::new(name))
    }

    fn create_test_plan() -> RenamePlan {
        RenamePlan {
            entries: vec![
                PreviewEntry {
                    original_name: "b.png".to_string(),
                    new_name: "file_001.png".to_string(),
                    original_index: 1,
                    actual_index: 1,
                    collision_resolved: false,
                    file: record("b.png", 5),
                },
                PreviewEntry {
                    original_name: "a.jpg".to_string(),
                    new_name: "file_003.jpg".to_string(),
                    original_index: 2,
                    actual_index: 3,
                    collision_resolved: true,
                    file: record("a.jpg", 10),
                },
            ],
            collisions: vec![CollisionResolution {
                file_name: "a.jpg".to_string(),
                original_name: "file_002.jpg".to_string(),
                original_index: 2,
                resolved_name: "file_003.jpg".to_string(),
                resolved_index: 3,
                attempts: 1,
            }],
        }
    }

    #[test]
    fn test_display_preview() {
        let mut output = Vec::new();

        display_preview(&create_test_plan(), &RenameConfig::default(), &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("PREVIEW"));
        assert!(output_str.contains("Pattern:    file_{number}"));
        assert!(output_str.contains("1. b.png -> file_001.png"));
        assert!(output_str.contains("3. a.jpg -> file_003.jpg"));
        assert!(output_str.contains("Number 2 was taken, used 3 instead"));
        assert!(output_str.contains("2 files would be renamed"));
        assert!(output_str.contains("1 names were moved"));
    }

    #[test]
    fn test_display_preview_empty() {
        let mut output = Vec::new();

        display_preview(&RenamePlan::default(), &RenameConfig::default(), &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("No files to rename"));
    }

    #[test]
    fn test_display_file_list() {
        let files = vec![record("a.jpg", 2048), record("b.png", 10)];
        let stats = compute_stats(&files);
        let mut output = Vec::new();

        display_file_list(&files, &stats, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("a.jpg"));
        assert!(output_str.contains("2 KB"));
        assert!(output_str.contains("Files:      2"));
        assert!(output_str.contains("Largest:    a.jpg (2 KB)"));
        assert!(output_str.contains("2 under 1 MB"));
    }

    #[test]
    fn test_display_execution_result() {
        let now = Utc::now();
        let result = OperationResult {
            successful: vec![RenameSuccess {
                original_name: "a.jpg".to_string(),
                new_name: "file_001.jpg".to_string(),
            }],
            failed: vec![RenameFailed {
                original_name: "b.jpg".to_string(),
                new_name: "file_002.jpg".to_string(),
                kind: FailureKind::Locked,
                error: "in use".to_string(),
            }],
            total_files: 2,
            started_at: now,
            finished_at: now,
            duration: Duration::from_millis(7),
        };
        let mut output = Vec::new();

        display_execution_result(&result, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("Renamed 1 of 2 files in 7 ms"));
        assert!(output_str.contains("b.jpg -> file_002.jpg: file locked (in use)"));
    }

    #[test]
    fn test_display_operation_log() {
        let log = OperationLogFile {
            version: OPLOG_VERSION.to_string(),
            executed_at: Utc::now(),
            target_directory: PathBuf::from("/photos"),
            tool_version: "0.1.0".to_string(),
            settings: LogSettings {
                sort: SortKey::SizeAsc,
                pattern: "img_{number}".to_string(),
                padding: Padding::default(),
                start_index: 1,
            },
            summary: LogSummary {
                total_files: 2,
                succeeded: 1,
                failed: 1,
                duration_ms: 3,
            },
            entries: vec![
                OperationLogEntry {
                    timestamp: Utc::now(),
                    original_name: "a.jpg".to_string(),
                    new_name: "img_001.jpg".to_string(),
                    status: LogStatus::Success,
                    error: None,
                },
                OperationLogEntry {
                    timestamp: Utc::now(),
                    original_name: "b.jpg".to_string(),
                    new_name: "img_002.jpg".to_string(),
                    status: LogStatus::Failure,
                    error: Some("denied".to_string()),
                },
            ],
        };
        let mut output = Vec::new();

        display_operation_log(&log, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("Sort:       size-asc"));
        assert!(output_str.contains("1 renamed, 1 failed, 2 total"));
        assert!(output_str.contains("OK   a.jpg -> img_001.jpg"));
        assert!(output_str.contains("FAIL b.jpg -> img_002.jpg: denied"));
    }
}
