use chrono::{Local, NaiveDate, TimeZone};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seqrename")]
#[command(author, version, long_about = None)]
#[command(about = "Rename the files of a folder into a sequential naming scheme")]
pub struct Args {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the files of a folder with size and date statistics
    List(ListArgs),

    /// Show the rename plan without modifying the filesystem
    Preview(PlanArgs),

    /// Rename the files of a folder according to the plan
    Execute(ExecuteArgs),

    /// Show an operation log written by a previous execution
    Log {
        /// Operation log file
        #[arg(value_name = "LOG_FILE")]
        file: PathBuf,
    },
}

/// Naming settings; unset values fall back to SEQRENAME_* variables, then defaults
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Sort order: size-asc, size-desc, date-asc, date-desc
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Naming pattern containing a single {number} placeholder
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Zero-padding width of the number: 0, 2, 3, 4 or 5
    #[arg(long)]
    pub padding: Option<u8>,

    /// First sequence number
    #[arg(long)]
    pub start: Option<u64>,

    /// Maximum number of later indices tried when a name is taken
    #[arg(long)]
    pub max_attempts: Option<u32>,
}

#[derive(clap::Args, Debug)]
pub struct PlanArgs {
    /// Folder containing the files to rename
    pub target_dir: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(clap::Args, Debug)]
pub struct ExecuteArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Do not write an operation log into the target folder
    #[arg(long)]
    pub no_log: bool,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Folder to list
    pub target_dir: PathBuf,

    /// Sort order: size-asc, size-desc, date-asc, date-desc
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Only files with this extension (repeatable)
    #[arg(short, long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Only files whose name contains this text (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Minimum size in bytes
    #[arg(long)]
    pub min_size: Option<u64>,

    /// Maximum size in bytes
    #[arg(long)]
    pub max_size: Option<u64>,

    /// Only files created on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub since: Option<NaiveDate>,

    /// Only files created on or before this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub until: Option<NaiveDate>,
}

impl ListArgs {
    /// Inclusive date bounds as ms since epoch, in local time
    pub fn date_range(&self) -> (Option<i64>, Option<i64>) {
        let start = self
            .since
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .and_then(|dt| Local.from_local_datetime(&dt).earliest())
            .map(|dt| dt.timestamp_millis());
        let end = self
            .until
            .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
            .and_then(|dt| Local.from_local_datetime(&dt).latest())
            .map(|dt| dt.timestamp_millis());
        (start, end)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}
