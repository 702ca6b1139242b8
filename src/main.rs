use clap::Parser;
use seqrename::cli::{Args, Command, ExecuteArgs, ListArgs, PlanArgs};
use seqrename::config::{ConfigError, RenameConfig};
use seqrename::error::AppError;
use seqrename::executor::Executor;
use seqrename::output::{
    display_execution_result, display_file_list, display_operation_log, display_preview,
};
use seqrename::planner::{plan_renames, RenamePlan};
use seqrename::progress::Progress;
use seqrename::scanner::enumerate_files;
use seqrename::sorter::{
    compute_stats, filter_by_date_range, filter_by_extension, filter_by_size, search_by_name,
    sort_files, SortKey,
};
use seqrename::store::LocalFolder;
use seqrename::{logging, oplog};
use std::io;
use std::path::Path;
use tracing::{debug, error, info};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    debug!("Environment loaded");

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut progress = Progress::new_with_ui(args.verbose > 0);

    match &args.command {
        Command::List(list) => run_list(list, &mut progress),
        Command::Preview(plan) => run_preview(plan, &mut progress),
        Command::Execute(exec) => run_execute(exec, &mut progress),
        Command::Log { file } => run_show_log(file),
    }
}

fn run_list(args: &ListArgs, progress: &mut Progress) -> Result<(), AppError> {
    let sort = args
        .sort
        .as_deref()
        .map(|s| s.parse::<SortKey>().map_err(ConfigError::from))
        .transpose()?;

    progress.scan_start(&args.target_dir);
    let mut files = enumerate_files(&args.target_dir)?;
    progress.scan_complete(files.len());

    if !args.extensions.is_empty() {
        files = filter_by_extension(&files, &args.extensions);
    }
    if let Some(query) = &args.search {
        files = search_by_name(&files, query);
    }
    if args.min_size.is_some() || args.max_size.is_some() {
        files = filter_by_size(&files, args.min_size, args.max_size);
    }
    let (since, until) = args.date_range();
    if since.is_some() || until.is_some() {
        files = filter_by_date_range(&files, since, until);
    }
    if let Some(key) = sort {
        files = sort_files(&files, key);
    }

    info!("{} files match", files.len());

    let stats = compute_stats(&files);
    display_file_list(&files, &stats, &mut io::stdout()).map_err(display_error)
}

fn run_preview(args: &PlanArgs, progress: &mut Progress) -> Result<(), AppError> {
    let config = RenameConfig::resolve(&args.config)?;
    let plan = build_plan(&args.target_dir, &config, progress)?;

    display_preview(&plan, &config, &mut io::stdout()).map_err(display_error)
}

fn run_execute(args: &ExecuteArgs, progress: &mut Progress) -> Result<(), AppError> {
    let target_dir = &args.plan.target_dir;
    let config = RenameConfig::resolve(&args.plan.config)?;
    let plan = build_plan(target_dir, &config, progress)?;

    let store = LocalFolder::new(target_dir);
    let mut executor = Executor::new(&store);

    let mut report = |current: usize, total: usize, from: &str, to: &str| {
        progress.rename_progress(current, total, from, to);
    };
    let result = executor.execute(&plan.entries, Some(&mut report));

    for failure in &result.failed {
        let reason = format!("{}: {}", failure.kind.description(), failure.error);
        progress.rename_failed(&failure.original_name, &reason);
    }
    progress.execution_complete(result.successful.len(), result.failed.len());

    display_execution_result(&result, &mut io::stdout()).map_err(display_error)?;

    let log_outcome = if args.no_log {
        debug!("Operation log disabled");
        Ok(())
    } else {
        match oplog::write_operation_log(executor.log(), &result, &config, target_dir) {
            Ok(path) => {
                progress.log_written(&path);
                Ok(())
            }
            Err(e) => Err(AppError::LogError {
                path: None,
                message: e.to_string(),
            }),
        }
    };

    if result.has_failures() {
        if let Err(e) = &log_outcome {
            progress.warn(&e.to_string());
        }
        return Err(AppError::ExecutionFailures {
            total: result.total_files,
            failures: result.failed,
        });
    }

    log_outcome
}

fn run_show_log(file: &Path) -> Result<(), AppError> {
    let log = oplog::read_operation_log(file).map_err(|e| AppError::LogError {
        path: Some(file.to_path_buf()),
        message: e.to_string(),
    })?;

    display_operation_log(&log, &mut io::stdout()).map_err(display_error)
}

/// Enumerate, sort and plan; the filesystem is only read
fn build_plan(
    target_dir: &Path,
    config: &RenameConfig,
    progress: &mut Progress,
) -> Result<RenamePlan, AppError> {
    progress.scan_start(target_dir);
    let files = enumerate_files(target_dir)?;
    progress.scan_complete(files.len());

    if files.is_empty() {
        return Err(AppError::NoFiles {
            path: target_dir.to_path_buf(),
        });
    }

    progress.plan_start(files.len(), config.sort);
    let sorted = sort_files(&files, config.sort);

    let store = LocalFolder::new(target_dir);
    let plan = plan_renames(&sorted, &config.pattern, &config.plan, &store)?;
    progress.plan_complete(plan.len(), plan.collisions.len());

    Ok(plan)
}

fn display_error(e: io::Error) -> AppError {
    AppError::Other(format!("Failed to display output: {}", e))
}
