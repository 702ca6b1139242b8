mod codes;

pub use codes::ExitCode;

use crate::config::ConfigError;
use crate::executor::RenameFailed;
use crate::oplog::OpLogError;
use crate::planner::PlanError;
use crate::scanner::ScannerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Target directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("No files found in {path}")]
    NoFiles { path: PathBuf },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Invalid naming pattern")]
    InvalidPattern { errors: Vec<String> },

    #[error("Planning failed: {0}")]
    PlanFailed(#[source] PlanError),

    #[error("{count} of {total} renames failed", count = .failures.len())]
    ExecutionFailures {
        total: usize,
        failures: Vec<RenameFailed>,
    },

    #[error("Operation log error: {message}")]
    LogError {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::DirectoryNotFound { .. } => ExitCode::DirectoryNotFound,
            AppError::NotADirectory { .. } => ExitCode::DirectoryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::NoFiles { .. } => ExitCode::NoFiles,
            AppError::InvalidConfig(_) => ExitCode::InvalidArguments,
            AppError::InvalidPattern { .. } => ExitCode::InvalidPattern,
            AppError::PlanFailed(_) => ExitCode::PlanFailed,
            AppError::ExecutionFailures { .. } => ExitCode::ExecutionFailures,
            AppError::LogError { .. } => ExitCode::LogError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The specified directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::NoFiles { path } => {
                format!(
                    "No files found in:\n  {}\n\n\
                     Subdirectories are not renamed and not searched.",
                    path.display()
                )
            }

            AppError::InvalidConfig(err) => {
                format!(
                    "Invalid configuration: {}\n\n\
                     Check the command-line options and any SEQRENAME_* environment variables.",
                    err
                )
            }

            AppError::InvalidPattern { errors } => {
                let mut msg = String::from("The naming pattern is not valid:\n");
                for err in errors {
                    msg.push_str(&format!("  - {}\n", err));
                }
                msg.push_str("\nExample of a valid pattern: holiday_{number}\n");
                msg
            }

            AppError::PlanFailed(err) => {
                let mut msg = format!("Could not build a rename plan:\n  {}\n", err);
                if let Some(file) = err.offending_file() {
                    msg.push_str(&format!("\nOffending file: {}\n", file));
                }
                msg.push_str(
                    "\nNo file was renamed. Choose a different pattern or start number, \
                     or raise --max-attempts.",
                );
                msg
            }

            AppError::ExecutionFailures { total, failures } => {
                let mut msg = format!(
                    "{} of {} files could not be renamed:\n",
                    failures.len(),
                    total
                );
                for failure in failures.iter().take(10) {
                    msg.push_str(&format!(
                        "  - {} -> {} ({}): {}\n",
                        failure.original_name,
                        failure.new_name,
                        failure.kind.description(),
                        failure.error
                    ));
                }
                if failures.len() > 10 {
                    msg.push_str(&format!("  ... and {} more\n", failures.len() - 10));
                }
                msg.push_str(
                    "\nThe other files were renamed. Check file permissions and \
                     ensure no files are open.",
                );
                msg
            }

            AppError::LogError { path, message } => {
                let path_info = path
                    .as_ref()
                    .map(|p| format!("File: {}\n", p.display()))
                    .unwrap_or_default();

                format!(
                    "Operation log error:\n  {}\n{}\n\
                     Ensure the log file exists and is valid JSON.",
                    message, path_info
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::InvalidPattern { errors } => AppError::InvalidPattern { errors },
            other => AppError::PlanFailed(other),
        }
    }
}

impl From<OpLogError> for AppError {
    fn from(err: OpLogError) -> Self {
        AppError::LogError {
            path: None,
            message: err.to_string(),
        }
    }
}
