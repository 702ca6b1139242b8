pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod oplog;
pub mod output;
pub mod planner;
pub mod progress;
pub mod record;
pub mod scanner;
pub mod sorter;
pub mod store;
pub mod validator;

pub use config::{ConfigError, RenameConfig};
pub use error::{AppError, ExitCode};
pub use executor::{Executor, OperationLogEntry, OperationResult, RenameFailed, RenameSuccess};
pub use oplog::{read_operation_log, write_operation_log, OpLogError, OperationLogFile};
pub use planner::{
    build_sequence_name, plan_renames, CollisionResolution, Padding, PlanError, PlanOptions,
    PreviewEntry, RenamePlan,
};
pub use record::{FileHandle, FileRecord};
pub use scanner::{enumerate_files, ScannerError};
pub use sorter::{compute_stats, sort_files, FileStats, SortKey};
pub use store::{FailureKind, FileStore, LocalFolder, RenameFailure};
pub use validator::{validate_pattern, PatternValidation};
