mod types;

pub use types::*;

use chrono::Utc;
use std::time::Instant;
use tracing::{info, warn};

use crate::planner::PreviewEntry;
use crate::store::FileStore;

/// Callback fired before each rename: (current, total, original name, new name)
pub type ProgressFn<'p> = &'p mut dyn FnMut(usize, usize, &str, &str);

/// Applies rename plans one entry at a time and keeps an audit log of every attempt.
///
/// The log survives across calls to [`Executor::execute`] until
/// [`Executor::clear_log`] is called.
pub struct Executor<'a> {
    store: &'a dyn FileStore,
    log: Vec<OperationLogEntry>,
}

impl<'a> Executor<'a> {
    pub fn new(store: &'a dyn FileStore) -> Self {
        Self {
            store,
            log: Vec::new(),
        }
    }

    /// Rename every entry in plan order. A failed entry is recorded and the
    /// batch moves on; nothing already renamed is rolled back.
    pub fn execute(
        &mut self,
        entries: &[PreviewEntry],
        mut on_progress: Option<ProgressFn<'_>>,
    ) -> OperationResult {
        let started_at = Utc::now();

        if entries.is_empty() {
            return OperationResult::empty(started_at);
        }

        let clock = Instant::now();
        let total = entries.len();
        let mut result = OperationResult::empty(started_at);
        result.total_files = total;

        info!(total, "Executing rename plan");

        for (i, entry) in entries.iter().enumerate() {
            if let Some(callback) = on_progress.as_mut() {
                callback(i + 1, total, &entry.original_name, &entry.new_name);
            }

            match self.store.rename(entry.handle(), &entry.new_name) {
                Ok(()) => {
                    info!("Renamed: {} -> {}", entry.original_name, entry.new_name);
                    self.record(entry, LogStatus::Success, None);
                    result.successful.push(RenameSuccess {
                        original_name: entry.original_name.clone(),
                        new_name: entry.new_name.clone(),
                    });
                }
                Err(failure) => {
                    warn!(
                        "Rename failed: {} -> {}: {}",
                        entry.original_name, entry.new_name, failure
                    );
                    self.record(entry, LogStatus::Failure, Some(failure.message.clone()));
                    result.failed.push(RenameFailed {
                        original_name: entry.original_name.clone(),
                        new_name: entry.new_name.clone(),
                        kind: failure.kind,
                        error: failure.message,
                    });
                }
            }
        }

        result.finished_at = Utc::now();
        result.duration = clock.elapsed();

        info!(
            succeeded = result.successful.len(),
            failed = result.failed.len(),
            duration_ms = result.duration.as_millis() as u64,
            "Execution complete"
        );

        result
    }

    pub fn log(&self) -> &[OperationLogEntry] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn record(&mut self, entry: &PreviewEntry, status: LogStatus, error: Option<String>) {
        self.log.push(OperationLogEntry {
            timestamp: Utc::now(),
            original_name: entry.original_name.clone(),
            new_name: entry.new_name.clone(),
            status,
            error,
        });
    }
}
