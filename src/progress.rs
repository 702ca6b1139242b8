//! Progress output for user-facing status updates.
//!
//! In verbose mode, output is suppressed since tracing handles everything.
//! In normal mode, output goes to stderr, colored when the terminal allows it.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::sorter::SortKey;

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    /// When true, output is colorized
    colors_enabled: bool,
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Create a new progress reporter writing to stderr
    pub fn new() -> Self {
        Self::new_with_ui(false)
    }

    /// When verbose=true, output is suppressed (tracing handles it)
    pub fn new_with_ui(verbose: bool) -> Self {
        Self {
            writer: Box::new(io::stderr()),
            silent: verbose,
            colors_enabled: should_use_colors(),
        }
    }

    /// Create a progress reporter with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    pub fn scan_start(&mut self, path: &Path) {
        if self.silent {
            return;
        }
        let msg = format!("Scanning {}...", path.display());
        if self.colors_enabled {
            let _ = write!(self.writer, "{}", msg.dimmed());
        } else {
            let _ = write!(self.writer, "{}", msg);
        }
        let _ = self.writer.flush();
    }

    /// Finish the scan line started by `scan_start`
    pub fn scan_complete(&mut self, count: usize) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, " {}", format!("{} files", count).green());
        } else {
            let _ = writeln!(self.writer, " {} files", count);
        }
    }

    pub fn plan_start(&mut self, count: usize, sort: SortKey) {
        if self.silent {
            return;
        }
        let msg = format!("Planning {} renames ({})", count, sort.description());
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    pub fn plan_complete(&mut self, entries: usize, collisions: usize) {
        if self.silent || collisions == 0 {
            return;
        }
        self.warn(&format!(
            "{} of {} names were moved to a later number to avoid existing files",
            collisions, entries
        ));
    }

    /// Report progress on a single rename
    pub fn rename_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                counter.cyan(),
                from.dimmed(),
                "→".cyan(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "[{}/{}] {} -> {}", current, total, from, to);
        }
    }

    /// Report a rename that failed (the batch continues)
    pub fn rename_failed(&mut self, from: &str, error: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "      {} {}",
                "✗".red().bold(),
                format!("{}: {}", from, error).red()
            );
        } else {
            let _ = writeln!(self.writer, "      failed: {}: {}", from, error);
        }
    }

    pub fn execution_complete(&mut self, succeeded: usize, failed: usize) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if failed == 0 {
            if self.colors_enabled {
                let _ = writeln!(
                    self.writer,
                    "{} {}",
                    "✓".green().bold(),
                    format!("{} files renamed", succeeded).green()
                );
            } else {
                let _ = writeln!(self.writer, "Done. {} files renamed.", succeeded);
            }
        } else {
            self.warn(&format!("{} files renamed, {} failed", succeeded, failed));
        }
    }

    /// Report operation log written
    pub fn log_written(&mut self, path: &Path) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Operation log saved to: {}", path.display()).dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "Operation log saved to: {}", path.display());
        }
    }

    /// Report a non-fatal problem
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }
}
