//! Progress reporting for harness execution.
//!
//! Emits one line per test, per grid and per parameter set while the
//! harness runs, normally to stdout.

use colored::*;
use std::io::{self, Write};

/// Position of the harness within a run.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent<'a> {
    /// A test is starting.
    Test { name: &'a str },
    /// A parameter grid within the current test is starting.
    Grid {
        /// 1-based grid index.
        current: usize,
        total: usize,
        /// Combinations in this grid.
        parameter_sets: usize,
    },
    /// A single parameter set is about to run.
    ParameterSet {
        /// 1-based parameter set index.
        current: usize,
        total: usize,
    },
}

impl ProgressEvent<'_> {
    /// Plain-text line for this event.
    pub fn line(&self) -> String {
        match self {
            ProgressEvent::Test { name } => format!("# Run {}:", name),
            ProgressEvent::Grid {
                current,
                total,
                parameter_sets,
            } => format!("## {}/{}: {} parameter sets:", current, total, parameter_sets),
            ProgressEvent::ParameterSet { current, total } => {
                format!("### parameter set {} of {}:", current, total)
            }
        }
    }
}

/// Check if progress output is enabled (not suppressed via env var).
pub fn progress_enabled() -> bool {
    std::env::var("PTBENCH_QUIET").is_err()
}

/// Stdout when a verbose run should print progress, `None` when silenced.
pub fn progress_target(verbose: bool) -> Option<io::Stdout> {
    (verbose && progress_enabled()).then(io::stdout)
}

/// Write the colored line for `event` to `out`.
pub fn write_progress(out: &mut dyn Write, event: &ProgressEvent) -> io::Result<()> {
    let line = event.line();
    match event {
        ProgressEvent::Test { .. } => writeln!(out, "{}", line.green().bold()),
        ProgressEvent::Grid { .. } => writeln!(out, "{}", line.cyan()),
        ProgressEvent::ParameterSet { .. } => writeln!(out, "{}", line.dimmed()),
    }
}
