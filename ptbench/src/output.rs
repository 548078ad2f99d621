//! Terminal output for the suite binaries
//!
//! Run headers, summaries and fixture reports printed around the harness.

use colored::*;
use ptbench_runtime::fixtures::FixtureStatus;
use ptbench_runtime::{PerformanceTest, SuiteResults};
use std::path::Path;
use std::time::Duration;

/// Format a duration in human-readable form
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}μs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", nanos as f64 / 1_000_000_000.0)
    }
}

/// Print header showing how much work the run will do
pub fn print_run_header(tests: &[PerformanceTest]) {
    let parameter_sets: usize = tests
        .iter()
        .flat_map(|t| t.parameter_sets.iter())
        .map(|grid| grid.len())
        .sum();

    println!(
        "\n{} {} {} ({} parameter sets)",
        "Running".green().bold(),
        tests.len(),
        if tests.len() == 1 { "test" } else { "tests" },
        parameter_sets.to_string().cyan().bold()
    );
    println!();
}

/// Print summary footer after results were written
pub fn print_summary(results: &SuiteResults, path: &Path, elapsed: Duration) {
    println!("{}", "─".repeat(80).dimmed());
    println!(
        "{} {} tests, {} parameter sets in {}",
        "Summary:".cyan().bold(),
        results.tests().len(),
        results.call_count(),
        format_duration(elapsed).cyan()
    );
    println!("{} {}", "Saved".green().bold(), path.display());
}

pub fn format_fixture_status(status: &FixtureStatus) -> String {
    match status {
        FixtureStatus::AlreadyExists(name) => format!("Process tensor '{}' already exists.", name),
        FixtureStatus::Generated(name) => format!("Generated process tensor '{}'.", name),
    }
}

pub fn print_fixture_status(status: &FixtureStatus) {
    let line = format_fixture_status(status);
    match status {
        FixtureStatus::AlreadyExists(_) => println!("{} {}", "EXISTS".dimmed(), line.dimmed()),
        FixtureStatus::Generated(_) => println!("{} {}", "NEW".blue().bold(), line),
    }
}

/// Warn about fixtures the run will need but cannot find
pub fn print_missing_fixtures(missing: &[&str]) {
    if missing.is_empty() {
        return;
    }

    println!(
        "{} {} required process tensor(s) missing; run {} first:",
        "Warning:".yellow().bold(),
        missing.len(),
        "pt-tebd-prepare".cyan()
    );
    for name in missing {
        println!("    - {}", name);
    }
}
