//! The benchmark harness: runs every test over every parameter set, in order.

use crate::progress::{progress_target, write_progress, ProgressEvent};
use crate::{BenchError, PerformanceTest, SuiteResults};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, info};

/// Executes a test sequence and aggregates the results.
pub trait Runner {
    type Output: Serialize + DeserializeOwned;

    fn run_all(&self, tests: &[PerformanceTest]) -> Result<Self::Output, BenchError>;
}

/// The default runner, backed by [`run_all`].
#[derive(Debug, Clone, Copy)]
pub struct Harness {
    pub verbose: bool,
}

impl Default for Harness {
    fn default() -> Self {
        Self { verbose: true }
    }
}

impl Runner for Harness {
    type Output = SuiteResults;

    fn run_all(&self, tests: &[PerformanceTest]) -> Result<SuiteResults, BenchError> {
        run_all(tests, self.verbose)
    }
}

/// Run each test over each of its grids, calling the test function once per combination.
///
/// Progress lines go to stdout when `verbose` is set and `PTBENCH_QUIET` is not.
/// Stops at the first failing call; nothing collected so far is returned.
pub fn run_all(tests: &[PerformanceTest], verbose: bool) -> Result<SuiteResults, BenchError> {
    match progress_target(verbose) {
        Some(mut stdout) => run_all_reporting(tests, &mut stdout),
        None => run_all_reporting(tests, &mut io::sink()),
    }
}

/// [`run_all`], writing progress lines to `progress`.
pub fn run_all_reporting(
    tests: &[PerformanceTest],
    progress: &mut dyn Write,
) -> Result<SuiteResults, BenchError> {
    let mut all_results = Vec::with_capacity(tests.len());

    for test in tests {
        info!(test = %test.name, grids = test.parameter_sets.len(), "running test");
        report(progress, &ProgressEvent::Test { name: &test.name });

        let mut grid_results = Vec::with_capacity(test.parameter_sets.len());
        for (i, grid) in test.parameter_sets.iter().enumerate() {
            let combinations = grid.combinations();
            report(
                progress,
                &ProgressEvent::Grid {
                    current: i + 1,
                    total: test.parameter_sets.len(),
                    parameter_sets: combinations.len(),
                },
            );

            let mut results = Vec::with_capacity(combinations.len());
            for (j, params) in combinations.iter().enumerate() {
                report(
                    progress,
                    &ProgressEvent::ParameterSet {
                        current: j + 1,
                        total: combinations.len(),
                    },
                );
                debug!(test = %test.name, grid = i + 1, set = j + 1, "calling performance function");

                let value = (test.func)(params).map_err(|e| BenchError::TestFailed {
                    test: test.name.clone(),
                    grid: i + 1,
                    parameter_set: j + 1,
                    source: Box::new(e),
                })?;
                results.push(value);
            }
            grid_results.push(results);
        }
        all_results.push(grid_results);
    }

    Ok(SuiteResults(all_results))
}

fn report(progress: &mut dyn Write, event: &ProgressEvent) {
    // A closed progress stream must not abort the run
    if let Err(e) = write_progress(progress, event) {
        debug!(error = %e, "failed to write progress line");
    }
}
