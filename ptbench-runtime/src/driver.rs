//! Runs a test suite through a runner and persists what it returns.

use crate::codec::ResultCodec;
use crate::harness::Runner;
use crate::persist::save_results;
use crate::{BenchError, PerformanceTest, TestSuite};
use std::path::{Path, PathBuf};
use tracing::info;

/// Wires a test suite, a runner and a codec to a fixed output path.
pub struct Driver<S, R, C> {
    suite: S,
    runner: R,
    codec: C,
    output: PathBuf,
}

impl<S, R, C> Driver<S, R, C>
where
    S: TestSuite,
    R: Runner,
    C: ResultCodec,
{
    pub fn new<P: AsRef<Path>>(suite: S, runner: R, codec: C, output: P) -> Self {
        Self {
            suite,
            runner,
            codec,
            output: output.as_ref().to_path_buf(),
        }
    }

    pub fn suite(&self) -> &S {
        &self.suite
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Hand the full test sequence to the runner and return its result.
    pub fn run(&self) -> Result<R::Output, BenchError> {
        self.run_tests(&self.suite.tests())
    }

    /// Like [`run`](Self::run), for a test sequence already taken from the suite.
    pub fn run_tests(&self, tests: &[PerformanceTest]) -> Result<R::Output, BenchError> {
        info!(tests = tests.len(), "starting run");
        self.runner.run_all(tests)
    }

    /// Write `results` to the output path, replacing any previous file.
    pub fn persist(&self, results: &R::Output) -> Result<(), BenchError> {
        save_results(results, &self.output, &self.codec)?;
        info!(path = %self.output.display(), "results saved");
        Ok(())
    }

    /// Run, then persist. The output file is untouched if the run fails.
    pub fn execute(&self) -> Result<R::Output, BenchError> {
        let results = self.run()?;
        self.persist(&results)?;
        Ok(results)
    }
}
