use anyhow::{Context, Result};
use ptbench::output;
use ptbench::pt_tebd::{PtTebdSuite, REQUIRED_PTS};
use ptbench_runtime::config::DriverConfig;
use ptbench_runtime::engine::ExternalEngine;
use ptbench_runtime::fixtures::FixtureStore;
use ptbench_runtime::{time_call, Driver, Harness, TestSuite};
use std::rc::Rc;
use tracing::warn;

fn main() -> Result<()> {
    ptbench::init_logging();

    let config = DriverConfig::load().context("Failed to load configuration")?;

    let engine = Rc::new(ExternalEngine::from_config(&config.engine));
    let store = FixtureStore::new(&config.engine.process_tensor_dir);
    let suite = PtTebdSuite::new(engine, store);

    let missing = suite.store().missing(REQUIRED_PTS);
    if !missing.is_empty() {
        warn!(count = missing.len(), "required process tensors missing");
        output::print_missing_fixtures(&missing);
    }

    let driver = Driver::new(
        suite,
        Harness {
            verbose: config.harness.verbose,
        },
        config.output.format.codec(),
        &config.output.path,
    );

    let tests = driver.suite().tests();
    output::print_run_header(&tests);

    let (results, elapsed) = time_call(|| driver.run_tests(&tests));
    let results = results.context("Performance run failed")?;

    driver
        .persist(&results)
        .with_context(|| format!("Failed to write {}", driver.output_path().display()))?;

    output::print_summary(&results, driver.output_path(), elapsed);

    Ok(())
}
