use anyhow::{Context, Result};
use ptbench::output;
use ptbench::pt_tebd::REQUIRED_PTS;
use ptbench_runtime::config::DriverConfig;
use ptbench_runtime::engine::ExternalEngine;
use ptbench_runtime::fixtures::{prepare, FixtureStore};

fn main() -> Result<()> {
    ptbench::init_logging();

    let config = DriverConfig::load().context("Failed to load configuration")?;
    let engine = ExternalEngine::from_config(&config.engine);
    let store = FixtureStore::new(&config.engine.process_tensor_dir);

    let statuses = prepare(&store, REQUIRED_PTS, &engine)
        .with_context(|| format!("Failed to prepare fixtures in {}", store.dir().display()))?;

    for status in &statuses {
        output::print_fixture_status(status);
    }
    println!("All done.");

    Ok(())
}
