//! PT-TEBD performance tests.
//!
//! Each test propagates a spin chain whose sites all couple to the same
//! spin-boson process tensor and records how long the engine takes.

use ptbench_runtime::engine::{EngineRequest, PropagationEngine};
use ptbench_runtime::fixtures::FixtureStore;
use ptbench_runtime::{
    seconds, time_fallible, BenchError, ParamValue, ParameterGrid, PerformanceTest, TestSuite,
};
use serde_json::json;
use std::rc::Rc;

pub const SPIN_BOSON_PT: &str =
    "spinBoson_alpha0.25_zeta1.0_T39.3_cutoff1.0expon_tcut227.9_dt10_steps06_epsrel15";

/// Process tensors the suite reads from the fixture store.
pub const REQUIRED_PTS: &[&str] = &[SPIN_BOSON_PT];

// -- Test A: cost with chain length ------------------------------------------

fn parameters_a1() -> ParameterGrid {
    ParameterGrid::default()
        .axis([SPIN_BOSON_PT])
        .axis([ParamValue::from((1..=10).map(|n| n as i64).collect::<Vec<_>>())])
}

/// Propagate chains of every length in the list; returns the lengths and runtimes in seconds.
fn chain_length_performance<E: PropagationEngine>(
    engine: &E,
    store: &FixtureStore,
    params: &[ParamValue],
) -> Result<serde_json::Value, BenchError> {
    let pt_name = str_param(params, 0, "process_tensor_name")?;
    let chain_lengths = list_param(params, 1, "chain_lengths")?
        .iter()
        .map(|n| positive(n.as_int(), "chain_lengths"))
        .collect::<Result<Vec<_>, _>>()?;

    let mut runtimes = Vec::with_capacity(chain_lengths.len());
    for &n in &chain_lengths {
        let request = EngineRequest::new(store.path_for(pt_name), n);
        let (_, elapsed) = time_fallible(|| engine.propagate(&request))?;
        runtimes.push(seconds(elapsed));
    }

    Ok(json!({
        "chain_lengths": chain_lengths,
        "runtimes": runtimes,
    }))
}

// -- Test B: cost with TEBD precision ----------------------------------------

fn parameters_b1() -> ParameterGrid {
    ParameterGrid::default()
        .axis([SPIN_BOSON_PT])
        .axis([5i64])
        .axis([1.0e-5, 1.0e-6, 1.0e-7])
}

/// Propagate one chain at the given SVD truncation precision.
fn tebd_epsrel_performance<E: PropagationEngine>(
    engine: &E,
    store: &FixtureStore,
    params: &[ParamValue],
) -> Result<serde_json::Value, BenchError> {
    let pt_name = str_param(params, 0, "process_tensor_name")?;
    let chain_length = positive(param(params, 1, "chain_length")?.as_int(), "chain_length")?;
    let epsrel = param(params, 2, "tebd_epsrel")?
        .as_float()
        .filter(|e| *e > 0.0)
        .ok_or_else(|| BenchError::InvalidParameter("tebd_epsrel must be a positive number".to_string()))?;

    let request = EngineRequest::new(store.path_for(pt_name), chain_length).with_tebd_epsrel(epsrel);
    let (result, elapsed) = time_fallible(|| engine.propagate(&request))?;

    Ok(json!({
        "chain_length": chain_length,
        "tebd_epsrel": epsrel,
        "runtime": seconds(elapsed),
        "result": result,
    }))
}

// ----------------------------------------------------------------------------

/// The ordered PT-TEBD test list.
pub fn all_tests<E>(engine: Rc<E>, store: &FixtureStore) -> Vec<PerformanceTest>
where
    E: PropagationEngine + 'static,
{
    let a_engine = Rc::clone(&engine);
    let a_store = store.clone();
    let b_store = store.clone();

    vec![
        PerformanceTest::new(
            "chain_length_performance",
            vec![parameters_a1()],
            move |params: &[ParamValue]| chain_length_performance(&*a_engine, &a_store, params),
        ),
        PerformanceTest::new(
            "tebd_epsrel_performance",
            vec![parameters_b1()],
            move |params: &[ParamValue]| tebd_epsrel_performance(&*engine, &b_store, params),
        ),
    ]
}

/// Suite provider handed to the driver.
pub struct PtTebdSuite<E> {
    engine: Rc<E>,
    store: FixtureStore,
}

impl<E> PtTebdSuite<E> {
    pub fn new(engine: Rc<E>, store: FixtureStore) -> Self {
        Self { engine, store }
    }

    pub fn store(&self) -> &FixtureStore {
        &self.store
    }
}

impl<E: PropagationEngine + 'static> TestSuite for PtTebdSuite<E> {
    fn tests(&self) -> Vec<PerformanceTest> {
        all_tests(Rc::clone(&self.engine), &self.store)
    }
}

fn param<'a>(params: &'a [ParamValue], idx: usize, name: &str) -> Result<&'a ParamValue, BenchError> {
    params
        .get(idx)
        .ok_or_else(|| BenchError::InvalidParameter(format!("missing parameter '{}'", name)))
}

fn str_param<'a>(params: &'a [ParamValue], idx: usize, name: &str) -> Result<&'a str, BenchError> {
    param(params, idx, name)?
        .as_str()
        .ok_or_else(|| BenchError::InvalidParameter(format!("'{}' must be a string", name)))
}

fn list_param<'a>(
    params: &'a [ParamValue],
    idx: usize,
    name: &str,
) -> Result<&'a [ParamValue], BenchError> {
    param(params, idx, name)?
        .as_list()
        .ok_or_else(|| BenchError::InvalidParameter(format!("'{}' must be a list", name)))
}

fn positive(value: Option<i64>, name: &str) -> Result<usize, BenchError> {
    match value {
        Some(v) if v > 0 => Ok(v as usize),
        _ => Err(BenchError::InvalidParameter(format!(
            "'{}' must be a positive integer",
            name
        ))),
    }
}
