use serde::{Deserialize, Serialize};
use std::fmt;

pub mod codec;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod fixtures;
pub mod grid;
pub mod harness;
pub mod persist;
pub mod process_tensor;
pub mod progress;
pub mod timing;

pub use codec::*;
pub use driver::*;
pub use error::BenchError;
pub use grid::*;
pub use harness::*;
pub use persist::*;
pub use timing::*;

/// A single parameter passed to a performance function.
///
/// Parameters serialize without a tag, so a grid of `[["pt"], [[1, 2, 3]]]`
/// reads naturally in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ParamValue>),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Integers widen to floats; nothing else converts.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Str(s) => write!(f, "{}", s),
            ParamValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(items: Vec<T>) -> Self {
        ParamValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Signature of a performance function: one parameter set in, one result value out.
pub type PerformanceFn = Box<dyn Fn(&[ParamValue]) -> Result<serde_json::Value, BenchError>>;

/// One entry of a test suite: a named function and the grids it runs over.
pub struct PerformanceTest {
    pub name: String,
    pub parameter_sets: Vec<ParameterGrid>,
    pub func: PerformanceFn,
}

impl PerformanceTest {
    pub fn new<F>(name: impl Into<String>, parameter_sets: Vec<ParameterGrid>, func: F) -> Self
    where
        F: Fn(&[ParamValue]) -> Result<serde_json::Value, BenchError> + 'static,
    {
        Self {
            name: name.into(),
            parameter_sets,
            func: Box::new(func),
        }
    }
}

impl fmt::Debug for PerformanceTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerformanceTest")
            .field("name", &self.name)
            .field("parameter_sets", &self.parameter_sets)
            .finish_non_exhaustive()
    }
}

/// Results of a harness run: per test, per grid, per parameter set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuiteResults(pub Vec<Vec<Vec<serde_json::Value>>>);

impl SuiteResults {
    /// Number of individual performance-function calls recorded.
    pub fn call_count(&self) -> usize {
        self.0.iter().flatten().map(Vec::len).sum()
    }

    pub fn tests(&self) -> &[Vec<Vec<serde_json::Value>>] {
        &self.0
    }
}

/// Provider of the ordered test sequence handed to a runner.
pub trait TestSuite {
    fn tests(&self) -> Vec<PerformanceTest>;
}
