//! Error type shared by the harness, persistence and fixture layers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to encode config: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    #[error("test '{test}' failed at grid {grid}, parameter set {parameter_set}: {source}")]
    TestFailed {
        test: String,
        grid: usize,
        parameter_set: usize,
        #[source]
        source: Box<BenchError>,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("engine failed: {0}")]
    Engine(String),

    #[error("invalid process tensor name '{0}'")]
    InvalidProcessTensorName(String),
}
