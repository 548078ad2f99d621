//! Adapter for the external PT-TEBD propagation engine.
//!
//! The engine is a separate program. Each request is passed as a JSON
//! argument and the engine answers with a single JSON document on stdout.

use crate::config::EngineConfig;
use crate::fixtures::FixtureGenerator;
use crate::BenchError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// One PT-TEBD propagation of a spin chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineRequest {
    /// Process tensor fixture coupled to every site of the chain.
    pub process_tensor: PathBuf,
    pub chain_length: usize,
    pub tebd_order: u32,
    pub tebd_epsrel: f64,
}

impl EngineRequest {
    pub fn new(process_tensor: PathBuf, chain_length: usize) -> Self {
        Self {
            process_tensor,
            chain_length,
            tebd_order: 2,
            tebd_epsrel: 1.0e-5,
        }
    }

    pub fn with_tebd_epsrel(mut self, epsrel: f64) -> Self {
        self.tebd_epsrel = epsrel;
        self
    }
}

/// Something able to run a PT-TEBD propagation.
pub trait PropagationEngine {
    fn propagate(&self, request: &EngineRequest) -> Result<serde_json::Value, BenchError>;
}

/// Engine backed by an external program.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalEngine {
    program: String,
    args: Vec<String>,
}

impl ExternalEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn invoke(&self, subcommand: &str, extra: &[&OsStr]) -> Result<Output, BenchError> {
        debug!(program = %self.program, subcommand, "invoking engine");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(subcommand)
            .args(extra)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BenchError::Engine(format!(
                "{} {} exited with {}: {}",
                self.program,
                subcommand,
                output.status,
                stderr.trim()
            )));
        }

        Ok(output)
    }
}

impl PropagationEngine for ExternalEngine {
    fn propagate(&self, request: &EngineRequest) -> Result<serde_json::Value, BenchError> {
        let request_json = serde_json::to_string(request)?;
        let output = self.invoke("propagate", &[OsStr::new(&request_json)])?;
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

impl FixtureGenerator for ExternalEngine {
    fn generate(&self, name: &str, path: &Path) -> Result<(), BenchError> {
        self.invoke("generate-pt", &[OsStr::new(name), path.as_os_str()])?;
        Ok(())
    }
}
