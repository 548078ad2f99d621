use crate::codec::OutputFormat;
use crate::BenchError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "ptbench.toml";

/// Where and how results are persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Results file, relative to the working directory
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub format: OutputFormat,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("tests/data/performance_results/pt_tebd.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: OutputFormat::default(),
        }
    }
}

/// Harness behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Print per-test and per-parameter-set progress lines
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

fn default_verbose() -> bool { true }

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            verbose: default_verbose(),
        }
    }
}

/// External propagation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Program invoked for every propagation and fixture generation
    #[serde(default = "default_engine_program")]
    pub program: String,

    /// Arguments placed before the subcommand
    #[serde(default)]
    pub args: Vec<String>,

    /// Directory holding process tensor fixtures
    #[serde(default = "default_process_tensor_dir")]
    pub process_tensor_dir: PathBuf,
}

fn default_engine_program() -> String { "pt-tebd-engine".to_string() }
fn default_process_tensor_dir() -> PathBuf { PathBuf::from("tests/data/process_tensors") }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: default_engine_program(),
            args: Vec::new(),
            process_tensor_dir: default_process_tensor_dir(),
        }
    }
}

/// Complete driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DriverConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub harness: HarnessConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

impl DriverConfig {
    /// Load configuration with priority: env vars > config file > defaults
    ///
    /// A missing config file falls back to defaults; a malformed one is an error.
    pub fn load() -> Result<Self, BenchError> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BenchError> {
        let contents = fs::read_to_string(path)?;
        let config: DriverConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("PTBENCH_OUTPUT") {
            self.output.path = PathBuf::from(path);
        }

        if let Ok(format) = std::env::var("PTBENCH_FORMAT") {
            if let Ok(val) = format.parse() {
                self.output.format = val;
            }
        }

        if let Ok(verbose) = std::env::var("PTBENCH_VERBOSE") {
            if let Ok(val) = verbose.parse() {
                self.harness.verbose = val;
            }
        }

        if let Ok(program) = std::env::var("PTBENCH_ENGINE") {
            self.engine.program = program;
        }

        if let Ok(dir) = std::env::var("PTBENCH_PT_DIR") {
            self.engine.process_tensor_dir = PathBuf::from(dir);
        }
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), BenchError> {
        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = DriverConfig::default();
        assert_eq!(
            config.output.path,
            PathBuf::from("tests/data/performance_results/pt_tebd.json")
        );
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.harness.verbose);
        assert_eq!(config.engine.program, "pt-tebd-engine");
        assert!(config.engine.args.is_empty());
        assert_eq!(
            config.engine.process_tensor_dir,
            PathBuf::from("tests/data/process_tensors")
        );
    }

    #[test]
    fn test_save_and_load_config() {
        let mut config = DriverConfig::default();
        config.output.format = OutputFormat::JsonPretty;
        config.engine.args = vec!["--threads".to_string(), "1".to_string()];
        let temp_file = NamedTempFile::new().unwrap();

        config.save(temp_file.path()).unwrap();
        let loaded = DriverConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("PTBENCH_OUTPUT", "out/results.json");
        env::set_var("PTBENCH_FORMAT", "json-pretty");
        env::set_var("PTBENCH_VERBOSE", "false");
        env::set_var("PTBENCH_ENGINE", "/opt/engine");
        env::set_var("PTBENCH_PT_DIR", "/data/pts");

        let mut config = DriverConfig::default();
        config.apply_env_overrides();

        assert_eq!(config.output.path, PathBuf::from("out/results.json"));
        assert_eq!(config.output.format, OutputFormat::JsonPretty);
        assert!(!config.harness.verbose);
        assert_eq!(config.engine.program, "/opt/engine");
        assert_eq!(config.engine.process_tensor_dir, PathBuf::from("/data/pts"));

        // Clean up
        env::remove_var("PTBENCH_OUTPUT");
        env::remove_var("PTBENCH_FORMAT");
        env::remove_var("PTBENCH_VERBOSE");
        env::remove_var("PTBENCH_ENGINE");
        env::remove_var("PTBENCH_PT_DIR");
    }

    #[test]
    fn test_partial_config_file() {
        let toml_content = r#"
            [output]
            format = "json-pretty"

            [engine]
            args = ["run", "--"]
        "#;

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), toml_content).unwrap();

        let config = DriverConfig::from_file(temp_file.path()).unwrap();

        // Specified values
        assert_eq!(config.output.format, OutputFormat::JsonPretty);
        assert_eq!(config.engine.args, vec!["run", "--"]);

        // Default values for unspecified fields
        assert_eq!(config.output.path, default_output_path());
        assert!(config.harness.verbose);
        assert_eq!(config.engine.program, "pt-tebd-engine");
    }

    #[test]
    fn test_save_into_missing_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join(CONFIG_FILE);

        let result = DriverConfig::default().save(&path);
        assert!(matches!(result, Err(BenchError::Io(_))));
    }

    #[test]
    fn test_malformed_config_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "[output\npath = 3").unwrap();

        let result = DriverConfig::from_file(temp_file.path());
        assert!(matches!(result, Err(BenchError::Config(_))));
    }
}
