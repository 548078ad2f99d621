//! Serialization strategies for persisted results.

use crate::BenchError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

/// Encodes a results object to bytes and back.
///
/// Only object equality after a round trip is required, not stable bytes.
pub trait ResultCodec {
    fn encode<T: Serialize>(&self, value: &T, writer: &mut dyn Write) -> Result<(), BenchError>;

    fn decode<T: DeserializeOwned>(&self, reader: &mut dyn Read) -> Result<T, BenchError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCodec {
    pub pretty: bool,
}

impl JsonCodec {
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl ResultCodec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T, writer: &mut dyn Write) -> Result<(), BenchError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, value)?;
        } else {
            serde_json::to_writer(&mut *writer, value)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn decode<T: DeserializeOwned>(&self, reader: &mut dyn Read) -> Result<T, BenchError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Output format selectable from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Json,
    JsonPretty,
}

impl OutputFormat {
    pub fn codec(self) -> JsonCodec {
        match self {
            OutputFormat::Json => JsonCodec::compact(),
            OutputFormat::JsonPretty => JsonCodec::pretty(),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "json-pretty" => Ok(OutputFormat::JsonPretty),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::JsonPretty => write!(f, "json-pretty"),
        }
    }
}
