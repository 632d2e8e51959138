//! YAML logging descriptor
//!
//! A descriptor replaces the default console logger wholesale. Every field is
//! optional:
//!
//! ```yaml
//! level: info
//! directives: ["mongodb=warn"]
//! console:
//!   enabled: true
//!   format: text
//!   color: true
//!   target: true
//! file:
//!   enabled: true
//!   directory: logs
//!   prefix: yaml2mongo.log
//!   rotation: daily
//!   format: json
//! ```

use crate::domain::errors::Yaml2MongoError;
use crate::domain::result::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_appender::rolling::Rotation;

/// Output format of a log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line records
    #[default]
    Text,
    /// One JSON object per record
    Json,
}

/// File rotation period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPeriod {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl From<RotationPeriod> for Rotation {
    fn from(period: RotationPeriod) -> Self {
        match period {
            RotationPeriod::Minutely => Rotation::MINUTELY,
            RotationPeriod::Hourly => Rotation::HOURLY,
            RotationPeriod::Daily => Rotation::DAILY,
            RotationPeriod::Never => Rotation::NEVER,
        }
    }
}

/// Root of the logging descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingDescriptor {
    /// Level applied to every target (trace, debug, info, warn, error)
    pub level: String,

    /// Additional `EnvFilter` directives such as `mongodb=warn`
    pub directives: Vec<String>,

    /// Console output
    pub console: ConsoleOutput,

    /// Rolling file output
    pub file: FileOutput,
}

impl Default for LoggingDescriptor {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directives: Vec::new(),
            console: ConsoleOutput::default(),
            file: FileOutput::default(),
        }
    }
}

/// Console layer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleOutput {
    pub enabled: bool,
    pub format: LogFormat,
    /// Color the level of each record
    pub color: bool,
    /// Include the record target (module path)
    pub target: bool,
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self {
            enabled: true,
            format: LogFormat::Text,
            color: true,
            target: true,
        }
    }
}

/// Rolling file layer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileOutput {
    pub enabled: bool,
    pub directory: String,
    pub prefix: String,
    pub rotation: RotationPeriod,
    pub format: LogFormat,
}

impl Default for FileOutput {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: "logs".to_string(),
            prefix: format!("{}.log", env!("CARGO_PKG_NAME")),
            rotation: RotationPeriod::Daily,
            format: LogFormat::Json,
        }
    }
}

impl LoggingDescriptor {
    /// Parses a descriptor from YAML text
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed YAML, unknown keys, or a
    /// descriptor with every output disabled.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty file parses as null; treat it as all defaults
        let descriptor: Option<Self> = serde_yaml::from_str(contents).map_err(|e| {
            Yaml2MongoError::Configuration(format!("Invalid logging descriptor: {e}"))
        })?;
        let descriptor = descriptor.unwrap_or_default();
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Reads and parses a descriptor file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Yaml2MongoError::Configuration(format!(
                "Failed to read logging descriptor {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&contents)
    }

    fn validate(&self) -> Result<()> {
        if !self.console.enabled && !self.file.enabled {
            return Err(Yaml2MongoError::Configuration(
                "Logging descriptor disables every output".to_string(),
            ));
        }
        if self.file.enabled && self.file.prefix.trim().is_empty() {
            return Err(Yaml2MongoError::Configuration(
                "file.prefix cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
