//! Configuration schema types
//!
//! This module defines the typed application configuration read from
//! `yaml2mongo.toml`. Unknown keys are rejected so typos surface as errors.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main yaml2mongo configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; an absent file yields [`AppConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// MongoDB client settings
    pub mongodb: MongoDbConfig,

    /// Timing report settings
    pub timer: TimerConfig,

    /// File the configuration was read from, `None` when no file was found
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.mongodb.validate()?;
        self.timer.validate()?;
        Ok(())
    }

    /// True when no configuration file was loaded
    pub fn is_empty(&self) -> bool {
        self.source.is_none()
    }
}

/// MongoDB client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MongoDbConfig {
    /// Application name reported to the server
    pub app_name: String,

    /// Connect timeout in seconds
    pub connect_timeout_seconds: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_seconds: u64,

    /// Ping the server before loading so connection failures surface early
    pub verify_connection: bool,
}

impl MongoDbConfig {
    fn validate(&self) -> Result<(), String> {
        if self.app_name.trim().is_empty() {
            return Err("mongodb.app_name cannot be empty".to_string());
        }
        if self.connect_timeout_seconds == 0 {
            return Err("mongodb.connect_timeout_seconds must be greater than 0".to_string());
        }
        if self.server_selection_timeout_seconds == 0 {
            return Err(
                "mongodb.server_selection_timeout_seconds must be greater than 0".to_string(),
            );
        }
        Ok(())
    }

    /// Connect timeout as a duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Server selection timeout as a duration
    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.server_selection_timeout_seconds)
    }
}

impl Default for MongoDbConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            connect_timeout_seconds: 10,
            server_selection_timeout_seconds: 30,
            verify_connection: true,
        }
    }
}

/// Timing report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimerConfig {
    /// Report the elapsed time of the load through the log
    pub report: bool,

    /// Report template, `{elapsed}` is replaced with the seconds
    pub text: String,
}

impl TimerConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.text.contains("{elapsed}") {
            return Err("timer.text must contain the {elapsed} placeholder".to_string());
        }
        Ok(())
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            report: true,
            text: crate::core::timer::DEFAULT_TEXT.to_string(),
        }
    }
}

fn default_app_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}
