//! Configuration management for yaml2mongo.
//!
//! This module provides TOML-based configuration loading and validation.
//!
//! # Overview
//!
//! The configuration file is optional. Its path defaults to `yaml2mongo.toml`
//! and can be overridden with the `APP_CONFIG` environment variable. A missing
//! file yields the default configuration; a malformed file is a fatal error.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use yaml2mongo::config::read_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = read_config("yaml2mongo.toml", "APP_CONFIG")?;
//! println!("Application name: {}", config.mongodb.app_name);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [mongodb]
//! app_name = "yaml2mongo"
//! connect_timeout_seconds = 10
//! server_selection_timeout_seconds = 30
//! verify_connection = true
//!
//! [timer]
//! report = true
//! text = "Elapsed time: {elapsed} seconds"
//! ```
//!
//! Credentials never live in this file: they come from `--username`/`--password`
//! or the `MONGODB_USERNAME`/`MONGODB_PASSWORD` environment variables.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, read_config, read_config_table, resolve_path};
pub use schema::{AppConfig, MongoDbConfig, TimerConfig};
pub use secret::{secret_string, SecretString, SecretValue};
