//! Configuration loader with TOML parsing and an environment path override

use super::schema::AppConfig;
use crate::domain::errors::Yaml2MongoError;
use crate::domain::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file, next to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "yaml2mongo.toml";

/// Environment variable pointing to the configuration file
pub const CONFIG_ENV_KEY: &str = "APP_CONFIG";

/// Resolves the effective path of an optional configuration file
///
/// A set, non-empty `env_key` variable wins over `default_path`.
pub fn resolve_path(default_path: impl AsRef<Path>, env_key: &str) -> PathBuf {
    match std::env::var(env_key) {
        Ok(value) if !value.is_empty() => PathBuf::from(value),
        _ => default_path.as_ref().to_path_buf(),
    }
}

/// Reads the configuration file as an untyped TOML table
///
/// This function:
/// 1. Resolves the path (`env_key` overrides `default_path`)
/// 2. Returns an empty table if the file does not exist
/// 3. Parses the file as TOML
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML. Parse
/// errors are logged with their full diagnostic before being returned.
///
/// # Examples
///
/// ```no_run
/// use yaml2mongo::config::read_config_table;
///
/// let table = read_config_table("yaml2mongo.toml", "APP_CONFIG").expect("Malformed config");
/// if table.is_empty() {
///     println!("No configuration");
/// }
/// ```
pub fn read_config_table(default_path: impl AsRef<Path>, env_key: &str) -> Result<toml::Table> {
    let path = resolve_path(default_path, env_key);
    match read_toml(&path)? {
        Some(contents) => parse_logged(&path, &contents),
        None => Ok(toml::Table::new()),
    }
}

/// Loads the typed application configuration
///
/// Same resolution and missing-file rules as [`read_config_table`]; the
/// parsed table is then checked against [`AppConfig`] and validated.
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - The file contains unknown keys or wrongly typed values
/// - Configuration validation fails
pub fn read_config(default_path: impl AsRef<Path>, env_key: &str) -> Result<AppConfig> {
    let path = resolve_path(default_path, env_key);
    let Some(contents) = read_toml(&path)? else {
        tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
        return Ok(AppConfig::default());
    };

    let mut config: AppConfig = parse_logged(&path, &contents)?;

    config.validate().map_err(|e| {
        Yaml2MongoError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    config.source = Some(path);
    Ok(config)
}

/// Loads the configuration from the default path and `APP_CONFIG`
pub fn load_config() -> Result<AppConfig> {
    read_config(DEFAULT_CONFIG_PATH, CONFIG_ENV_KEY)
}

fn read_toml(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        Yaml2MongoError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(Some(contents))
}

fn parse_logged<T: serde::de::DeserializeOwned>(path: &Path, contents: &str) -> Result<T> {
    toml::from_str(contents).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to parse configuration file");
        Yaml2MongoError::from(e)
    })
}
