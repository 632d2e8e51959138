//! Structured logging setup using tracing
//!
//! This module configures process-wide logging from an optional YAML
//! descriptor, with a colored console logger as fallback.
//!
//! # Example
//!
//! ```no_run
//! use yaml2mongo::logging::setup_logging;
//!
//! let _guard = setup_logging("logging-conf.yaml", "info", "LOGGING_CONFIG", true)
//!     .expect("Failed to initialize logging");
//! tracing::info!("Application started");
//! ```

use super::descriptor::{LogFormat, LoggingDescriptor};
use crate::config::resolve_path;
use crate::domain::errors::Yaml2MongoError;
use crate::domain::Result;
use std::io::IsTerminal;
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::fmt::time::{ChronoLocal, ChronoUtc};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Default logging descriptor path
pub const DEFAULT_LOGGING_PATH: &str = "logging-conf.yaml";

/// Environment variable pointing to the logging descriptor
pub const LOGGING_ENV_KEY: &str = "LOGGING_CONFIG";

/// Type-erased layer over the global registry
pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Guard that must be kept alive for the duration of the program
/// to ensure logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }
}

/// Initialize process-wide logging
///
/// The descriptor path is `default_path` unless `env_key` names a set,
/// non-empty environment variable. If the descriptor exists it is applied
/// wholesale; otherwise a colored console logger at `default_level` is used.
/// With `utc` every timestamp is rendered in UTC.
///
/// Call exactly once per process.
///
/// # Errors
///
/// Returns an error if the level is invalid, the descriptor is malformed, the
/// log directory cannot be created, or a global subscriber is already set.
pub fn setup_logging(
    default_path: impl AsRef<Path>,
    default_level: &str,
    env_key: &str,
    utc: bool,
) -> Result<LoggingGuard> {
    let path = resolve_path(default_path, env_key);

    let (layers, file_guard, source) = if path.exists() {
        let descriptor = LoggingDescriptor::from_file(&path)?;
        let (layers, guard) = build_layers(&descriptor, utc)?;
        (layers, guard, Some(path))
    } else {
        (vec![console_fallback(default_level, utc)?], None, None)
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| {
            Yaml2MongoError::Configuration(format!("Logging already initialized: {e}"))
        })?;

    match source {
        Some(path) => tracing::debug!(descriptor = %path.display(), utc, "Logging initialized"),
        None => tracing::debug!(default_level, utc, "Console logging initialized"),
    }

    Ok(LoggingGuard::new(file_guard))
}

/// Build the layers described by a logging descriptor
///
/// The returned guard, if any, belongs to the non-blocking file writer.
pub fn build_layers(
    descriptor: &LoggingDescriptor,
    utc: bool,
) -> Result<(Vec<BoxedLayer>, Option<WorkerGuard>)> {
    let level = parse_log_level(&descriptor.level)?;
    let mut layers = Vec::new();

    if descriptor.console.enabled {
        let console = &descriptor.console;
        layers.push(fmt_layer(
            console.format,
            console.color && std::io::stderr().is_terminal(),
            console.target,
            utc,
            std::io::stderr,
            build_filter(level, &descriptor.directives)?,
        ));
    }

    let file_guard = if descriptor.file.enabled {
        let file = &descriptor.file;

        // Create the log directory if it doesn't exist
        std::fs::create_dir_all(&file.directory).map_err(|e| {
            Yaml2MongoError::Configuration(format!(
                "Failed to create log directory {}: {}",
                file.directory, e
            ))
        })?;

        let appender = RollingFileAppender::new(file.rotation.into(), &file.directory, &file.prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        layers.push(fmt_layer(
            file.format,
            false,
            true,
            utc,
            non_blocking,
            build_filter(level, &descriptor.directives)?,
        ));
        Some(guard)
    } else {
        None
    };

    Ok((layers, file_guard))
}

/// Colored console logger used when no descriptor exists
fn console_fallback(default_level: &str, utc: bool) -> Result<BoxedLayer> {
    let level = parse_log_level(default_level)?;
    Ok(fmt_layer(
        LogFormat::Text,
        std::io::stderr().is_terminal(),
        true,
        utc,
        std::io::stderr,
        build_filter(level, &[])?,
    ))
}

fn fmt_layer<W>(
    format: LogFormat,
    ansi: bool,
    target: bool,
    utc: bool,
    writer: W,
    filter: EnvFilter,
) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_target(target)
        .with_ansi(ansi)
        .with_writer(writer);

    match (format, utc) {
        (LogFormat::Text, true) => layer
            .with_timer(ChronoUtc::rfc_3339())
            .with_filter(filter)
            .boxed(),
        (LogFormat::Text, false) => layer
            .with_timer(ChronoLocal::rfc_3339())
            .with_filter(filter)
            .boxed(),
        (LogFormat::Json, true) => layer
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_filter(filter)
            .boxed(),
        (LogFormat::Json, false) => layer
            .json()
            .with_timer(ChronoLocal::rfc_3339())
            .with_filter(filter)
            .boxed(),
    }
}

/// `RUST_LOG` wins when set; otherwise the level plus extra directives
fn build_filter(level: Level, directives: &[String]) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::default().add_directive(LevelFilter::from_level(level).into());
    for directive in directives {
        let parsed = directive.parse::<Directive>().map_err(|e| {
            Yaml2MongoError::Configuration(format!("Invalid log directive '{directive}': {e}"))
        })?;
        filter = filter.add_directive(parsed);
    }
    Ok(filter)
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Yaml2MongoError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))),
    }
}
