//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - A YAML logging descriptor (`logging-conf.yaml`, overridable with `LOGGING_CONFIG`)
//! - A colored console fallback when no descriptor exists
//! - UTC timestamps
//! - Local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use yaml2mongo::logging::{setup_logging, DEFAULT_LOGGING_PATH, LOGGING_ENV_KEY};
//!
//! let _guard = setup_logging(DEFAULT_LOGGING_PATH, "info", LOGGING_ENV_KEY, true)
//!     .expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod descriptor;
pub mod structured;

// Re-export commonly used items
pub use descriptor::{LogFormat, LoggingDescriptor, RotationPeriod};
pub use structured::{
    build_layers, setup_logging, LoggingGuard, DEFAULT_LOGGING_PATH, LOGGING_ENV_KEY,
};

/// Log the start of a collection load
///
/// # Example
///
/// ```no_run
/// use yaml2mongo::log_load_start;
///
/// log_load_start!("data.yaml", "products", "name");
/// ```
#[macro_export]
macro_rules! log_load_start {
    ($filename:expr, $collection:expr, $keys:expr) => {
        tracing::info!(
            filename = %$filename,
            collection = %$collection,
            keys = %$keys,
            "Starting load"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use yaml2mongo::log_error_with_context;
/// use yaml2mongo::domain::Yaml2MongoError;
///
/// let error = Yaml2MongoError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
