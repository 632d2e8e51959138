//! Domain error types
//!
//! This module defines the error hierarchy for yaml2mongo.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Server error code reported by MongoDB Atlas when credentials are rejected
pub const ATLAS_AUTH_FAILED_CODE: i32 = 8000;

/// Server error code `AuthenticationFailed` reported by a self-hosted MongoDB
pub const SERVER_AUTH_FAILED_CODE: i32 = 18;

/// Main yaml2mongo error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum Yaml2MongoError {
    /// Configuration-related errors (TOML config, logging descriptor, URI)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upsert failures while loading documents
    #[error("Upsert error: {0}")]
    Upsert(#[from] UpsertError),

    /// Timer misuse
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// The server rejected the credentials while connecting
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// YAML data file errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl Yaml2MongoError {
    /// Returns true if the error is a rejected-credentials failure
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            Yaml2MongoError::Authentication(_)
                | Yaml2MongoError::Upsert(UpsertError::AuthenticationFailed(_))
        )
    }
}

/// Failures of a single upsert
///
/// The caller inspects the kind to decide whether the run can continue.
/// Every kind aborts a load today.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpsertError {
    /// The backend rejected the credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Any other backend failure (network, validation, duplicate key, ...)
    #[error("Operation failed{}: {message}", code_suffix(.code))]
    OperationFailed {
        /// Server error code, if the server reported one
        code: Option<i32>,
        /// Backend error message
        message: String,
    },

    /// A search key is absent from the document
    #[error("Search key '{key}' not found in document")]
    MissingSearchKey {
        /// The missing field name
        key: String,
    },
}

impl UpsertError {
    /// Classify a backend failure by its server error code
    pub fn from_code(code: Option<i32>, message: impl Into<String>) -> Self {
        match code {
            Some(ATLAS_AUTH_FAILED_CODE) | Some(SERVER_AUTH_FAILED_CODE) => {
                UpsertError::AuthenticationFailed(message.into())
            }
            _ => UpsertError::OperationFailed {
                code,
                message: message.into(),
            },
        }
    }
}

/// Misuse of a [`Timer`](crate::core::timer::Timer)
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// `start` called on a running timer
    #[error("Timer is running. Use .stop() to stop it")]
    AlreadyRunning,

    /// `stop` or `elapsed` called on a timer that was never started
    #[error("Timer is not running. Use .start() to start it")]
    NotRunning,
}

fn code_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" (code {c})")).unwrap_or_default()
}

// Conversion from std::io::Error
impl From<std::io::Error> for Yaml2MongoError {
    fn from(err: std::io::Error) -> Self {
        Yaml2MongoError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for Yaml2MongoError {
    fn from(err: toml::de::Error) -> Self {
        Yaml2MongoError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from YAML parse errors
impl From<serde_yaml::Error> for Yaml2MongoError {
    fn from(err: serde_yaml::Error) -> Self {
        Yaml2MongoError::Yaml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Yaml2MongoError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_upsert_error_conversion() {
        let upsert_err = UpsertError::MissingSearchKey {
            key: "name".to_string(),
        };
        let err: Yaml2MongoError = upsert_err.into();
        assert!(matches!(err, Yaml2MongoError::Upsert(_)));
        assert_eq!(
            err.to_string(),
            "Upsert error: Search key 'name' not found in document"
        );
    }

    #[test]
    fn test_from_code_auth() {
        let err = UpsertError::from_code(Some(8000), "bad auth : authentication failed");
        assert!(matches!(err, UpsertError::AuthenticationFailed(_)));

        let err = UpsertError::from_code(Some(18), "Authentication failed.");
        assert!(matches!(err, UpsertError::AuthenticationFailed(_)));
    }

    #[test]
    fn test_from_code_other() {
        let err = UpsertError::from_code(Some(11000), "E11000 duplicate key error");
        assert_eq!(
            err,
            UpsertError::OperationFailed {
                code: Some(11000),
                message: "E11000 duplicate key error".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "Operation failed (code 11000): E11000 duplicate key error"
        );

        let err = UpsertError::from_code(None, "connection reset");
        assert_eq!(err.to_string(), "Operation failed: connection reset");
    }

    #[test]
    fn test_is_authentication() {
        let err: Yaml2MongoError = UpsertError::AuthenticationFailed("nope".to_string()).into();
        assert!(err.is_authentication());

        let err = Yaml2MongoError::Authentication("bad auth".to_string());
        assert!(err.is_authentication());

        let err = Yaml2MongoError::Connection("refused".to_string());
        assert!(!err.is_authentication());
    }

    #[test]
    fn test_timer_error_display() {
        assert_eq!(
            TimerError::AlreadyRunning.to_string(),
            "Timer is running. Use .stop() to stop it"
        );
        assert_eq!(
            TimerError::NotRunning.to_string(),
            "Timer is not running. Use .start() to start it"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: Yaml2MongoError = io_err.into();
        assert!(matches!(err, Yaml2MongoError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: Yaml2MongoError = toml_err.into();
        assert!(matches!(err, Yaml2MongoError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("key: [unclosed").unwrap_err();
        let err: Yaml2MongoError = yaml_err.into();
        assert!(matches!(err, Yaml2MongoError::Yaml(_)));
    }

    #[test]
    fn test_timer_error_conversion() {
        let err: Yaml2MongoError = TimerError::AlreadyRunning.into();
        assert!(matches!(err, Yaml2MongoError::Timer(TimerError::AlreadyRunning)));
        assert!(!err.is_authentication());
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = Yaml2MongoError::Yaml("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
