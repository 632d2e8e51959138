//! Domain models and types for yaml2mongo.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Document types** ([`SearchKeys`], [`UpsertOutcome`])
//! - **Error types** ([`Yaml2MongoError`], [`UpsertError`], [`TimerError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fallible operations return [`Result<T, Yaml2MongoError>`]. A single upsert
//! reports an [`UpsertError`] kind which the loader inspects before aborting:
//!
//! ```rust
//! use yaml2mongo::domain::{UpsertError, Yaml2MongoError};
//!
//! let err: Yaml2MongoError = UpsertError::from_code(Some(8000), "bad auth").into();
//! assert!(err.is_authentication());
//! ```

pub mod document;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use document::{SearchKeys, UpsertOutcome};
pub use errors::{TimerError, UpsertError, Yaml2MongoError};
pub use result::Result;
