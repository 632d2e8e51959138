//! Result type alias for yaml2mongo

use super::errors::Yaml2MongoError;

/// Result type alias for yaml2mongo operations
///
/// # Examples
///
/// ```
/// use yaml2mongo::domain::result::Result;
/// use yaml2mongo::domain::errors::Yaml2MongoError;
///
/// fn failing_function() -> Result<()> {
///     Err(Yaml2MongoError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Yaml2MongoError>;
