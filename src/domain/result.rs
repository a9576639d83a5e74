//! Result type alias
//!
//! Convenience alias that uses [`AnonymizeError`] as the error type.

use super::errors::AnonymizeError;

/// Result type alias for fallible anonymize operations
///
/// # Examples
///
/// ```
/// use anonymize::domain::result::Result;
/// use anonymize::domain::errors::AnonymizeError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AnonymizeError::Configuration("key must not be empty".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AnonymizeError>;
