//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Field values** ([`FieldValue`], [`Scalar`]) with an explicit scalar/sequence split
//! - **Records** ([`Record`] trait and the JSON-backed [`Event`])
//! - **Error types** ([`AnonymizeError`], [`TransformationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use anonymize::domain::{Event, FieldValue, Record, Scalar};
//!
//! # fn example() -> anonymize::domain::Result<()> {
//! let mut event = Event::from_json_str(r#"{"user": {"email": "jane@example.com"}}"#)?;
//! assert!(event.has_field("[user][email]"));
//!
//! event.set_field("[user][email]", FieldValue::Scalar(Scalar::from("redacted")));
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod event;
pub mod result;
pub mod value;

// Re-export commonly used types for convenience
pub use errors::{AnonymizeError, TransformationError};
pub use event::{Event, Record};
pub use result::Result;
pub use value::{FieldValue, Scalar};
