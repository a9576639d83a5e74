//! Domain error types
//!
//! This module defines the error hierarchy for the anonymize filter.
//! Configuration problems are fatal at startup, transformation problems are
//! scoped to a single field of a single event.

use thiserror::Error;

/// Main error type
///
/// Returned by configuration loading, algorithm resolution and the CLI host.
/// Per-field failures travel as [`TransformationError`] and only become an
/// `AnonymizeError` when a caller chooses to propagate them.
#[derive(Debug, Error)]
pub enum AnonymizeError {
    /// Configuration-related errors (unknown algorithm, missing key, bad prefix)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A single value could not be anonymized
    #[error("Transformation error: {0}")]
    Transformation(#[from] TransformationError),

    /// An algorithm dispatch branch that validation should have ruled out
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors raised while anonymizing one value
///
/// These never abort a record: the field keeps its original value and the
/// error is reported through the diagnostics sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformationError {
    /// The value is not a well-formed IPv4 address
    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),

    /// The value has a shape the algorithm (or the record model) cannot handle
    #[error("unsupported value for {algorithm}: {kind}")]
    UnsupportedValue {
        algorithm: String,
        kind: String,
    },

    /// The field holds something other than a scalar or a flat array of scalars
    #[error("field value of type {0} cannot be anonymized")]
    UnsupportedShape(String),

    /// The hash function itself failed
    #[error("hashing failed: {0}")]
    Hash(String),
}

impl TransformationError {
    /// Shorthand for [`TransformationError::UnsupportedValue`]
    pub fn unsupported(algorithm: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            algorithm: algorithm.into(),
            kind: kind.into(),
        }
    }
}

impl From<std::io::Error> for AnonymizeError {
    fn from(err: std::io::Error) -> Self {
        AnonymizeError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AnonymizeError {
    fn from(err: serde_json::Error) -> Self {
        AnonymizeError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for AnonymizeError {
    fn from(err: toml::de::Error) -> Self {
        AnonymizeError::Configuration(format!("TOML parse error: {err}"))
    }
}
