//! Diagnostics for per-field failures
//!
//! A field that cannot be anonymized keeps its original value; the failure
//! is reported as a [`Diagnostic`] to the configured [`DiagnosticsSink`].

use crate::anonymization::algorithm::Algorithm;
use crate::domain::TransformationError;
use std::fmt;
use std::sync::Mutex;

/// A non-fatal failure to anonymize one field of one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Field reference as configured
    pub field: String,
    /// Algorithm that was applied
    pub algorithm: Algorithm,
    /// What went wrong
    pub error: TransformationError,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(field: impl Into<String>, algorithm: Algorithm, error: TransformationError) -> Self {
        Self {
            field: field.into(),
            algorithm,
            error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to anonymize field '{}' with {}: {}; original value kept",
            self.field, self.algorithm, self.error
        )
    }
}

/// Receiver for diagnostics emitted during event processing
pub trait DiagnosticsSink: Send + Sync {
    /// Accept one diagnostic
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Default sink: logs every diagnostic as a warning
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        tracing::warn!(
            field = %diagnostic.field,
            algorithm = %diagnostic.algorithm,
            error = %diagnostic.error,
            "{diagnostic}"
        );
    }
}

/// Sink that keeps diagnostics in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Human-readable messages of everything emitted so far
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(ToString::to_string).collect()
    }

    /// Number of diagnostics emitted so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing has been emitted
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        // A panicking emitter cannot leave the vector half-written.
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticsSink for CollectingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.lock().push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Diagnostic {
        Diagnostic::new(
            "clientip",
            Algorithm::Ipv4Network,
            TransformationError::InvalidAddress("not-an-ip".to_string()),
        )
    }

    #[test]
    fn test_diagnostic_message() {
        assert_eq!(
            sample().to_string(),
            "Failed to anonymize field 'clientip' with IPV4_NETWORK: invalid IPv4 address: not-an-ip; original value kept"
        );
    }

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());

        sink.emit(&sample());
        sink.emit(&sample());

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.diagnostics()[0], sample());
        assert!(sink.messages()[1].contains("clientip"));
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        TracingSink.emit(&sample());
    }
}
