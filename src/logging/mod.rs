//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output filtered by `RUST_LOG` or the configured level
//! - Local JSON file logging with rotation
//!
//! Logs go to stderr so the event stream on stdout stays clean.
//!
//! # Example
//!
//! ```no_run
//! use anonymize::logging::init_logging;
//! use anonymize::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Filter started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a filter run
///
/// # Example
///
/// ```no_run
/// use anonymize::log_run_start;
///
/// log_run_start!("stdin", "SHA256", 2);
/// ```
#[macro_export]
macro_rules! log_run_start {
    ($input:expr, $algorithm:expr, $field_count:expr) => {
        tracing::info!(
            input = %$input,
            algorithm = %$algorithm,
            field_count = $field_count,
            "Starting filter run"
        );
    };
}

/// Log the completion of a filter run
///
/// # Example
///
/// ```no_run
/// use anonymize::log_run_complete;
/// use anonymize::anonymization::FilterStats;
/// use std::time::Duration;
///
/// let stats = FilterStats::default();
/// log_run_complete!(&stats, Duration::from_secs(1));
/// ```
#[macro_export]
macro_rules! log_run_complete {
    ($stats:expr, $duration:expr) => {
        tracing::info!(
            events = $stats.events_seen,
            skipped = $stats.events_skipped,
            anonymized = $stats.fields_anonymized,
            failed = $stats.fields_failed,
            unparsable = $stats.unparsable_lines,
            duration_ms = $duration.as_millis() as u64,
            "Filter run completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use anonymize::log_error_with_context;
/// use anonymize::domain::AnonymizeError;
///
/// let error = AnonymizeError::Configuration("Invalid config".to_string());
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
