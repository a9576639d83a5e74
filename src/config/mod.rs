//! Configuration management
//!
//! TOML configuration loading, environment substitution and validation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use anonymize::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("anonymize.toml")?;
//!
//! println!("Algorithm: {}", config.anonymize.algorithm);
//! println!("Fields: {:?}", config.anonymize.fields);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`LoggingConfig`] - Local JSON file logging
//! - [`AnonymizeConfig`](crate::anonymization::AnonymizeConfig) - Fields,
//!   key, algorithm and eligibility condition
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymize]
//! fields = ["clientip", "[user][email]"]
//! key = "${ANONYMIZE_KEY}"
//! algorithm = "SHA256"
//!
//! [anonymize.condition]
//! tags = ["web"]
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders are substituted before parsing. After parsing,
//! `ANONYMIZE_APPLICATION_LOG_LEVEL`, `ANONYMIZE_KEY`, `ANONYMIZE_ALGORITHM`,
//! `ANONYMIZE_FIELDS`, `ANONYMIZE_LOGGING_LOCAL_ENABLED` and
//! `ANONYMIZE_LOGGING_LOCAL_PATH` override the file.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{AnonymizeFilterConfig, ApplicationConfig, LoggingConfig};
pub use secret::{secret_string, SecretString, SecretValue};
