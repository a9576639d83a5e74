//! Anonymization module
//!
//! Replaces the values of configured event fields with consistent
//! substitutes: equal inputs give equal outputs, so anonymized events can
//! still be correlated downstream.
//!
//! # Architecture
//!
//! - **Resolution** ([`resolver`]): validates `(algorithm, key)` once and
//!   produces a [`BoundAnonymizer`]
//! - **Strategies** ([`anonymizer`]): keyed HMAC digests, MurmurHash3 and
//!   IPv4 network masking behind one [`anonymizer::Anonymizer`] trait
//! - **Engine** ([`engine`]): applies the bound function to each configured
//!   field of an eligible event
//! - **Diagnostics** ([`diagnostics`]): per-field failures, reported without
//!   aborting the event
//!
//! # Usage
//!
//! ```rust
//! use anonymize::anonymization::{AnonymizeConfig, Algorithm, FieldAnonymizer};
//! use anonymize::domain::Event;
//!
//! # fn example() -> anonymize::domain::Result<()> {
//! let config = AnonymizeConfig::new(["user"], "topsecret", Algorithm::Sha256);
//! let anonymizer = FieldAnonymizer::from_config(&config)?;
//!
//! let mut event = Event::from_json_str(r#"{"user": "jane"}"#)?;
//! anonymizer.process(&mut event, &config.condition);
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod anonymizer;
pub mod condition;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod report;
pub mod resolver;

// Re-export main types
pub use algorithm::Algorithm;
pub use condition::{AlwaysEligible, Condition, EventPredicate};
pub use config::AnonymizeConfig;
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticsSink, TracingSink};
pub use engine::FieldAnonymizer;
pub use report::{FilterStats, ProcessOutcome};
pub use resolver::{resolve, resolve_algorithm, BoundAnonymizer};
