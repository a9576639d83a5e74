// Anonymize - consistent field anonymization for event streams
// Copyright (c) 2025 Anonymize Contributors
// Licensed under the MIT License

//! # Anonymize - consistent field anonymization
//!
//! A filter that replaces the values of configured event fields with
//! consistent substitutes. Equal inputs always give equal outputs under the
//! same configuration, so anonymized data can still be joined and counted.
//!
//! ## Algorithms
//!
//! - **SHA1, SHA256, SHA384, SHA512, MD5**: keyed HMAC, lowercase hex
//! - **MURMUR3**: unkeyed 32-bit MurmurHash3, 8 hex digits
//! - **IPV4_NETWORK**: masks an IPv4 address to its network address; the key
//!   is the prefix length
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Newline-delimited JSON pipeline
//! - [`anonymization`] - Algorithm resolution, strategies and field engine
//! - [`domain`] - Events, field values and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use anonymize::anonymization::{AnonymizeConfig, Algorithm, FieldAnonymizer};
//! use anonymize::anonymization::condition::AlwaysEligible;
//! use anonymize::domain::Event;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnonymizeConfig::new(["clientip"], "topsecret", Algorithm::Sha1);
//! let anonymizer = FieldAnonymizer::from_config(&config)?;
//!
//! let mut event = Event::from_json_str(r#"{"clientip": "192.168.1.1"}"#)?;
//! anonymizer.process(&mut event, &AlwaysEligible);
//!
//! assert_eq!(
//!     event.to_json_string()?,
//!     r#"{"clientip":"c7276ad86cd0c6aae8ca8acdafad5daf243752eb"}"#
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Configuration problems surface once, when the algorithm and key are
//! resolved, as [`domain::AnonymizeError::Configuration`]. Per-field
//! failures during processing never abort an event: the field keeps its
//! original value and a diagnostic is reported.

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
