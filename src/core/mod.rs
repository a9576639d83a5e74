//! Core pipeline logic
//!
//! This module drives the anonymization filter over a stream of events.
//!
//! # Workflow
//!
//! 1. **Read**: one newline-delimited JSON event per line
//! 2. **Gate**: check the event against the configured condition
//! 3. **Anonymize**: replace the configured fields, fail-soft per field
//! 4. **Write**: emit the event, one per line, in input order
//! 5. **Report**: accumulate [`FilterStats`](crate::anonymization::FilterStats)
//!
//! # Example
//!
//! ```rust,no_run
//! use anonymize::config::load_config;
//! use anonymize::core::pipeline::FilterPipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("anonymize.toml")?;
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let pipeline = FilterPipeline::from_config(&config.anonymize, shutdown_rx)?;
//! let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//! let summary = pipeline.run(stdin, tokio::io::stdout()).await?;
//!
//! println!("{}", summary.stats);
//! # Ok(())
//! # }
//! ```

pub mod pipeline;
