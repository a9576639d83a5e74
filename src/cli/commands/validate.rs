//! Validate config command implementation
//!
//! This module implements the `validate-config` command. It never prints
//! the key.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // load_config validates, including algorithm resolution
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let bound = match config.anonymize.resolve() {
            Ok(b) => b,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let condition = &config.anonymize.condition;

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Algorithm: {}", bound.algorithm());
        println!("  Fields: {:?}", config.anonymize.fields);
        if condition.is_empty() {
            println!("  Condition: all events");
        } else {
            if let Some(event_type) = &condition.event_type {
                println!("  Event Type: {event_type}");
            }
            if !condition.tags.is_empty() {
                println!("  Required Tags: {:?}", condition.tags);
            }
            if !condition.exclude_tags.is_empty() {
                println!("  Excluded Tags: {:?}", condition.exclude_tags);
            }
        }
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();

        Ok(0)
    }
}
