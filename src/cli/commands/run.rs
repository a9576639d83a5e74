//! Run command implementation
//!
//! This module implements the `run` command, which streams newline-delimited
//! JSON events through the anonymize filter.

use crate::config::load_config;
use crate::core::pipeline::FilterPipeline;
use crate::{log_error_with_context, log_run_complete, log_run_start};
use clap::Args;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio::sync::watch;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Read events from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write events to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let pipeline = match FilterPipeline::from_config(&config.anonymize, shutdown_signal) {
            Ok(p) => p,
            Err(e) => {
                log_error_with_context!(&e, "Failed to configure anonymizer");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let input_name = self
            .input
            .as_ref()
            .map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
        log_run_start!(
            input_name,
            pipeline.anonymizer().algorithm(),
            pipeline.anonymizer().fields().len()
        );

        let reader = self.open_input().await?;
        let writer = self.open_output().await?;

        let summary = match pipeline.run(reader, writer).await {
            Ok(s) => s,
            Err(e) => {
                log_error_with_context!(&e, "Filter run failed");
                eprintln!("Filter run failed: {e}");
                return Ok(5);
            }
        };

        log_run_complete!(&summary.stats, summary.duration);

        if summary.interrupted {
            tracing::info!("Filter run interrupted by user signal");
            eprintln!("Interrupted after {} events", summary.stats.events_seen);
        }

        Ok(0)
    }

    async fn open_input(&self) -> anyhow::Result<Box<dyn AsyncBufRead + Unpin + Send>> {
        Ok(match &self.input {
            Some(path) => {
                let file = tokio::fs::File::open(path).await.map_err(|e| {
                    anyhow::anyhow!("Failed to open input {}: {e}", path.display())
                })?;
                Box::new(BufReader::new(file))
            }
            None => Box::new(BufReader::new(tokio::io::stdin())),
        })
    }

    async fn open_output(&self) -> anyhow::Result<Box<dyn AsyncWrite + Unpin + Send>> {
        Ok(match &self.output {
            Some(path) => {
                let file = tokio::fs::File::create(path).await.map_err(|e| {
                    anyhow::anyhow!("Failed to create output {}: {e}", path.display())
                })?;
                Box::new(file)
            }
            None => Box::new(tokio::io::stdout()),
        })
    }
}
