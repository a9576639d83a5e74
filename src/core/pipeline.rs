//! Newline-delimited JSON filter pipeline
//!
//! Lines that are not JSON objects are passed through unchanged and counted,
//! so a stray log line never stops the stream.

use crate::anonymization::{AnonymizeConfig, Condition, FieldAnonymizer, FilterStats};
use crate::domain::{Event, Result};
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::watch;

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Counters accumulated over the run
    pub stats: FilterStats,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// Whether the run stopped early on a shutdown signal
    pub interrupted: bool,
}

/// Streams events through a [`FieldAnonymizer`]
#[derive(Debug)]
pub struct FilterPipeline {
    anonymizer: FieldAnonymizer,
    condition: Condition,
    shutdown: watch::Receiver<bool>,
}

impl FilterPipeline {
    /// Create a pipeline from a ready anonymizer
    pub fn new(
        anonymizer: FieldAnonymizer,
        condition: Condition,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            anonymizer,
            condition,
            shutdown,
        }
    }

    /// Validate `config` and build a pipeline from it
    pub fn from_config(config: &AnonymizeConfig, shutdown: watch::Receiver<bool>) -> Result<Self> {
        let anonymizer = FieldAnonymizer::from_config(config)?;
        Ok(Self::new(anonymizer, config.condition.clone(), shutdown))
    }

    /// The anonymizer applied to each event
    pub fn anonymizer(&self) -> &FieldAnonymizer {
        &self.anonymizer
    }

    /// Filter a single input line
    ///
    /// Returns the line to emit. Blank lines come back unchanged and are not
    /// counted.
    pub fn process_line(&self, line: &str, stats: &mut FilterStats) -> Result<String> {
        if line.trim().is_empty() {
            return Ok(line.to_string());
        }

        let mut event = match Event::from_json_str(line) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(error = %e, "Passing through unparsable line");
                stats.record_unparsable();
                return Ok(line.to_string());
            }
        };

        let outcome = self.anonymizer.process(&mut event, &self.condition);
        stats.record(&outcome);

        event.to_json_string()
    }

    /// Read events from `reader` until EOF or shutdown, writing to `writer`
    ///
    /// A shutdown signal stops reading; the line already read is still
    /// written and the output flushed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading or writing fails.
    pub async fn run<R, W>(&self, reader: R, writer: W) -> Result<RunSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let start_time = Instant::now();
        let mut stats = FilterStats::new();
        let mut interrupted = false;

        let mut lines = reader.lines();
        let mut writer = BufWriter::new(writer);
        let mut shutdown = self.shutdown.clone();
        let mut shutdown_open = true;

        loop {
            if *shutdown.borrow() {
                tracing::info!("Shutdown requested, stopping after current event");
                interrupted = true;
                break;
            }

            let next = tokio::select! {
                biased;
                changed = shutdown.changed(), if shutdown_open => {
                    if changed.is_err() {
                        shutdown_open = false;
                    }
                    continue;
                }
                line = lines.next_line() => line?,
            };

            let Some(line) = next else {
                break;
            };

            let output = self.process_line(&line, &mut stats)?;
            writer.write_all(output.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }

        writer.flush().await?;

        Ok(RunSummary {
            stats,
            duration: start_time.elapsed(),
            interrupted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::Algorithm;
    use tokio::io::BufReader;

    fn pipeline(config: &AnonymizeConfig) -> (FilterPipeline, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        (FilterPipeline::from_config(config, rx).unwrap(), tx)
    }

    #[test]
    fn test_process_line_anonymizes() {
        let config = AnonymizeConfig::new(["ip"], "24", Algorithm::Ipv4Network);
        let (pipeline, _tx) = pipeline(&config);
        let mut stats = FilterStats::new();

        let out = pipeline
            .process_line(r#"{"ip":"10.1.2.3","msg":"hi"}"#, &mut stats)
            .unwrap();

        assert_eq!(out, r#"{"ip":"10.1.2.0","msg":"hi"}"#);
        assert_eq!(stats.events_seen, 1);
        assert_eq!(stats.fields_anonymized, 1);
    }

    #[test]
    fn test_process_line_passes_through_garbage() {
        let config = AnonymizeConfig::new(["ip"], "k", Algorithm::Sha1);
        let (pipeline, _tx) = pipeline(&config);
        let mut stats = FilterStats::new();

        assert_eq!(pipeline.process_line("not json", &mut stats).unwrap(), "not json");
        assert_eq!(pipeline.process_line("[1,2]", &mut stats).unwrap(), "[1,2]");
        assert_eq!(pipeline.process_line("", &mut stats).unwrap(), "");
        assert_eq!(stats.unparsable_lines, 2);
        assert_eq!(stats.events_seen, 0);
    }

    #[tokio::test]
    async fn test_run_to_eof() {
        let config = AnonymizeConfig::new(["n"], "k", Algorithm::Murmur3);
        let (pipeline, _tx) = pipeline(&config);
        let input = "{\"n\":\"test\"}\nnoise\n{\"other\":1}\n";
        let mut output = Vec::new();

        let summary = pipeline
            .run(BufReader::new(input.as_bytes()), &mut output)
            .await
            .unwrap();

        assert!(!summary.interrupted);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "{\"n\":\"ba6bd213\"}\nnoise\n{\"other\":1}\n"
        );
        assert_eq!(summary.stats.events_seen, 2);
        assert_eq!(summary.stats.fields_absent, 1);
        assert_eq!(summary.stats.unparsable_lines, 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let config = AnonymizeConfig::new(["n"], "k", Algorithm::Murmur3);
        let (pipeline, tx) = pipeline(&config);
        tx.send(true).unwrap();
        let mut output = Vec::new();

        let summary = pipeline
            .run(BufReader::new("{\"n\":1}\n".as_bytes()), &mut output)
            .await
            .unwrap();

        assert!(summary.interrupted);
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_run_survives_dropped_sender() {
        let config = AnonymizeConfig::new(["n"], "k", Algorithm::Murmur3);
        let (pipeline, tx) = pipeline(&config);
        drop(tx);
        let mut output = Vec::new();

        let summary = pipeline
            .run(BufReader::new("{\"n\":1}\n".as_bytes()), &mut output)
            .await
            .unwrap();

        assert!(!summary.interrupted);
        assert_eq!(String::from_utf8(output).unwrap(), "{\"n\":\"fbf1402a\"}\n");
    }
}
