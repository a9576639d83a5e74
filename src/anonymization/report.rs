//! Processing outcomes and run statistics
//!
//! [`ProcessOutcome`] describes what happened to one event; [`FilterStats`]
//! accumulates outcomes over a run for the end-of-run summary.

use crate::anonymization::diagnostics::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of processing a single event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// False when the eligibility predicate rejected the event
    pub eligible: bool,

    /// Fields whose values were replaced
    pub anonymized: Vec<String>,

    /// Configured fields not present on the event
    pub absent: Vec<String>,

    /// Fields left unchanged because anonymization failed
    pub failed: Vec<Diagnostic>,
}

impl ProcessOutcome {
    /// Outcome for an event the predicate rejected
    pub fn skipped() -> Self {
        Self::default()
    }

    /// Outcome for an eligible event, before any field is visited
    pub fn eligible() -> Self {
        Self {
            eligible: true,
            ..Self::default()
        }
    }

    /// True when at least one field was changed
    pub fn is_modified(&self) -> bool {
        !self.anonymized.is_empty()
    }

    /// True when at least one field failed
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Counters accumulated over a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Events handed to the filter
    pub events_seen: usize,

    /// Events rejected by the eligibility predicate
    pub events_skipped: usize,

    /// Field values replaced
    pub fields_anonymized: usize,

    /// Configured fields missing from events
    pub fields_absent: usize,

    /// Fields left unchanged after a failure
    pub fields_failed: usize,

    /// Input lines that were not JSON objects and were passed through
    pub unparsable_lines: usize,
}

impl FilterStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one event's outcome
    pub fn record(&mut self, outcome: &ProcessOutcome) {
        self.events_seen += 1;
        if !outcome.eligible {
            self.events_skipped += 1;
            return;
        }
        self.fields_anonymized += outcome.anonymized.len();
        self.fields_absent += outcome.absent.len();
        self.fields_failed += outcome.failed.len();
    }

    /// Count a line that could not be parsed as an event
    pub fn record_unparsable(&mut self) {
        self.unparsable_lines += 1;
    }
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "events={}, skipped={}, anonymized={}, absent={}, failed={}, unparsable={}",
            self.events_seen,
            self.events_skipped,
            self.fields_anonymized,
            self.fields_absent,
            self.fields_failed,
            self.unparsable_lines
        )
    }
}
