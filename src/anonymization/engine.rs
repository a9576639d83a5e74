//! Field anonymization engine
//!
//! This module provides [`FieldAnonymizer`], which applies a resolved
//! [`BoundAnonymizer`] to the configured fields of each event.
//!
//! # Behavior
//!
//! 1. Ask the eligibility predicate; ineligible events are left untouched
//! 2. Visit the configured fields in order; absent fields are skipped
//! 3. Replace scalars directly and sequences element by element
//! 4. On failure keep the field's original value, report a diagnostic and
//!    continue with the next field
//!
//! # Examples
//!
//! ```
//! use anonymize::anonymization::{AnonymizeConfig, Algorithm, FieldAnonymizer};
//! use anonymize::anonymization::condition::AlwaysEligible;
//! use anonymize::domain::Event;
//!
//! # fn example() -> anonymize::domain::Result<()> {
//! let config = AnonymizeConfig::new(["clientip"], "24", Algorithm::Ipv4Network);
//! let anonymizer = FieldAnonymizer::from_config(&config)?;
//!
//! let mut event = Event::from_json_str(r#"{"clientip": "192.168.1.123"}"#)?;
//! let outcome = anonymizer.process(&mut event, &AlwaysEligible);
//!
//! assert_eq!(outcome.anonymized, vec!["clientip".to_string()]);
//! assert_eq!(event.to_json_string()?, r#"{"clientip":"192.168.1.0"}"#);
//! # Ok(())
//! # }
//! ```

use crate::anonymization::{
    algorithm::Algorithm,
    condition::EventPredicate,
    config::AnonymizeConfig,
    diagnostics::{Diagnostic, DiagnosticsSink, TracingSink},
    report::ProcessOutcome,
    resolver::BoundAnonymizer,
};
use crate::domain::{AnonymizeError, Record, Result, TransformationError};
use std::sync::Arc;

/// Applies a bound anonymization function to configured record fields
///
/// # Thread Safety
///
/// Immutable after construction; share it across worker threads with `Arc`
/// or by cloning. The host must not hand the same record to two calls at
/// once.
#[derive(Clone)]
pub struct FieldAnonymizer {
    fields: Vec<String>,
    bound: BoundAnonymizer,
    sink: Arc<dyn DiagnosticsSink>,
}

impl FieldAnonymizer {
    /// Create an anonymizer for `fields` using `bound`
    ///
    /// Diagnostics go to [`TracingSink`] until replaced with
    /// [`with_sink`](Self::with_sink).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `fields` is empty.
    pub fn new(fields: Vec<String>, bound: BoundAnonymizer) -> Result<Self> {
        if fields.is_empty() {
            return Err(AnonymizeError::Configuration(
                "At least one field must be configured".to_string(),
            ));
        }

        Ok(Self {
            fields,
            bound,
            sink: Arc::new(TracingSink),
        })
    }

    /// Validate `config` and build an anonymizer from it
    pub fn from_config(config: &AnonymizeConfig) -> Result<Self> {
        config.validate()?;
        let bound = config.resolve()?;

        tracing::info!(
            algorithm = %bound.algorithm(),
            fields = ?config.fields,
            "Anonymizer configured"
        );

        Self::new(config.fields.clone(), bound)
    }

    /// Send diagnostics to `sink` instead of the log
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Configured field references, in processing order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Algorithm applied to every field
    pub fn algorithm(&self) -> Algorithm {
        self.bound.algorithm()
    }

    /// Anonymize the configured fields of one record in place
    ///
    /// Never fails as a whole: per-field errors are reported to the
    /// diagnostics sink and listed in the returned outcome.
    pub fn process<R, P>(&self, record: &mut R, predicate: &P) -> ProcessOutcome
    where
        R: Record + ?Sized,
        P: EventPredicate<R> + ?Sized,
    {
        if !predicate.is_eligible(record) {
            tracing::trace!("Event not eligible, skipping");
            return ProcessOutcome::skipped();
        }

        let mut outcome = ProcessOutcome::eligible();

        for field in &self.fields {
            match self.anonymize_field(record, field) {
                Ok(true) => outcome.anonymized.push(field.clone()),
                Ok(false) => outcome.absent.push(field.clone()),
                Err(error) => {
                    let diagnostic = Diagnostic::new(field.as_str(), self.algorithm(), error);
                    self.sink.emit(&diagnostic);
                    outcome.failed.push(diagnostic);
                }
            }
        }

        outcome
    }

    /// Anonymize one field of a record in place
    ///
    /// Returns `Ok(false)` when the field is absent. On error the record is
    /// unchanged.
    pub fn anonymize_field<R>(
        &self,
        record: &mut R,
        field: &str,
    ) -> std::result::Result<bool, TransformationError>
    where
        R: Record + ?Sized,
    {
        if !record.has_field(field) {
            return Ok(false);
        }

        let Some(value) = record.get_field(field)? else {
            return Ok(false);
        };

        let anonymized = self.bound.anonymize_value(&value)?;
        record.set_field(field, anonymized);

        tracing::trace!(field = %field, "Field anonymized");
        Ok(true)
    }
}

impl std::fmt::Debug for FieldAnonymizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldAnonymizer")
            .field("fields", &self.fields)
            .field("bound", &self.bound)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::condition::AlwaysEligible;
    use crate::anonymization::diagnostics::CollectingSink;
    use crate::anonymization::resolver::resolve;
    use crate::domain::{Event, FieldValue, Scalar};
    use serde_json::json;

    fn anonymizer(fields: &[&str], algorithm: &str, key: &str) -> (FieldAnonymizer, Arc<CollectingSink>) {
        let sink = Arc::new(CollectingSink::new());
        let anonymizer = FieldAnonymizer::new(
            fields.iter().map(|f| f.to_string()).collect(),
            resolve(algorithm, key).unwrap(),
        )
        .unwrap()
        .with_sink(sink.clone());
        (anonymizer, sink)
    }

    fn event(value: serde_json::Value) -> Event {
        Event::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_field_list_rejected() {
        let bound = resolve("SHA1", "k").unwrap();
        assert!(FieldAnonymizer::new(Vec::new(), bound).is_err());
    }

    #[test]
    fn test_scalar_field_replaced() {
        let (anonymizer, sink) = anonymizer(&["ip"], "IPV4_NETWORK", "16");
        let mut e = event(json!({"ip": "10.20.30.40", "other": "10.20.30.40"}));

        let outcome = anonymizer.process(&mut e, &AlwaysEligible);

        assert_eq!(outcome.anonymized, vec!["ip".to_string()]);
        assert_eq!(e.into_value(), json!({"ip": "10.20.0.0", "other": "10.20.30.40"}));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_sequence_field_mapped_in_order() {
        let (anonymizer, _) = anonymizer(&["ips"], "IPV4_NETWORK", "24");
        let mut e = event(json!({"ips": ["1.2.3.4", "5.6.7.8"]}));

        anonymizer.process(&mut e, &AlwaysEligible);

        assert_eq!(e.into_value(), json!({"ips": ["1.2.3.0", "5.6.7.0"]}));
    }

    #[test]
    fn test_absent_field_is_not_created() {
        let (anonymizer, sink) = anonymizer(&["missing", "[user][email]"], "SHA1", "k");
        let mut e = event(json!({"user": {"name": "x"}}));
        let before = e.clone();

        let outcome = anonymizer.process(&mut e, &AlwaysEligible);

        assert_eq!(e, before);
        assert_eq!(outcome.absent.len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_failure_keeps_value_and_continues() {
        let (anonymizer, sink) = anonymizer(&["bad", "good"], "IPV4_NETWORK", "24");
        let mut e = event(json!({"bad": "not-an-ip", "good": "192.168.1.123"}));

        let outcome = anonymizer.process(&mut e, &AlwaysEligible);

        assert_eq!(e.into_value(), json!({"bad": "not-an-ip", "good": "192.168.1.0"}));
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.anonymized, vec!["good".to_string()]);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.diagnostics()[0].field, "bad");
    }

    #[test]
    fn test_partial_sequence_failure_keeps_whole_field() {
        let (anonymizer, sink) = anonymizer(&["ips"], "IPV4_NETWORK", "24");
        let mut e = event(json!({"ips": ["1.2.3.4", "nope"]}));

        anonymizer.process(&mut e, &AlwaysEligible);

        assert_eq!(e.into_value(), json!({"ips": ["1.2.3.4", "nope"]}));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_unsupported_shape_reported() {
        let (anonymizer, sink) = anonymizer(&["obj"], "MURMUR3", "unused");
        let mut e = event(json!({"obj": {"nested": 1}}));

        let outcome = anonymizer.process(&mut e, &AlwaysEligible);

        assert!(outcome.has_failures());
        assert_eq!(
            sink.diagnostics()[0].error,
            TransformationError::UnsupportedShape("object".to_string())
        );
    }

    #[test]
    fn test_ineligible_record_untouched() {
        let (anonymizer, sink) = anonymizer(&["ip"], "SHA1", "k");
        let mut e = event(json!({"ip": "1.2.3.4"}));
        let before = e.clone();

        let outcome = anonymizer.process(&mut e, &|_: &Event| false);

        assert!(!outcome.eligible);
        assert_eq!(e, before);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_anonymize_field_directly() {
        let (anonymizer, _) = anonymizer(&["n"], "MURMUR3", "k");
        let mut e = event(json!({"n": 1}));

        assert_eq!(anonymizer.anonymize_field(&mut e, "n"), Ok(true));
        assert_eq!(anonymizer.anonymize_field(&mut e, "absent"), Ok(false));
        assert_eq!(
            e.get_field("n").unwrap(),
            Some(FieldValue::Scalar(Scalar::from("fbf1402a")))
        );
    }

    #[test]
    fn test_from_config() {
        let config = AnonymizeConfig::new(["a", "b"], "k", Algorithm::Md5);
        let anonymizer = FieldAnonymizer::from_config(&config).unwrap();
        assert_eq!(anonymizer.fields(), &["a".to_string(), "b".to_string()]);
        assert_eq!(anonymizer.algorithm(), Algorithm::Md5);
    }
}
