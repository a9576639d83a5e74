//! Anonymization configuration
//!
//! The `[anonymize]` section: which fields, which algorithm, which key, and
//! optionally which events.

use crate::anonymization::algorithm::Algorithm;
use crate::anonymization::condition::Condition;
use crate::anonymization::resolver::{resolve, BoundAnonymizer};
use crate::config::{secret_string, SecretString};
use crate::domain::{AnonymizeError, Result};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Anonymization settings
///
/// `fields` and `key` have no defaults; leaving either out of the file is a
/// configuration error. The algorithm name is kept as written and checked
/// against the supported set by [`validate`](Self::validate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizeConfig {
    /// Fields to anonymize, top-level names or `[outer][inner]` references
    pub fields: Vec<String>,

    /// HMAC key, placeholder (MURMUR3) or prefix length (IPV4_NETWORK)
    pub key: SecretString,

    /// Algorithm name
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Which events are processed (all by default)
    #[serde(default)]
    pub condition: Condition,
}

fn default_algorithm() -> String {
    Algorithm::default().name().to_string()
}

impl AnonymizeConfig {
    /// Build a configuration in code
    pub fn new<I, S>(fields: I, key: impl Into<String>, algorithm: Algorithm) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            key: secret_string(key.into()),
            algorithm: algorithm.name().to_string(),
            condition: Condition::default(),
        }
    }

    /// Restrict processing to events matching `condition`
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    /// Validate the configuration
    ///
    /// Checks the field list and resolves the algorithm, so a configuration
    /// that validates is guaranteed to produce a [`BoundAnonymizer`].
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(AnonymizeError::Configuration(
                "anonymize.fields must list at least one field".to_string(),
            ));
        }
        if let Some(pos) = self.fields.iter().position(|f| f.trim().is_empty()) {
            return Err(AnonymizeError::Configuration(format!(
                "anonymize.fields[{pos}] must not be empty"
            )));
        }
        self.resolve().map(|_| ())
    }

    /// Resolve the configured algorithm and key
    pub fn resolve(&self) -> Result<BoundAnonymizer> {
        resolve(&self.algorithm, self.key.expose_secret().as_ref())
    }

    /// Apply environment variable overrides
    ///
    /// `ANONYMIZE_FIELDS` is a comma-separated list.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ANONYMIZE_KEY") {
            self.key = secret_string(val);
        }

        if let Ok(val) = std::env::var("ANONYMIZE_ALGORITHM") {
            self.algorithm = val;
        }

        if let Ok(val) = std::env::var("ANONYMIZE_FIELDS") {
            self.fields = val
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from)
                .collect();
        }
    }
}
