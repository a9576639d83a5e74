//! Algorithm resolution
//!
//! Turns a configured `(algorithm, key)` pair into a [`BoundAnonymizer`]. All
//! validation happens here, once, so that event processing never has to deal
//! with a half-configured strategy.
//!
//! # Examples
//!
//! ```
//! use anonymize::anonymization::resolve;
//! use anonymize::domain::Scalar;
//!
//! let bound = resolve("IPV4_NETWORK", "24").unwrap();
//! assert_eq!(
//!     bound.anonymize(&Scalar::from("192.168.1.123")).unwrap(),
//!     Scalar::from("192.168.1.0")
//! );
//!
//! assert!(resolve("ROT13", "k").is_err());
//! ```

use crate::anonymization::algorithm::Algorithm;
use crate::anonymization::anonymizer::{Anonymizer, Ipv4Network, KeyedDigest, Murmur3};
use crate::domain::{AnonymizeError, FieldValue, Result, Scalar, TransformationError};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use std::sync::Arc;

/// A resolved, ready-to-call anonymization function
///
/// Immutable after construction. Cloning is cheap and clones share the same
/// strategy, so one instance can be handed to every worker thread.
#[derive(Debug, Clone)]
pub struct BoundAnonymizer {
    strategy: Arc<dyn Anonymizer>,
}

impl BoundAnonymizer {
    /// Wrap an already constructed strategy
    pub fn new(strategy: Arc<dyn Anonymizer>) -> Self {
        Self { strategy }
    }

    /// The algorithm this function applies
    pub fn algorithm(&self) -> Algorithm {
        self.strategy.algorithm()
    }

    /// Anonymize one scalar
    pub fn anonymize(&self, value: &Scalar) -> std::result::Result<Scalar, TransformationError> {
        self.strategy.anonymize(value)
    }

    /// Anonymize a scalar, or every element of a sequence
    pub fn anonymize_value(
        &self,
        value: &FieldValue,
    ) -> std::result::Result<FieldValue, TransformationError> {
        value.try_map(|scalar| self.strategy.anonymize(scalar))
    }
}

/// Resolve an algorithm by its configuration name
///
/// # Errors
///
/// Returns [`AnonymizeError::Configuration`] when the name is not one of the
/// supported algorithms, the key is empty, or (for `IPV4_NETWORK`) the key is
/// not a valid prefix length.
pub fn resolve(algorithm: &str, key: &str) -> Result<BoundAnonymizer> {
    let algorithm: Algorithm = algorithm.parse()?;
    resolve_algorithm(algorithm, key)
}

/// Resolve an already parsed algorithm
///
/// The key is required for every algorithm, including `MURMUR3` which does
/// not use it.
pub fn resolve_algorithm(algorithm: Algorithm, key: &str) -> Result<BoundAnonymizer> {
    if key.is_empty() {
        return Err(AnonymizeError::Configuration(format!(
            "A non-empty key is required for algorithm {algorithm}"
        )));
    }

    let strategy: Arc<dyn Anonymizer> = match algorithm {
        Algorithm::Sha1
        | Algorithm::Sha256
        | Algorithm::Sha384
        | Algorithm::Sha512
        | Algorithm::Md5 => keyed_digest(algorithm, key.as_bytes())?,
        Algorithm::Murmur3 => Arc::new(Murmur3::new()),
        Algorithm::Ipv4Network => Arc::new(Ipv4Network::from_key(key)?),
    };

    tracing::debug!(algorithm = %algorithm, "Resolved anonymization algorithm");

    Ok(BoundAnonymizer::new(strategy))
}

/// Select the digest for a keyed algorithm
fn keyed_digest(algorithm: Algorithm, key: &[u8]) -> Result<Arc<dyn Anonymizer>> {
    let strategy: Arc<dyn Anonymizer> = match algorithm {
        Algorithm::Sha1 => Arc::new(KeyedDigest::<Sha1>::new(algorithm, key)?),
        Algorithm::Sha256 => Arc::new(KeyedDigest::<Sha256>::new(algorithm, key)?),
        Algorithm::Sha384 => Arc::new(KeyedDigest::<Sha384>::new(algorithm, key)?),
        Algorithm::Sha512 => Arc::new(KeyedDigest::<Sha512>::new(algorithm, key)?),
        Algorithm::Md5 => Arc::new(KeyedDigest::<Md5>::new(algorithm, key)?),
        Algorithm::Murmur3 | Algorithm::Ipv4Network => {
            tracing::error!(algorithm = %algorithm, "No digest for non-digest algorithm");
            return Err(AnonymizeError::InternalInvariant(format!(
                "{algorithm} has no keyed digest"
            )));
        }
    };
    Ok(strategy)
}
