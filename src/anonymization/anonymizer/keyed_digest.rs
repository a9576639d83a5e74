//! Keyed digest strategy (HMAC)

use super::Anonymizer;
use crate::anonymization::algorithm::Algorithm;
use crate::domain::{AnonymizeError, Result, Scalar, TransformationError};
use hmac::digest::core_api::BlockSizeUser;
use hmac::digest::Digest;
use hmac::{Mac, SimpleHmac};
use std::fmt;

/// HMAC strategy - replaces values with `hex(HMAC(D, key, value))`
///
/// The keyed MAC state is prepared once; every call works on a clone of it.
/// Integers are authenticated through their decimal text form.
pub struct KeyedDigest<D>
where
    D: Digest + BlockSizeUser,
{
    algorithm: Algorithm,
    mac: SimpleHmac<D>,
}

impl<D> KeyedDigest<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    /// Create a keyed digest strategy for `algorithm` using `key`
    pub fn new(algorithm: Algorithm, key: &[u8]) -> Result<Self> {
        let mac = <SimpleHmac<D> as Mac>::new_from_slice(key).map_err(|e| {
            AnonymizeError::Configuration(format!("Invalid {algorithm} key: {e}"))
        })?;
        Ok(Self { algorithm, mac })
    }

    fn hex_digest(&self, data: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(data);
        hex::encode(mac.finalize().into_bytes())
    }
}

impl<D> Anonymizer for KeyedDigest<D>
where
    D: Digest + BlockSizeUser + Clone + Send + Sync,
{
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn anonymize(&self, value: &Scalar) -> std::result::Result<Scalar, TransformationError> {
        let digest = match value {
            Scalar::Text(text) => self.hex_digest(text.as_bytes()),
            Scalar::Integer(i) => self.hex_digest(i.to_string().as_bytes()),
        };
        Ok(Scalar::Text(digest))
    }
}

// Never print the keyed state.
impl<D> fmt::Debug for KeyedDigest<D>
where
    D: Digest + BlockSizeUser,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedDigest")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
