//! Anonymization strategy module
//!
//! Each supported algorithm family is one [`Anonymizer`] implementation. A
//! strategy is built once from the configured key and then only read, so a
//! single instance can serve any number of threads.

pub mod ipv4_network;
pub mod keyed_digest;
pub mod murmur;

pub use ipv4_network::Ipv4Network;
pub use keyed_digest::KeyedDigest;
pub use murmur::Murmur3;

use crate::anonymization::algorithm::Algorithm;
use crate::domain::{Scalar, TransformationError};
use std::fmt;

/// Trait for anonymization strategy implementations
pub trait Anonymizer: Send + Sync + fmt::Debug {
    /// The algorithm this strategy implements
    fn algorithm(&self) -> Algorithm;

    /// Anonymize one scalar value
    ///
    /// Must be deterministic: equal inputs always give equal outputs.
    fn anonymize(&self, value: &Scalar) -> Result<Scalar, TransformationError>;
}
