//! MurmurHash3 strategy

use super::Anonymizer;
use crate::anonymization::algorithm::Algorithm;
use crate::domain::{Scalar, TransformationError};
use std::io::Cursor;

const SEED: u32 = 0;

/// MurmurHash3 strategy - replaces values with their 32-bit x86 hash
///
/// Fast and non-cryptographic. The configured key is not mixed in, so the
/// mapping can be reproduced by anyone who knows the input value.
///
/// Text is hashed over its UTF-8 bytes. Integers that fit in 32 bits
/// (`-2^31 ..= 2^32 - 1`) are hashed as 4 little-endian bytes, wider ones
/// as 8, which keeps the integer and string hashes of the same digits apart.
#[derive(Debug, Clone, Copy, Default)]
pub struct Murmur3;

impl Murmur3 {
    /// Create a new MurmurHash3 strategy
    pub fn new() -> Self {
        Self
    }

    fn hash_bytes(bytes: &[u8]) -> Result<u32, TransformationError> {
        murmur3::murmur3_32(&mut Cursor::new(bytes), SEED)
            .map_err(|e| TransformationError::Hash(e.to_string()))
    }

    fn hash_integer(value: i64) -> Result<u32, TransformationError> {
        if (-(1_i64 << 31)..(1_i64 << 32)).contains(&value) {
            Self::hash_bytes(&(value as u32).to_le_bytes())
        } else {
            Self::hash_bytes(&(value as u64).to_le_bytes())
        }
    }
}

impl Anonymizer for Murmur3 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Murmur3
    }

    fn anonymize(&self, value: &Scalar) -> Result<Scalar, TransformationError> {
        let hash = match value {
            Scalar::Text(text) => Self::hash_bytes(text.as_bytes())?,
            Scalar::Integer(i) => Self::hash_integer(*i)?,
        };
        Ok(Scalar::Text(format!("{hash:08x}")))
    }
}
