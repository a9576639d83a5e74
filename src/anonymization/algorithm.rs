//! Supported anonymization algorithms
//!
//! The set is closed: any name outside it is rejected when the configuration
//! is resolved, never at event time.
//!
//! # Examples
//!
//! ```
//! use anonymize::anonymization::Algorithm;
//!
//! let algorithm: Algorithm = "IPV4_NETWORK".parse().unwrap();
//! assert_eq!(algorithm, Algorithm::Ipv4Network);
//! assert_eq!(algorithm.to_string(), "IPV4_NETWORK");
//!
//! assert_eq!(Algorithm::default(), Algorithm::Sha1);
//! assert!("ROT13".parse::<Algorithm>().is_err());
//! ```

use crate::domain::AnonymizeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Anonymization algorithm
///
/// # Families
///
/// - **Keyed digests** (`SHA1`, `SHA256`, `SHA384`, `SHA512`, `MD5`): HMAC of
///   the value with the configured key, hex encoded
/// - **`MURMUR3`**: 32-bit MurmurHash3 of the value, key ignored
/// - **`IPV4_NETWORK`**: the value's IPv4 network address, key is the prefix length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    /// HMAC-SHA1
    #[default]
    Sha1,
    /// HMAC-SHA256
    Sha256,
    /// HMAC-SHA384
    Sha384,
    /// HMAC-SHA512
    Sha512,
    /// HMAC-MD5
    Md5,
    /// MurmurHash3 x86 32-bit
    Murmur3,
    /// IPv4 subnet masking
    Ipv4Network,
}

impl Algorithm {
    /// Every supported algorithm, in documentation order
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
        Algorithm::Md5,
        Algorithm::Murmur3,
        Algorithm::Ipv4Network,
    ];

    /// Configuration name of the algorithm
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Md5 => "MD5",
            Self::Murmur3 => "MURMUR3",
            Self::Ipv4Network => "IPV4_NETWORK",
        }
    }

    /// True for the HMAC digest family
    pub fn is_keyed_digest(&self) -> bool {
        matches!(
            self,
            Self::Sha1 | Self::Sha256 | Self::Sha384 | Self::Sha512 | Self::Md5
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = AnonymizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| {
                let supported: Vec<&str> = Self::ALL.iter().map(Algorithm::name).collect();
                AnonymizeError::Configuration(format!(
                    "Unknown algorithm '{}'. Must be one of: {}",
                    s,
                    supported.join(", ")
                ))
            })
    }
}
