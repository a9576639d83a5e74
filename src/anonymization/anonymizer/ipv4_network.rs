//! IPv4 network strategy

use super::Anonymizer;
use crate::anonymization::algorithm::Algorithm;
use crate::domain::{AnonymizeError, Result, Scalar, TransformationError};
use std::net::Ipv4Addr;

/// Longest valid IPv4 prefix
pub const MAX_PREFIX_LEN: u8 = 32;

/// Network strategy - replaces an address with its network address
///
/// `192.168.1.123` with a `/24` prefix becomes `192.168.1.0`. Inputs written
/// in CIDR form (`10.1.2.3/8`) are masked with the narrower of the two
/// prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Network {
    prefix_len: u8,
    mask: u32,
}

impl Ipv4Network {
    /// Create a strategy from a prefix length (0–32)
    pub fn new(prefix_len: u8) -> Result<Self> {
        if prefix_len > MAX_PREFIX_LEN {
            return Err(AnonymizeError::Configuration(format!(
                "IPV4_NETWORK prefix length {prefix_len} is out of range (0-{MAX_PREFIX_LEN})"
            )));
        }
        Ok(Self {
            prefix_len,
            mask: mask_for(prefix_len),
        })
    }

    /// Create a strategy from the configured key, a decimal prefix length
    pub fn from_key(key: &str) -> Result<Self> {
        let prefix_len = key.trim().parse::<u8>().map_err(|_| {
            AnonymizeError::Configuration(format!(
                "IPV4_NETWORK key must be a prefix length between 0 and {MAX_PREFIX_LEN}, got '{key}'"
            ))
        })?;
        Self::new(prefix_len)
    }

    /// Configured prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    fn mask_address(&self, input: &str) -> std::result::Result<Ipv4Addr, TransformationError> {
        let invalid = || TransformationError::InvalidAddress(input.to_string());

        let (address, mask) = match input.split_once('/') {
            Some((address, len)) => {
                let len: u8 = len.parse().map_err(|_| invalid())?;
                if len > MAX_PREFIX_LEN {
                    return Err(invalid());
                }
                (address, self.mask & mask_for(len))
            }
            None => (input, self.mask),
        };

        let address: Ipv4Addr = address.parse().map_err(|_| invalid())?;
        Ok(Ipv4Addr::from(u32::from(address) & mask))
    }
}

impl Anonymizer for Ipv4Network {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Ipv4Network
    }

    fn anonymize(&self, value: &Scalar) -> std::result::Result<Scalar, TransformationError> {
        match value {
            Scalar::Text(text) => Ok(Scalar::Text(self.mask_address(text)?.to_string())),
            Scalar::Integer(i) => Err(TransformationError::InvalidAddress(i.to_string())),
        }
    }
}

fn mask_for(prefix_len: u8) -> u32 {
    u32::MAX
        .checked_shl(u32::from(MAX_PREFIX_LEN - prefix_len))
        .unwrap_or(0)
}
