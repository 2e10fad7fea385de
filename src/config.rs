use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use num_bigint::BigUint;

use crate::codec;
use crate::error::{Result, ShamirError};

/// Smallest prime width that still leaves room for one chunk byte.
const MIN_PRIME_BITS: u64 = 24;

/// Text encoding applied to share payloads.
///
/// Both variants are strict on decode: any character outside the alphabet is
/// rejected, as are odd-length hex strings and malformed base64 padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Standard base64 alphabet (`A-Z a-z 0-9 + /`) with `=` padding
    #[default]
    Base64,
    /// Lowercase hexadecimal
    Hex,
}

impl Encoding {
    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Base64 => STANDARD.encode(bytes),
            Encoding::Hex => hex::encode(bytes),
        }
    }

    pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            Encoding::Base64 => STANDARD
                .decode(text)
                .map_err(|e| ShamirError::Base64DecodeFailed(e.to_string())),
            Encoding::Hex => {
                hex::decode(text).map_err(|e| ShamirError::HexDecodeFailed(e.to_string()))
            }
        }
    }
}

/// 2^128 − 159, the largest 128-bit prime.
pub fn prime_128() -> BigUint {
    BigUint::parse_bytes(b"ffffffffffffffffffffffffffffff61", 16).expect("valid prime constant")
}

/// The secp256k1 base field prime, 2^256 − 2^32 − 977.
pub fn prime_256() -> BigUint {
    BigUint::parse_bytes(
        b"fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
        16,
    )
    .expect("valid prime constant")
}

/// A 512-bit prime modulus, from https://neuromancer.sk/std/other/ssc-512
pub fn prime_512() -> BigUint {
    BigUint::parse_bytes(
        b"c90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74020bbea63b139b23\
          5a2359c4afbc9eb7987f1c9ab37e42599188c4b7dc6269b830d80897f57a5f71",
        16,
    )
    .expect("valid prime constant")
}

/// Configuration for a sharing scheme: the prime modulus and the text
/// encoding applied to share values.
///
/// Configurations are immutable; the `with_*` methods return a modified
/// copy. The default pairs the 256-bit prime with base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    prime: BigUint,
    encoding: Encoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prime: prime_256(),
            encoding: Encoding::Base64,
        }
    }
}

impl Config {
    /// Creates a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the prime modulus
    ///
    /// Any odd prime of at least 24 bits is accepted; narrower or even
    /// moduli cannot hold a chunk and are rejected.
    pub fn with_prime(mut self, prime: BigUint) -> Result<Self> {
        validate_prime(&prime)?;
        self.prime = prime;
        Ok(self)
    }

    /// Replaces the share text encoding
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Number of secret bytes packed into one field element
    pub fn chunk_size(&self) -> usize {
        codec::chunk_size(&self.prime)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        validate_prime(&self.prime)
    }
}

fn validate_prime(prime: &BigUint) -> Result<()> {
    if prime.bits() < MIN_PRIME_BITS {
        return Err(ShamirError::InvalidConfiguration(format!(
            "prime must have at least {MIN_PRIME_BITS} bits, got {}",
            prime.bits()
        )));
    }
    if !prime.bit(0) {
        return Err(ShamirError::InvalidConfiguration(
            "prime must be odd".into(),
        ));
    }
    Ok(())
}
