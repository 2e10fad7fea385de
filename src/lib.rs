//! Shamir's secret sharing over large prime fields
//!
//! This library splits a byte secret into `n` portable, checksummed shares
//! such that any `k` of them reconstruct the secret exactly while `k − 1`
//! reveal nothing about it. Secrets of any length are supported: bytes are
//! chunked into field elements, each chunk rides its own random polynomial,
//! and reconstruction runs Lagrange interpolation at x = 0 per chunk.
//!
//! ## Properties
//!
//! - **Information-theoretic threshold** - below `k` shares every candidate
//!   secret is equally likely; security does not rest on a hardness
//!   assumption
//! - **Cryptographically secure randomness** - polynomial coefficients come
//!   from ChaCha20Rng seeded from OsRng
//! - **Integrity checking** - every share carries a SHA-256 checksum of its
//!   payload, verified with a constant-time comparison before combining
//! - **Portable shares** - a compact `index:threshold:checksum:value`
//!   string form and a structured JSON form, with base64 or hex payloads
//!
//! The checksum detects accidental corruption only; it is not an
//! authenticator and the scheme does not defend against malicious share
//! holders.
//!
//! # Quick Start
//! ```
//! use primeshare::ShamirScheme;
//!
//! // Split a secret into 5 shares, any 3 of which reconstruct it
//! let scheme = ShamirScheme::default();
//! let shares = scheme.split(b"my secret data", 3, 5).unwrap();
//!
//! let secret = scheme.combine(&shares.shares()[0..3]).unwrap();
//! assert_eq!(secret, b"my secret data");
//! ```
//!
//! ## Transporting shares as strings
//! ```
//! use primeshare::ShamirScheme;
//!
//! let scheme = ShamirScheme::default();
//! let shares = scheme.split(b"pin:1234", 2, 3).unwrap();
//!
//! // Hand each holder one line; any two lines recover the secret
//! let lines: Vec<String> = shares.iter().map(|share| share.to_string()).collect();
//! let secret = scheme.combine(lines[1..3].to_vec()).unwrap();
//! assert_eq!(secret, b"pin:1234");
//! ```
//!
//! ## Choosing the field and encoding
//! ```
//! use primeshare::{prime_512, Config, Encoding, ShamirScheme};
//!
//! let config = Config::new()
//!     .with_prime(prime_512())
//!     .unwrap()
//!     .with_encoding(Encoding::Hex);
//! let scheme = ShamirScheme::new(config);
//!
//! let shares = scheme.split(b"wider field, hex payloads", 2, 4).unwrap();
//! let secret = scheme.combine(&shares.shares()[2..4]).unwrap();
//! assert_eq!(secret, b"wider field, hex payloads");
//! ```

mod codec;
mod config;
mod error;
mod polynomial;
mod prime_field;
mod shamir;
mod share;

pub use config::{prime_128, prime_256, prime_512, Config, Encoding};
pub use error::{Result, ShamirError};
pub use polynomial::{interpolate_at_zero, Polynomial};
pub use prime_field::PrimeField;
pub use shamir::{Combiner, ShamirScheme, Splitter};
pub use share::{Share, ShareCollection, ShareInput};

// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        prime_128, prime_256, prime_512, Combiner, Config, Encoding, PrimeField, Result,
        ShamirError, ShamirScheme, Share, ShareCollection, ShareInput, Splitter,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_workflow() -> Result<()> {
        let secret = b"This is a secret message that needs to be protected!";

        let scheme = ShamirScheme::default();
        let shares = scheme.split(secret, 3, 5)?;
        assert_eq!(shares.len(), 5);

        // Distribute, then collect a quorum back by index
        let distributed = shares.for_distribution();
        assert_eq!(distributed.len(), 5);

        let quorum: Vec<Share> = [1u32, 3, 5]
            .iter()
            .map(|index| distributed[index].clone())
            .collect();

        let reconstructed = scheme.combine(quorum)?;
        assert_eq!(reconstructed, secret);

        Ok(())
    }

    #[test]
    fn test_error_handling() {
        let scheme = ShamirScheme::default();

        assert!(matches!(
            scheme.split(b"secret", 1, 5),
            Err(ShamirError::ThresholdTooLow(_))
        ));

        let shares = scheme.split(b"test", 3, 5).unwrap();
        assert!(matches!(
            scheme.combine(&shares.shares()[0..2]),
            Err(ShamirError::InsufficientShares { .. })
        ));
    }
}
