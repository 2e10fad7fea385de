use thiserror::Error;

/// Error type for prime-field secret sharing operations
#[derive(Error, Debug)]
pub enum ShamirError {
    /// Threshold below the minimum of two shares
    #[error("Threshold {0} is below the minimum of 2")]
    ThresholdTooLow(u32),

    /// Threshold exceeds the number of shares to produce
    #[error("Threshold {threshold} exceeds share count {share_count}")]
    ThresholdExceedsShares { threshold: u32, share_count: u32 },

    /// Empty input handed to the combiner
    #[error("No shares provided")]
    NoSharesProvided,

    /// Input value is neither a share record nor an encoded share string
    #[error("Input is neither a share record nor an encoded share string")]
    InvalidShareType,

    /// Share value does not match its stored checksum
    #[error("Share {0} failed checksum verification")]
    ShareChecksumMismatch(u32),

    /// Shares in one set carry different thresholds
    #[error("Shares carry different thresholds")]
    SharesDifferentThresholds,

    /// Reserved for stricter set-level compatibility contracts
    #[error("Shares carry different checksums")]
    SharesDifferentChecksums,

    /// Fewer shares than the threshold requires
    #[error("Need at least {required} shares, got {provided}")]
    InsufficientShares { provided: u32, required: u32 },

    /// Share string does not follow the `index:threshold:checksum:value` form
    #[error("Invalid share format: {0}")]
    InvalidShareFormat(String),

    /// Structured share record lacks a field or types one wrongly
    #[error("Share record is missing required fields")]
    ShareMissingRequiredFields,

    /// Collection lookup for an index that was never produced
    #[error("No share with index {0}")]
    ShareNotFound(u32),

    /// Decoded share payload is not an array of chunk values
    #[error("Decoded share payload is not an array")]
    InvalidShareDataFormat,

    /// Share payload element is not a decimal-integer string
    #[error("Share payload element is not a decimal string")]
    InvalidChunkDataType,

    #[error("Base64 decoding failed: {0}")]
    Base64DecodeFailed(String),

    #[error("Hex decoding failed: {0}")]
    HexDecodeFailed(String),

    /// Zero has no multiplicative inverse; valid x-coordinates never hit this
    #[error("Element has no modular inverse")]
    NoModularInverse,

    /// Reserved; chunking keeps every secret value below the prime
    #[error("Secret value does not fit the field")]
    SecretTooLarge,

    /// The operating system entropy source could not seed the generator
    #[error("Random number generator unavailable")]
    RngUnavailable,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, ShamirError>;
