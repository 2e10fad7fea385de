//! Conversion between secret bytes, field elements and share payloads.
//!
//! A secret is cut into chunks small enough that the big-endian integer
//! value of each chunk stays below the prime modulus. Chunk values travel
//! inside shares as a JSON array of decimal strings, and come back to bytes
//! through the minimal big-endian encoding of the interpolated element.
//!
//! The byte round-trip is unpadded: leading `0x00` bytes of a chunk are not
//! represented in its integer value and do not reappear on reconstruction.
//! This keeps payloads byte-compatible with existing share sets.

use num_bigint::BigUint;
use num_traits::Zero;
use serde_json::Value;

use crate::error::{Result, ShamirError};

/// Bytes of headroom kept between the chunk width and the prime width
const CHUNK_MARGIN_BYTES: usize = 2;

/// Secret bytes packed into one field element for the given modulus.
///
/// Two bytes under the prime width guarantees every chunk value is below
/// the modulus: 30 bytes for a 256-bit prime, 14 for 128 bits, 62 for 512.
pub(crate) fn chunk_size(prime: &BigUint) -> usize {
    let bytes = (prime.bits() / 8) as usize;
    bytes.saturating_sub(CHUNK_MARGIN_BYTES).max(1)
}

/// Cuts a secret into chunk-sized slices; the last may be shorter.
///
/// The empty secret yields a single empty chunk, so a valid share set for
/// it reconstructs to an empty secret rather than failing.
pub(crate) fn chunk_secret(secret: &[u8], chunk_size: usize) -> Vec<&[u8]> {
    if secret.is_empty() {
        return vec![&[]];
    }
    secret.chunks(chunk_size).collect()
}

/// Big-endian integer value of a chunk; the empty chunk maps to zero.
pub(crate) fn chunk_to_field(chunk: &[u8]) -> BigUint {
    BigUint::from_bytes_be(chunk)
}

/// Minimal big-endian bytes of a field element; zero maps to the empty
/// chunk.
pub(crate) fn field_to_chunk(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        return Vec::new();
    }
    value.to_bytes_be()
}

/// Renders one share's chunk values as the canonical payload: a UTF-8 JSON
/// array of decimal-integer strings, one entry per chunk, in order.
pub(crate) fn serialize_values(values: &[BigUint]) -> String {
    let decimals: Vec<String> = values.iter().map(|v| v.to_str_radix(10)).collect();
    serde_json::to_string(&decimals).expect("string array serialization is infallible")
}

/// Parses a decoded payload back into chunk values.
pub(crate) fn deserialize_values(payload: &[u8]) -> Result<Vec<BigUint>> {
    let parsed: Value =
        serde_json::from_slice(payload).map_err(|_| ShamirError::InvalidShareDataFormat)?;
    let Value::Array(entries) = parsed else {
        return Err(ShamirError::InvalidShareDataFormat);
    };
    entries
        .into_iter()
        .map(|entry| match entry {
            Value::String(digits) => parse_decimal(&digits),
            _ => Err(ShamirError::InvalidChunkDataType),
        })
        .collect()
}

fn parse_decimal(digits: &str) -> Result<BigUint> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ShamirError::InvalidChunkDataType);
    }
    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(ShamirError::InvalidChunkDataType)
}
