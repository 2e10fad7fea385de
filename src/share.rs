use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{Result, ShamirError};

/// One share of a split secret.
///
/// A share carries its x-coordinate (`index`), the encoded payload of
/// y-values (`value`), the reconstruction `threshold` of the set it belongs
/// to, and a SHA-256 `checksum` of the payload for corruption detection.
/// Shares are immutable after construction.
///
/// The checksum detects accidental damage only: anyone holding the encoded
/// value can recompute it, so it is not an authenticator.
///
/// # Example
/// ```
/// use primeshare::ShamirScheme;
///
/// let scheme = ShamirScheme::default();
/// let shares = scheme.split(b"secret", 3, 5).unwrap();
/// let share = &shares.shares()[0];
///
/// assert_eq!(share.index(), 1);
/// assert_eq!(share.threshold(), 3);
/// assert!(share.verify_checksum());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    index: u32,
    value: String,
    threshold: u32,
    checksum: String,
}

impl Share {
    /// Creates a share, deriving the checksum from the encoded value
    pub fn new(index: u32, value: String, threshold: u32) -> Self {
        let checksum = checksum_of(&value);
        Self {
            index,
            value,
            threshold,
            checksum,
        }
    }

    /// The share's x-coordinate, 1-based
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The encoded payload of y-values
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Minimum number of shares required to reconstruct the secret
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Lowercase-hex SHA-256 digest of the encoded value
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// Recomputes the checksum and compares it without short-circuiting on
    /// the first differing byte.
    pub fn verify_checksum(&self) -> bool {
        let calculated = checksum_of(&self.value);
        constant_time_eq(calculated.as_bytes(), self.checksum.as_bytes())
    }

    /// Builds a share from its structured JSON form.
    ///
    /// The record must carry `index` and `threshold` as integers and `value`
    /// and `checksum` as strings; unknown keys are ignored.
    pub fn from_record(record: &Value) -> Result<Self> {
        serde_json::from_value(record.clone()).map_err(|_| ShamirError::ShareMissingRequiredFields)
    }

    /// The structured JSON form: `{index, value, threshold, checksum}`
    pub fn to_record(&self) -> Value {
        serde_json::to_value(self).expect("share record serialization is infallible")
    }
}

impl fmt::Display for Share {
    /// Canonical string form: `<index>:<threshold>:<checksum>:<value>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.index, self.threshold, self.checksum, self.value
        )
    }
}

impl FromStr for Share {
    type Err = ShamirError;

    /// Parses the colon form, splitting at most four fields left-to-right so
    /// the value may itself contain colons.
    fn from_str(encoded: &str) -> Result<Self> {
        let mut parts = encoded.splitn(4, ':');
        let (Some(index), Some(threshold), Some(checksum), Some(value)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ShamirError::InvalidShareFormat(encoded.to_string()));
        };
        Ok(Self {
            index: parse_decimal_field(index, encoded)?,
            value: value.to_string(),
            threshold: parse_decimal_field(threshold, encoded)?,
            checksum: checksum.to_string(),
        })
    }
}

fn parse_decimal_field(digits: &str, encoded: &str) -> Result<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ShamirError::InvalidShareFormat(encoded.to_string()));
    }
    digits
        .parse()
        .map_err(|_| ShamirError::InvalidShareFormat(encoded.to_string()))
}

/// Lowercase-hex SHA-256 digest of an encoded share value
pub(crate) fn checksum_of(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

/// Byte comparison that examines every position regardless of mismatches
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut difference = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        difference |= x ^ y;
    }
    difference == 0
}

/// Admissible input to the combiner: an already-parsed record or the encoded
/// string form.
#[derive(Debug, Clone)]
pub enum ShareInput {
    Record(Share),
    Encoded(String),
}

impl ShareInput {
    /// Normalizes to a share record, parsing the encoded form if needed
    pub(crate) fn into_share(self) -> Result<Share> {
        match self {
            ShareInput::Record(share) => Ok(share),
            ShareInput::Encoded(encoded) => encoded.parse(),
        }
    }

    /// Normalizes a JSON value: objects are structured share records and
    /// strings are the encoded form; anything else is not a share.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(_) => Ok(ShareInput::Record(Share::from_record(value)?)),
            Value::String(encoded) => Ok(ShareInput::Encoded(encoded.clone())),
            _ => Err(ShamirError::InvalidShareType),
        }
    }
}

impl From<Share> for ShareInput {
    fn from(share: Share) -> Self {
        ShareInput::Record(share)
    }
}

impl From<&Share> for ShareInput {
    fn from(share: &Share) -> Self {
        ShareInput::Record(share.clone())
    }
}

impl From<String> for ShareInput {
    fn from(encoded: String) -> Self {
        ShareInput::Encoded(encoded)
    }
}

impl From<&str> for ShareInput {
    fn from(encoded: &str) -> Self {
        ShareInput::Encoded(encoded.to_string())
    }
}

/// The ordered product of one split, indexed 1..n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareCollection {
    shares: Vec<Share>,
}

impl ShareCollection {
    pub(crate) fn new(shares: Vec<Share>) -> Self {
        Self { shares }
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Looks a share up by its index (x-coordinate)
    pub fn get(&self, index: u32) -> Result<&Share> {
        self.shares
            .iter()
            .find(|share| share.index() == index)
            .ok_or(ShamirError::ShareNotFound(index))
    }

    /// The shares in index order
    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Share> {
        self.shares.iter()
    }

    /// Hands the shares out as a map keyed by index, ready to distribute to
    /// holders. Iteration order is unspecified and varies between maps.
    pub fn for_distribution(&self) -> HashMap<u32, Share> {
        self.shares
            .iter()
            .map(|share| (share.index(), share.clone()))
            .collect()
    }

    pub fn into_vec(self) -> Vec<Share> {
        self.shares
    }
}

impl IntoIterator for ShareCollection {
    type Item = Share;
    type IntoIter = std::vec::IntoIter<Share>;

    fn into_iter(self) -> Self::IntoIter {
        self.shares.into_iter()
    }
}

impl<'a> IntoIterator for &'a ShareCollection {
    type Item = &'a Share;
    type IntoIter = std::slice::Iter<'a, Share>;

    fn into_iter(self) -> Self::IntoIter {
        self.shares.iter()
    }
}
