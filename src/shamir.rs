use std::collections::BTreeMap;

use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand_chacha::rand_core::RngCore;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;
use zeroize::Zeroize;

use crate::codec;
use crate::config::{Config, Encoding};
use crate::error::{Result, ShamirError};
use crate::polynomial::{interpolate_at_zero, Polynomial};
use crate::prime_field::PrimeField;
use crate::share::{Share, ShareCollection, ShareInput};

/// Minimum admissible threshold
const MIN_THRESHOLD: u32 = 2;

/// Splits secrets into share sets over a prime field.
///
/// Each chunk of the secret becomes the constant term of a fresh random
/// polynomial of degree `threshold − 1`; share `i` collects the evaluations
/// of every chunk polynomial at `x = i`. Outputs are not reproducible
/// across calls: every split seeds a new ChaCha20 generator from the
/// operating system.
#[derive(Debug, Clone)]
pub struct Splitter {
    field: PrimeField,
    encoding: Encoding,
    chunk_size: usize,
}

impl Splitter {
    pub fn new(config: &Config) -> Self {
        Self {
            field: PrimeField::new(config.prime().clone()),
            encoding: config.encoding(),
            chunk_size: config.chunk_size(),
        }
    }

    /// Splits `secret` into `share_count` shares, any `threshold` of which
    /// reconstruct it.
    ///
    /// # Errors
    /// - [`ShamirError::ThresholdTooLow`] when `threshold < 2`
    /// - [`ShamirError::ThresholdExceedsShares`] when `threshold > share_count`
    /// - [`ShamirError::RngUnavailable`] when the OS entropy source fails
    pub fn split(
        &self,
        secret: &[u8],
        threshold: u32,
        share_count: u32,
    ) -> Result<ShareCollection> {
        let mut rng =
            ChaCha20Rng::try_from_rng(&mut OsRng).map_err(|_| ShamirError::RngUnavailable)?;
        self.split_with_rng(secret, threshold, share_count, &mut rng)
    }

    fn split_with_rng<R: RngCore>(
        &self,
        secret: &[u8],
        threshold: u32,
        share_count: u32,
        rng: &mut R,
    ) -> Result<ShareCollection> {
        if threshold < MIN_THRESHOLD {
            return Err(ShamirError::ThresholdTooLow(threshold));
        }
        if threshold > share_count {
            return Err(ShamirError::ThresholdExceedsShares {
                threshold,
                share_count,
            });
        }

        let chunks = codec::chunk_secret(secret, self.chunk_size);

        // values[i] is share i+1's row of y-values, one per chunk; for a
        // fixed chunk every row draws on the same polynomial.
        let mut values: Vec<Vec<BigUint>> =
            vec![Vec::with_capacity(chunks.len()); share_count as usize];
        for chunk in chunks {
            let mut polynomial = Polynomial::random(
                &self.field,
                threshold - 1,
                codec::chunk_to_field(chunk),
                rng,
            );
            for (row, x) in values.iter_mut().zip(1..=share_count) {
                row.push(polynomial.evaluate(&BigUint::from(x)));
            }
            polynomial.clear();
        }

        let shares = values
            .into_iter()
            .zip(1..=share_count)
            .map(|(row, index)| {
                let payload = codec::serialize_values(&row);
                let value = self.encoding.encode(payload.as_bytes());
                Share::new(index, value, threshold)
            })
            .collect();

        Ok(ShareCollection::new(shares))
    }
}

/// Reconstructs secrets from share sets.
#[derive(Debug, Clone)]
pub struct Combiner {
    field: PrimeField,
    encoding: Encoding,
}

impl Combiner {
    pub fn new(config: &Config) -> Self {
        Self {
            field: PrimeField::new(config.prime().clone()),
            encoding: config.encoding(),
        }
    }

    /// Reconstructs the secret from a quorum of shares produced by one
    /// split.
    ///
    /// Accepts share records and encoded share strings interchangeably.
    /// Supplying more than `threshold` shares is fine; all of them enter
    /// the interpolation, and the result does not depend on which valid
    /// quorum was chosen or in what order.
    ///
    /// # Errors
    /// - [`ShamirError::NoSharesProvided`] for empty input
    /// - [`ShamirError::InvalidShareFormat`] for an unparseable share string
    /// - [`ShamirError::ShareChecksumMismatch`] when a share value was damaged
    /// - [`ShamirError::SharesDifferentThresholds`] for mixed share sets
    /// - [`ShamirError::InsufficientShares`] below the threshold
    /// - [`ShamirError::Base64DecodeFailed`] / [`ShamirError::HexDecodeFailed`]
    ///   for payloads outside the configured encoding
    /// - [`ShamirError::InvalidShareDataFormat`] /
    ///   [`ShamirError::InvalidChunkDataType`] for malformed payloads
    pub fn combine<I>(&self, inputs: I) -> Result<Vec<u8>>
    where
        I: IntoIterator,
        I::Item: Into<ShareInput>,
    {
        let shares = normalize(inputs)?;
        validate(&shares)?;

        let mut decoded: Vec<(BigUint, Vec<BigUint>)> = Vec::with_capacity(shares.len());
        for share in shares.values() {
            let mut payload = self.encoding.decode(share.value())?;
            let values = codec::deserialize_values(&payload);
            payload.zeroize();
            decoded.push((BigUint::from(share.index()), values?));
        }

        let chunk_count = decoded[0].1.len();
        if decoded.iter().any(|(_, values)| values.len() != chunk_count) {
            return Err(ShamirError::InvalidShareDataFormat);
        }

        let mut secret = Vec::new();
        for chunk_index in 0..chunk_count {
            let points: Vec<(BigUint, BigUint)> = decoded
                .iter()
                .map(|(x, values)| (x.clone(), values[chunk_index].clone()))
                .collect();
            let element = interpolate_at_zero(&self.field, &points)?;
            let mut chunk = codec::field_to_chunk(&element);
            secret.extend_from_slice(&chunk);
            chunk.zeroize();
        }
        Ok(secret)
    }
}

/// Folds heterogeneous inputs into records keyed by share index. Keying by
/// index collapses duplicates, which keeps the interpolation x-coordinates
/// distinct.
fn normalize<I>(inputs: I) -> Result<BTreeMap<u32, Share>>
where
    I: IntoIterator,
    I::Item: Into<ShareInput>,
{
    let mut shares = BTreeMap::new();
    for input in inputs {
        let share = input.into().into_share()?;
        shares.insert(share.index(), share);
    }
    Ok(shares)
}

fn validate(shares: &BTreeMap<u32, Share>) -> Result<()> {
    let Some(first) = shares.values().next() else {
        return Err(ShamirError::NoSharesProvided);
    };
    for share in shares.values() {
        if !share.verify_checksum() {
            return Err(ShamirError::ShareChecksumMismatch(share.index()));
        }
    }
    let threshold = first.threshold();
    if shares.values().any(|share| share.threshold() != threshold) {
        return Err(ShamirError::SharesDifferentThresholds);
    }
    if (shares.len() as u32) < threshold {
        return Err(ShamirError::InsufficientShares {
            provided: shares.len() as u32,
            required: threshold,
        });
    }
    Ok(())
}

/// Entry point tying a [`Config`] to the split and combine pipelines.
///
/// The scheme holds no cryptographic state: every split seeds a fresh
/// generator, so schemes are cheap to clone and safe to share across
/// threads. `ShamirScheme::default()` pairs the 256-bit prime with base64.
///
/// # Example
/// ```
/// use primeshare::ShamirScheme;
///
/// let scheme = ShamirScheme::default();
/// let shares = scheme.split(b"my secret data", 3, 5).unwrap();
/// let secret = scheme.combine(&shares.shares()[0..3]).unwrap();
/// assert_eq!(secret, b"my secret data");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShamirScheme {
    config: Config,
}

impl ShamirScheme {
    /// A scheme over the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// A new scheme with the configuration replaced
    pub fn with_config(&self, config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// See [`Splitter::split`]
    pub fn split(
        &self,
        secret: &[u8],
        threshold: u32,
        share_count: u32,
    ) -> Result<ShareCollection> {
        Splitter::new(&self.config).split(secret, threshold, share_count)
    }

    /// See [`Combiner::combine`]
    pub fn combine<I>(&self, inputs: I) -> Result<Vec<u8>>
    where
        I: IntoIterator,
        I::Item: Into<ShareInput>,
    {
        Combiner::new(&self.config).combine(inputs)
    }

    /// True when every share carries the same threshold; fewer than two
    /// shares are trivially compatible.
    pub fn are_compatible(&self, shares: &[Share]) -> bool {
        shares
            .windows(2)
            .all(|pair| pair[0].threshold() == pair[1].threshold())
    }
}
