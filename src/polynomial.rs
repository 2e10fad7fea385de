use num_bigint::BigUint;
use num_traits::Zero;
use rand_chacha::rand_core::RngCore;
use zeroize::Zeroize;

use crate::error::Result;
use crate::prime_field::PrimeField;

/// Bytes of fresh randomness per coefficient for primes of 128 bits or more
const COEFFICIENT_BYTES: usize = 16;

/// Extra sampling margin, in bits, for primes narrower than 128 bits
const NARROW_PRIME_MARGIN_BITS: u64 = 64;

/// A polynomial over a prime field with the secret chunk as its constant
/// term.
///
/// Non-constant coefficients are secret-adjacent material: [`clear`] wipes
/// them once every evaluation is done, and dropping the polynomial clears
/// them again.
///
/// [`clear`]: Polynomial::clear
#[derive(Debug)]
pub struct Polynomial {
    field: PrimeField,
    coefficients: Vec<BigUint>,
}

impl Polynomial {
    /// Builds a random polynomial of the given degree with `constant` as the
    /// constant term.
    ///
    /// Coefficients are drawn as 16 big-endian bytes from `rng` when the
    /// prime has at least 128 bits; narrower primes sample 64 bits beyond
    /// the prime width and reduce.
    pub fn random<R: RngCore>(
        field: &PrimeField,
        degree: u32,
        constant: BigUint,
        rng: &mut R,
    ) -> Self {
        let mut coefficients = Vec::with_capacity(degree as usize + 1);
        coefficients.push(constant);
        for _ in 0..degree {
            coefficients.push(random_coefficient(field, rng));
        }
        Self {
            field: field.clone(),
            coefficients,
        }
    }

    /// Horner evaluation: `((c[d]·x + c[d−1])·x + …)·x + c[0]`
    pub fn evaluate(&self, x: &BigUint) -> BigUint {
        self.coefficients
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, coefficient| {
                self.field.add(&self.field.mul(&acc, x), coefficient)
            })
    }

    pub fn constant_term(&self) -> &BigUint {
        &self.coefficients[0]
    }

    pub fn coefficients(&self) -> &[BigUint] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Overwrites every non-constant coefficient with zero. The constant
    /// term is the caller's secret chunk and stays untouched.
    pub fn clear(&mut self) {
        for coefficient in self.coefficients.iter_mut().skip(1) {
            *coefficient = BigUint::zero();
        }
    }
}

impl Drop for Polynomial {
    fn drop(&mut self) {
        self.clear();
    }
}

fn random_coefficient<R: RngCore>(field: &PrimeField, rng: &mut R) -> BigUint {
    let prime_bits = field.prime().bits();
    if prime_bits >= (COEFFICIENT_BYTES as u64) * 8 {
        let mut buf = [0u8; COEFFICIENT_BYTES];
        rng.fill_bytes(&mut buf);
        let value = BigUint::from_bytes_be(&buf);
        buf.zeroize();
        value
    } else {
        let sample_bits = prime_bits + NARROW_PRIME_MARGIN_BITS;
        let mut buf = vec![0u8; sample_bits.div_ceil(8) as usize];
        rng.fill_bytes(&mut buf);
        let value = BigUint::from_bytes_be(&buf) % field.prime();
        buf.zeroize();
        value
    }
}

/// Lagrange interpolation evaluated at x = 0.
///
/// Computes `Σᵢ yᵢ · Lᵢ(0)` with `Lᵢ(0) = Π_{j≠i} (−xⱼ)/(xᵢ−xⱼ)`, rewritten
/// as `Π_{j≠i} xⱼ/(xⱼ−xᵢ)` so every operand stays non-negative. Callers
/// guarantee the x-coordinates are distinct and non-zero; iteration order
/// does not affect the sum.
pub fn interpolate_at_zero(field: &PrimeField, points: &[(BigUint, BigUint)]) -> Result<BigUint> {
    let mut value = BigUint::zero();
    for (i, (x_i, y_i)) in points.iter().enumerate() {
        let mut numerator = BigUint::from(1u32);
        let mut denominator = BigUint::from(1u32);
        for (j, (x_j, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator = field.mul(&numerator, x_j);
            denominator = field.mul(&denominator, &field.sub(x_j, x_i));
        }
        let basis = field.div(&numerator, &denominator)?;
        value = field.add(&value, &field.mul(y_i, &basis));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::prime_256;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn small_field() -> PrimeField {
        PrimeField::new(BigUint::from(1613u32))
    }

    fn big(value: u32) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn test_constant_polynomial_evaluates_to_constant() {
        let field = small_field();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let polynomial = Polynomial::random(&field, 0, big(1234), &mut rng);
        assert_eq!(polynomial.degree(), 0);
        for x in 1u32..6 {
            assert_eq!(polynomial.evaluate(&big(x)), big(1234));
        }
    }

    #[test]
    fn test_horner_matches_schoolbook() {
        // f(x) = 1234 + 166x + 94x² over GF(1613), evaluations from a
        // worked example: f(1) = 1494, f(2) = 329, f(3) = 965
        let field = small_field();
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let mut polynomial = Polynomial::random(&field, 2, big(1234), &mut rng);
        polynomial.coefficients[1] = big(166);
        polynomial.coefficients[2] = big(94);

        assert_eq!(polynomial.evaluate(&big(1)), big(1494));
        assert_eq!(polynomial.evaluate(&big(2)), big(329));
        assert_eq!(polynomial.evaluate(&big(3)), big(965));
    }

    #[test]
    fn test_random_polynomial_shape() {
        let field = PrimeField::new(prime_256());
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let polynomial = Polynomial::random(&field, 4, big(77), &mut rng);
        assert_eq!(polynomial.degree(), 4);
        assert_eq!(polynomial.coefficients().len(), 5);
        assert_eq!(polynomial.constant_term(), &big(77));
    }

    #[test]
    fn test_clear_wipes_random_coefficients() {
        let field = PrimeField::new(prime_256());
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let mut polynomial = Polynomial::random(&field, 3, big(42), &mut rng);
        polynomial.clear();
        assert_eq!(polynomial.constant_term(), &big(42));
        for coefficient in polynomial.coefficients().iter().skip(1) {
            assert!(coefficient.is_zero());
        }
    }

    #[test]
    fn test_interpolation_recovers_constant_term() {
        let field = small_field();
        let points = vec![
            (big(1), big(1494)),
            (big(2), big(329)),
            (big(3), big(965)),
        ];
        assert_eq!(interpolate_at_zero(&field, &points).unwrap(), big(1234));
    }

    #[test]
    fn test_interpolation_ignores_point_order() {
        let field = small_field();
        let mut points = vec![
            (big(3), big(965)),
            (big(1), big(1494)),
            (big(2), big(329)),
        ];
        assert_eq!(interpolate_at_zero(&field, &points).unwrap(), big(1234));
        points.reverse();
        assert_eq!(interpolate_at_zero(&field, &points).unwrap(), big(1234));
    }

    #[test]
    fn test_interpolation_any_quorum_of_random_polynomial() {
        let field = PrimeField::new(prime_256());
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let secret = big(987654321);
        let polynomial = Polynomial::random(&field, 2, secret.clone(), &mut rng);

        let points: Vec<(BigUint, BigUint)> = (1u32..=5)
            .map(|x| (big(x), polynomial.evaluate(&big(x))))
            .collect();

        for quorum in [[0, 1, 2], [0, 2, 4], [2, 3, 4], [0, 1, 4]] {
            let subset: Vec<(BigUint, BigUint)> =
                quorum.iter().map(|&i| points[i].clone()).collect();
            assert_eq!(interpolate_at_zero(&field, &subset).unwrap(), secret);
        }
    }
}
