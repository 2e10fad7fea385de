use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use crate::error::{Result, ShamirError};

/// Arithmetic over the integers modulo a large prime.
///
/// Elements are non-negative integers below the modulus; every operation
/// reduces its result into `[0, p − 1]`. The type is a plain value and is
/// cheap to clone and share across threads.
///
/// # Example
/// ```
/// use num_bigint::BigUint;
/// use primeshare::{prime_256, PrimeField};
///
/// let field = PrimeField::new(prime_256());
/// let a = BigUint::from(1234u32);
/// let inverse = field.inv(&a).unwrap();
/// assert_eq!(field.mul(&a, &inverse), BigUint::from(1u32));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeField {
    prime: BigUint,
}

impl PrimeField {
    pub fn new(prime: BigUint) -> Self {
        Self { prime }
    }

    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    fn reduce(&self, value: &BigUint) -> BigUint {
        value % &self.prime
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.prime
    }

    /// Subtraction with non-negative normalization
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = self.reduce(a);
        let b = self.reduce(b);
        if a >= b {
            a - b
        } else {
            &self.prime - b + a
        }
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.prime
    }

    /// Multiplicative inverse via the extended Euclidean algorithm
    ///
    /// Fails only for inputs congruent to zero, which have no inverse.
    pub fn inv(&self, a: &BigUint) -> Result<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return Err(ShamirError::NoModularInverse);
        }
        let modulus = BigInt::from_biguint(Sign::Plus, self.prime.clone());
        let (gcd, bezout) = extended_gcd(BigInt::from_biguint(Sign::Plus, a), modulus.clone());
        if !gcd.is_one() {
            return Err(ShamirError::NoModularInverse);
        }
        let mut inverse = bezout % &modulus;
        if inverse.sign() == Sign::Minus {
            inverse += &modulus;
        }
        Ok(inverse.to_biguint().expect("non-negative"))
    }

    /// Field division: `a · b⁻¹ mod p`
    pub fn div(&self, a: &BigUint, b: &BigUint) -> Result<BigUint> {
        let inverse = self.inv(b)?;
        Ok(self.mul(a, &inverse))
    }
}

/// Iterative extended Euclidean algorithm; returns `(gcd, x)` such that
/// `a·x + b·y = gcd(a, b)`.
fn extended_gcd(a: BigInt, b: BigInt) -> (BigInt, BigInt) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }
    (old_r, old_s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{prime_256, prime_512};

    fn small_field() -> PrimeField {
        PrimeField::new(BigUint::from(1613u32))
    }

    #[test]
    fn test_add_wraps() {
        let field = small_field();
        let sum = field.add(&BigUint::from(1600u32), &BigUint::from(20u32));
        assert_eq!(sum, BigUint::from(7u32));
    }

    #[test]
    fn test_sub_normalizes() {
        let field = small_field();
        let difference = field.sub(&BigUint::from(3u32), &BigUint::from(10u32));
        assert_eq!(difference, BigUint::from(1606u32));
    }

    #[test]
    fn test_sub_matches_additive_inverse() {
        let field = small_field();
        let a = BigUint::from(555u32);
        let b = BigUint::from(1200u32);
        let negated = field.sub(&BigUint::zero(), &b);
        assert_eq!(field.sub(&a, &b), field.add(&a, &negated));
    }

    #[test]
    fn test_mul_commutes_and_associates() {
        let field = small_field();
        let a = BigUint::from(321u32);
        let b = BigUint::from(987u32);
        let c = BigUint::from(1555u32);
        assert_eq!(field.mul(&a, &b), field.mul(&b, &a));
        assert_eq!(
            field.mul(&field.mul(&a, &b), &c),
            field.mul(&a, &field.mul(&b, &c))
        );
    }

    #[test]
    fn test_inverse_small_field() {
        let field = small_field();
        for value in [1u32, 2, 3, 100, 1000, 1612] {
            let a = BigUint::from(value);
            let inverse = field.inv(&a).unwrap();
            assert_eq!(field.mul(&a, &inverse), BigUint::one(), "a = {value}");
        }
    }

    #[test]
    fn test_inverse_large_fields() {
        for prime in [prime_256(), prime_512()] {
            let field = PrimeField::new(prime.clone());
            let a = &prime - BigUint::from(12345u32);
            let inverse = field.inv(&a).unwrap();
            assert_eq!(field.mul(&a, &inverse), BigUint::one());
        }
    }

    #[test]
    fn test_zero_has_no_inverse() {
        let field = small_field();
        assert!(matches!(
            field.inv(&BigUint::zero()),
            Err(ShamirError::NoModularInverse)
        ));
        // Multiples of the prime reduce to zero
        assert!(field.inv(&BigUint::from(1613u32 * 3)).is_err());
    }

    #[test]
    fn test_division() {
        let field = small_field();
        let a = BigUint::from(500u32);
        let b = BigUint::from(77u32);
        let quotient = field.div(&a, &b).unwrap();
        assert_eq!(field.mul(&quotient, &b), a);
        assert!(field.div(&a, &BigUint::zero()).is_err());
    }

    #[test]
    fn test_inputs_above_modulus_are_reduced() {
        let field = small_field();
        let a = BigUint::from(1613u32 + 5);
        let b = BigUint::from(2u32 * 1613 + 7);
        assert_eq!(field.mul(&a, &b), field.mul(&BigUint::from(5u32), &BigUint::from(7u32)));
    }
}
