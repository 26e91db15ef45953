//! Implementation of ring ops over Z (modulus 0) or Z/rZ.

use crate::errors::AagCryptoError;

use super::Scalar;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Represents the integers, or a finite ring Z_r when `modulus` is non-zero.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Ring {
    pub modulus: u64,
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// A modulus of 0 selects exact integer arithmetic. A modulus of 1 is rejected
    /// because Z/1Z identifies 1 with 0.
    pub fn try_with(modulus: u64) -> Result<Self, AagCryptoError> {
        if modulus == 1 {
            return Err(AagCryptoError::InvalidModulus(
                "Modulus must be 0 (exact integers) or greater than 1, got 1".to_string(),
            ));
        }

        Ok(Ring { modulus })
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use aag_crypto::ring::Ring;
    /// let ring = Ring::try_with(13).unwrap();
    /// assert_eq!(ring.modulus(), 13);
    /// ```
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// `true` when no reduction takes place.
    pub fn is_exact(&self) -> bool {
        self.modulus == 0
    }

    /// Normalizes a value to be within the range `[0, modulus - 1]`.
    ///
    /// Values are returned untouched by the exact ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use aag_crypto::ring::Ring;
    /// # use num_bigint::BigInt;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.normalize(&BigInt::from(15)), BigInt::from(5));
    /// assert_eq!(ring.normalize(&BigInt::from(-3)), BigInt::from(7));
    ///
    /// let exact = Ring::try_with(0).unwrap();
    /// assert_eq!(exact.normalize(&BigInt::from(-3)), BigInt::from(-3));
    /// ```
    pub fn normalize(&self, value: &Scalar) -> Scalar {
        if self.is_exact() {
            return value.clone();
        }

        value.mod_floor(&BigInt::from(self.modulus))
    }

    /// Lifts a machine integer into the ring.
    pub fn from_i64(&self, value: i64) -> Scalar {
        self.normalize(&BigInt::from(value))
    }

    /// Computes `(a + b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use aag_crypto::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.add(&ring.from_i64(7), &ring.from_i64(5)), ring.from_i64(2));
    /// ```
    pub fn add(&self, a: &Scalar, b: &Scalar) -> Scalar {
        self.normalize(&(a + b))
    }

    /// Computes `(a - b) mod modulus`.
    pub fn sub(&self, a: &Scalar, b: &Scalar) -> Scalar {
        self.normalize(&(a - b))
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use aag_crypto::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.mul(&ring.from_i64(7), &ring.from_i64(5)), ring.from_i64(5));
    /// assert_eq!(ring.mul(&ring.from_i64(-2), &ring.from_i64(6)), ring.from_i64(8));
    /// ```
    pub fn mul(&self, a: &Scalar, b: &Scalar) -> Scalar {
        self.normalize(&(a * b))
    }

    /// Computes the additive inverse `-a mod modulus`.
    pub fn neg(&self, a: &Scalar) -> Scalar {
        if a.is_zero() {
            return Scalar::zero();
        }

        self.normalize(&(-a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_creation() {
        assert!(Ring::try_with(0).is_ok());
        assert!(Ring::try_with(11).is_ok());
        assert!(Ring::try_with(25).is_ok());
        assert!(Ring::try_with(1).is_err());
    }

    #[test]
    fn test_element_normalization() -> Result<(), AagCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.from_i64(5), BigInt::from(5));
        assert_eq!(ring.from_i64(16), BigInt::from(5));
        assert_eq!(ring.from_i64(-6), BigInt::from(5));
        Ok(())
    }

    #[test]
    fn test_exact_ring_keeps_values() -> Result<(), AagCryptoError> {
        let ring = Ring::try_with(0)?;
        let big = BigInt::from(i64::MAX) * BigInt::from(i64::MAX);
        assert_eq!(ring.mul(&BigInt::from(i64::MAX), &BigInt::from(i64::MAX)), big);
        assert_eq!(ring.sub(&ring.from_i64(3), &ring.from_i64(5)), BigInt::from(-2));
        Ok(())
    }

    #[test]
    fn test_addition() -> Result<(), AagCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.add(&ring.from_i64(5), &ring.from_i64(8)), BigInt::from(2));
        assert_eq!(ring.add(&ring.from_i64(-3), &ring.from_i64(8)), BigInt::from(5));
        Ok(())
    }

    #[test]
    fn test_subtraction() -> Result<(), AagCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.sub(&ring.from_i64(5), &ring.from_i64(8)), BigInt::from(8));
        assert_eq!(ring.sub(&ring.from_i64(8), &ring.from_i64(5)), BigInt::from(3));
        Ok(())
    }

    #[test]
    fn test_multiplication() -> Result<(), AagCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.mul(&ring.from_i64(5), &ring.from_i64(8)), BigInt::from(7));
        assert_eq!(ring.mul(&ring.from_i64(-2), &ring.from_i64(8)), BigInt::from(6));
        Ok(())
    }

    #[test]
    fn test_negation() -> Result<(), AagCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.neg(&ring.from_i64(5)), BigInt::from(6));
        assert_eq!(ring.neg(&ring.from_i64(0)), BigInt::from(0));

        let exact = Ring::try_with(0)?;
        assert_eq!(exact.neg(&exact.from_i64(5)), BigInt::from(-5));
        Ok(())
    }
}
