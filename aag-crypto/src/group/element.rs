//! Group elements as unitriangular matrices over a [`Ring`].

use std::fmt;
use std::ops::Mul;

use crate::errors::AagCryptoError;
use crate::ring::matrix_ops::{
    identity_matrix, is_upper_unitriangular, matrix_mul, square_dimension, unitriangular_inverse,
};
use crate::ring::{Matrix, Ring, Scalar};

use itertools::Itertools;

/// An upper unitriangular n×n matrix with entries normalized in its ring.
///
/// The shape is checked once at construction and preserved by every operation,
/// so multiplication, inversion and powers never fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupElement {
    ring: Ring,
    matrix: Matrix,
}

impl GroupElement {
    pub fn identity(dimension: usize, ring: Ring) -> Self {
        Self {
            ring,
            matrix: identity_matrix(dimension),
        }
    }

    /// Validates and normalizes `rows` into an element.
    ///
    /// # Errors
    ///
    /// Returns `AagCryptoError::StructuralViolation` for a non-square matrix or one
    /// that is not upper unitriangular in `ring`.
    pub fn try_from_rows(rows: Matrix, ring: Ring) -> Result<Self, AagCryptoError> {
        square_dimension(&rows).map_err(|e| AagCryptoError::StructuralViolation(e.to_string()))?;
        if !is_upper_unitriangular(&rows, &ring) {
            return Err(AagCryptoError::StructuralViolation(
                "matrix is not upper unitriangular".into(),
            ));
        }

        let matrix = rows
            .iter()
            .map(|row| row.iter().map(|v| ring.normalize(v)).collect())
            .collect();
        Ok(Self { ring, matrix })
    }

    /// Same as [`GroupElement::try_from_rows`] for machine-integer literals.
    pub fn try_from_i64_rows(rows: &[Vec<i64>], ring: Ring) -> Result<Self, AagCryptoError> {
        let matrix = rows
            .iter()
            .map(|row| row.iter().map(|&v| ring.from_i64(v)).collect())
            .collect();
        Self::try_from_rows(matrix, ring)
    }

    pub fn ring(&self) -> Ring {
        self.ring
    }

    pub fn dimension(&self) -> usize {
        self.matrix.len()
    }

    pub fn rows(&self) -> &Matrix {
        &self.matrix
    }

    pub fn entry(&self, row: usize, col: usize) -> Option<&Scalar> {
        self.matrix.get(row).and_then(|r| r.get(col))
    }

    pub fn is_identity(&self) -> bool {
        self.matrix == identity_matrix(self.dimension())
    }

    /// Computes `self · other`.
    pub fn multiply(&self, other: &GroupElement) -> GroupElement {
        debug_assert_eq!(self.ring, other.ring, "multiplying elements of different rings");
        GroupElement {
            ring: self.ring,
            matrix: matrix_mul(&self.matrix, &other.matrix, &self.ring),
        }
    }

    pub fn invert(&self) -> GroupElement {
        GroupElement {
            ring: self.ring,
            matrix: unitriangular_inverse(&self.matrix, &self.ring),
        }
    }

    /// Computes `self^k` for any integer `k` by square-and-multiply.
    ///
    /// # Example
    ///
    /// ```
    /// # use aag_crypto::group::{create_heisenberg_group, Group};
    /// let group = create_heisenberg_group(0).unwrap();
    /// let x = group.x();
    /// assert_eq!(x.power(3).multiply(&x.power(-3)), group.identity());
    /// assert!(x.power(0).is_identity());
    /// ```
    pub fn power(&self, k: i64) -> GroupElement {
        if k == 0 {
            return GroupElement::identity(self.dimension(), self.ring);
        }

        let mut base = if k < 0 { self.invert() } else { self.clone() };
        let mut exponent = k.unsigned_abs();
        let mut acc = GroupElement::identity(self.dimension(), self.ring);
        while exponent > 0 {
            if exponent & 1 == 1 {
                acc = acc.multiply(&base);
            }
            exponent >>= 1;
            if exponent > 0 {
                base = base.multiply(&base);
            }
        }
        acc
    }

    /// Conjugation `inv(p) · self · p`.
    pub fn conjugate_by(&self, p: &GroupElement) -> GroupElement {
        p.invert().multiply(self).multiply(p)
    }

    /// Commutator `[a, b] = inv(a) · inv(b) · a · b`.
    pub fn commutator(a: &GroupElement, b: &GroupElement) -> GroupElement {
        a.invert().multiply(&b.invert()).multiply(a).multiply(b)
    }
}

impl<'a> Mul<&'a GroupElement> for &GroupElement {
    type Output = GroupElement;

    fn mul(self, rhs: &'a GroupElement) -> GroupElement {
        self.multiply(rhs)
    }
}

impl fmt::Display for GroupElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .matrix
            .iter()
            .map(|row| format!("[{}]", row.iter().join(" ")))
            .join("\n");
        write!(f, "{rows}")
    }
}
