use crate::errors::AagCryptoError;
use crate::ring::{Matrix, Ring, Scalar};

use num_traits::{One, Zero};

/// Returns the dimension `n` of an n×n matrix.
///
/// # Errors
///
/// Returns `AagCryptoError::DimensionMismatch` if the matrix is empty or any row
/// length differs from the number of rows.
pub fn square_dimension(matrix: &Matrix) -> Result<usize, AagCryptoError> {
    let n = matrix.len();
    if n == 0 {
        return Err(AagCryptoError::DimensionMismatch(
            "Matrix must have at least one row".into(),
        ));
    }
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != n {
            return Err(AagCryptoError::DimensionMismatch(format!(
                "Row {} has length {} but expected {}",
                i,
                row.len(),
                n
            )));
        }
    }
    Ok(n)
}

/// Computes the matrix product `C = AB` through the ring.
///
/// Both operands must be n×n matrices of the same `n`.
pub fn matrix_mul(a: &Matrix, b: &Matrix, ring: &Ring) -> Matrix {
    let n = a.len();
    debug_assert_eq!(b.len(), n, "matrix_mul on matrices of different size");

    let mut c = vec![vec![Scalar::zero(); n]; n];
    for i in 0..n {
        for j in 0..n {
            let mut sum = Scalar::zero();
            for k in 0..n {
                if a[i][k].is_zero() || b[k][j].is_zero() {
                    continue;
                }
                sum = ring.add(&sum, &ring.mul(&a[i][k], &b[k][j]));
            }
            c[i][j] = sum;
        }
    }
    c
}

/// Creates an identity matrix of size `n`.
pub fn identity_matrix(n: usize) -> Matrix {
    let mut identity = vec![vec![Scalar::zero(); n]; n];
    #[allow(clippy::needless_range_loop)]
    for i in 0..n {
        identity[i][i] = Scalar::one();
    }
    identity
}

/// Checks that a square matrix, read in `ring`, has ones on the diagonal and
/// zeros strictly below it.
pub fn is_upper_unitriangular(matrix: &Matrix, ring: &Ring) -> bool {
    matrix.iter().enumerate().all(|(i, row)| {
        row.iter().enumerate().all(|(j, value)| {
            let value = ring.normalize(value);
            match i.cmp(&j) {
                std::cmp::Ordering::Equal => value.is_one(),
                std::cmp::Ordering::Greater => value.is_zero(),
                std::cmp::Ordering::Less => true,
            }
        })
    })
}

/// Inverse of an upper unitriangular matrix by back substitution.
///
/// Solving `U·V = I` column by column gives, for `i < j`,
/// `V[i][j] = -Σ_{k=i+1..=j} U[i][k]·V[k][j]`; the result is unitriangular too.
/// The caller guarantees the input shape (see [`is_upper_unitriangular`]).
pub fn unitriangular_inverse(matrix: &Matrix, ring: &Ring) -> Matrix {
    let n = matrix.len();
    let mut inv = identity_matrix(n);

    for j in 1..n {
        for i in (0..j).rev() {
            let mut sum = Scalar::zero();
            for k in (i + 1)..=j {
                if matrix[i][k].is_zero() || inv[k][j].is_zero() {
                    continue;
                }
                sum = ring.add(&sum, &ring.mul(&matrix[i][k], &inv[k][j]));
            }
            inv[i][j] = ring.neg(&sum);
        }
    }
    inv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_matrix(rows: &[&[i64]], ring: &Ring) -> Matrix {
        rows.iter()
            .map(|row| row.iter().map(|&v| ring.from_i64(v)).collect())
            .collect()
    }

    #[test]
    fn test_square_dimension() {
        let ring = Ring::try_with(0).unwrap();
        assert_eq!(square_dimension(&to_matrix(&[&[1, 2], &[3, 4]], &ring)).unwrap(), 2);
        assert!(square_dimension(&to_matrix(&[&[1, 2, 3], &[3, 4, 5]], &ring)).is_err());
        assert!(square_dimension(&Matrix::new()).is_err());
    }

    #[test]
    fn test_matrix_mul_ok() {
        let ring = Ring::try_with(13).unwrap();
        let a = to_matrix(&[&[1, 2], &[3, 4]], &ring);
        let b = to_matrix(&[&[5, 6], &[7, 8]], &ring);
        // C[0][0] = (1*5 + 2*7) % 13 = 6, C[0][1] = (1*6 + 2*8) % 13 = 9
        // C[1][0] = (3*5 + 4*7) % 13 = 4, C[1][1] = (3*6 + 4*8) % 13 = 11
        let expected = to_matrix(&[&[6, 9], &[4, 11]], &ring);
        assert_eq!(matrix_mul(&a, &b, &ring), expected);
    }

    #[test]
    fn test_matrix_mul_reduces_unnormalized_input() {
        let ring = Ring::try_with(13).unwrap();
        // 10^20 = 9 and -27 = 12 mod 13, so the square is [81, 120; 0, 1]
        let big = Scalar::from(10u64).pow(20);
        let a = vec![
            vec![big, Scalar::from(-27)],
            vec![Scalar::zero(), Scalar::one()],
        ];
        let expected = to_matrix(&[&[3, 3], &[0, 1]], &ring);
        assert_eq!(matrix_mul(&a, &a, &ring), expected);
    }

    #[test]
    fn test_identity_is_neutral() {
        let ring = Ring::try_with(0).unwrap();
        let a = to_matrix(&[&[1, -7, 3], &[0, 1, 12], &[0, 0, 1]], &ring);
        assert_eq!(matrix_mul(&a, &identity_matrix(3), &ring), a);
        assert_eq!(matrix_mul(&identity_matrix(3), &a, &ring), a);
    }

    #[test]
    fn test_is_upper_unitriangular() {
        let ring = Ring::try_with(5).unwrap();
        assert!(is_upper_unitriangular(
            &to_matrix(&[&[1, 4, 2], &[0, 1, 3], &[0, 0, 1]], &ring),
            &ring
        ));
        // 6 reads as 1 mod 5
        assert!(is_upper_unitriangular(
            &to_matrix(&[&[6, 4, 2], &[5, 1, 3], &[0, 0, 1]], &ring),
            &ring
        ));
        assert!(!is_upper_unitriangular(
            &to_matrix(&[&[1, 4, 2], &[1, 1, 3], &[0, 0, 1]], &ring),
            &ring
        ));
        assert!(!is_upper_unitriangular(
            &to_matrix(&[&[2, 0, 0], &[0, 1, 0], &[0, 0, 1]], &ring),
            &ring
        ));
    }

    #[test]
    fn test_unitriangular_inverse() {
        let ring = Ring::try_with(0).unwrap();
        let a = to_matrix(&[&[1, 1, 2], &[0, 1, 3], &[0, 0, 1]], &ring);
        // inverse of [[1,a,c],[0,1,b],[0,0,1]] is [[1,-a,ab-c],[0,1,-b],[0,0,1]]
        let expected = to_matrix(&[&[1, -1, 1], &[0, 1, -3], &[0, 0, 1]], &ring);
        assert_eq!(unitriangular_inverse(&a, &ring), expected);
        assert_eq!(matrix_mul(&a, &expected, &ring), identity_matrix(3));
    }

    #[test]
    fn test_unitriangular_inverse_mod() {
        let ring = Ring::try_with(7).unwrap();
        let a = to_matrix(
            &[&[1, 3, 5, 2], &[0, 1, 6, 4], &[0, 0, 1, 1], &[0, 0, 0, 1]],
            &ring,
        );
        let inv = unitriangular_inverse(&a, &ring);
        assert_eq!(matrix_mul(&a, &inv, &ring), identity_matrix(4));
        assert_eq!(matrix_mul(&inv, &a, &ring), identity_matrix(4));
    }
}
