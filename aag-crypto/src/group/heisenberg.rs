//! The discrete Heisenberg group H_3 over Z or Z/rZ.

use crate::errors::AagCryptoError;
use crate::group::{Group, GroupElement};
use crate::ring::Ring;
use crate::ring::matrix_ops::is_upper_unitriangular;

/// 3×3 upper unitriangular matrices with the generators
/// `X = I + E_01`, `Y = I + E_12` and the central `Z = I + E_02 = [X, Y]`.
#[derive(Debug, Clone)]
pub struct HeisenbergGroup {
    ring: Ring,
    generators: [GroupElement; 3],
}

impl HeisenbergGroup {
    pub const DIMENSION: usize = 3;

    pub fn try_with(modulus: u64) -> Result<Self, AagCryptoError> {
        let ring = Ring::try_with(modulus)?;

        let x = GroupElement::try_from_i64_rows(
            &[vec![1, 1, 0], vec![0, 1, 0], vec![0, 0, 1]],
            ring,
        )?;
        let y = GroupElement::try_from_i64_rows(
            &[vec![1, 0, 0], vec![0, 1, 1], vec![0, 0, 1]],
            ring,
        )?;
        let z = GroupElement::try_from_i64_rows(
            &[vec![1, 0, 1], vec![0, 1, 0], vec![0, 0, 1]],
            ring,
        )?;

        Ok(Self {
            ring,
            generators: [x, y, z],
        })
    }

    pub fn x(&self) -> &GroupElement {
        &self.generators[0]
    }

    pub fn y(&self) -> &GroupElement {
        &self.generators[1]
    }

    pub fn z(&self) -> &GroupElement {
        &self.generators[2]
    }

    /// `X^a · Y^b · Z^c`, written out directly.
    pub fn word(&self, a: i64, b: i64, c: i64) -> GroupElement {
        self.x()
            .power(a)
            .multiply(&self.y().power(b))
            .multiply(&self.z().power(c))
    }
}

impl Group for HeisenbergGroup {
    fn ring(&self) -> Ring {
        self.ring
    }

    fn dimension(&self) -> usize {
        Self::DIMENSION
    }

    fn generators(&self) -> &[GroupElement] {
        &self.generators
    }

    fn contains(&self, element: &GroupElement) -> bool {
        element.ring() == self.ring
            && element.dimension() == Self::DIMENSION
            && is_upper_unitriangular(element.rows(), &self.ring)
    }
}

/// Creates the Heisenberg group over Z (`modulus == 0`) or Z/rZ.
pub fn create_heisenberg_group(modulus: u64) -> Result<HeisenbergGroup, AagCryptoError> {
    HeisenbergGroup::try_with(modulus)
}
