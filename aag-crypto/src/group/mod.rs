//! # Group Module
//!
//! Matrix groups over a [`Ring`]: the [`Group`] contract, its element type and
//! the discrete Heisenberg group instance.

pub mod element;
pub mod heisenberg;

use crate::errors::AagCryptoError;
use crate::ring::{Matrix, Ring};

pub use element::GroupElement;
pub use heisenberg::{HeisenbergGroup, create_heisenberg_group};

/// A group of invertible n×n matrices over one fixed ring.
///
/// Implementations own their generators; every element handed out shares the
/// group's ring and dimension, which is what keeps [`GroupElement`] arithmetic total.
pub trait Group: Send + Sync {
    /// Ring every entry is reduced through.
    fn ring(&self) -> Ring;

    /// Size `n` of the n×n matrices.
    fn dimension(&self) -> usize;

    /// Canonical generators, in the order random words use them.
    fn generators(&self) -> &[GroupElement];

    /// Checks the group's shape invariant on an element.
    fn contains(&self, element: &GroupElement) -> bool;

    fn identity(&self) -> GroupElement {
        GroupElement::identity(self.dimension(), self.ring())
    }

    /// Builds a member of this group from raw rows.
    ///
    /// # Errors
    ///
    /// `StructuralViolation` if the rows do not describe a member of the group.
    fn element(&self, rows: Matrix) -> Result<GroupElement, AagCryptoError> {
        let element = GroupElement::try_from_rows(rows, self.ring())?;
        if element.dimension() != self.dimension() || !self.contains(&element) {
            return Err(AagCryptoError::StructuralViolation(format!(
                "{}x{} matrix is not a member of this group",
                element.dimension(),
                element.dimension()
            )));
        }
        Ok(element)
    }
}
