//! # Ring Module
//!
//! Provides the [`Ring`] struct for the scalar layer: exact integers or Z/rZ,
//! and the square matrix helpers the group layer is built on.

pub mod math;
pub mod matrix_ops;

use num_bigint::BigInt;

/// A single matrix entry.
pub type Scalar = BigInt;
/// Represents a square matrix of [`Scalar`]s using a `Vec<Vec<Scalar>>`.
pub type Matrix = Vec<Vec<Scalar>>;

pub use math::Ring;
