//! Random words over a group's generators.

use crate::errors::AagCryptoError;
use crate::group::{Group, GroupElement};

use rand::Rng;

/// Default magnitude of a generator exponent.
pub const DEFAULT_RANDOM_BOUND: u64 = 100_000;

/// Draws an exponent uniformly from `[-bound, bound]`.
pub fn random_exponent<R: Rng + ?Sized>(bound: u64, rng: &mut R) -> Result<i64, AagCryptoError> {
    let bound = i64::try_from(bound).map_err(|_| {
        AagCryptoError::InvalidConfiguration(format!("random bound {bound} does not fit in i64"))
    })?;
    if bound == 0 {
        return Err(AagCryptoError::InvalidConfiguration(
            "random bound must be > 0".into(),
        ));
    }

    Ok(rng.random_range(-bound..=bound))
}

/// Returns `g_1^e_1 · g_2^e_2 · … · g_n^e_n` over the group's generators, each
/// exponent drawn independently by [`random_exponent`].
///
/// For the Heisenberg group this is `X^xc · Y^yc · Z^zc`.
pub fn random_word<G, R>(group: &G, bound: u64, rng: &mut R) -> Result<GroupElement, AagCryptoError>
where
    G: Group + ?Sized,
    R: Rng + ?Sized,
{
    group
        .generators()
        .iter()
        .try_fold(group.identity(), |acc, generator| {
            let exponent = random_exponent(bound, rng)?;
            Ok(acc.multiply(&generator.power(exponent)))
        })
}
