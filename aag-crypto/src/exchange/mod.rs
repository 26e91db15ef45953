//! The two public steps of the commutator exchange: conjugating the other
//! party's public key and recombining the received conjugates.

use crate::errors::AagCryptoError;
use crate::group::GroupElement;
use crate::keypair::{PrivateKey, PublicKey};

/// `inv(P) · e · P` for every `e` of the counterpart's public key, in order.
pub type ConjugatedPublicKey = PublicKey;

/// The group element both parties arrive at, up to inversion.
pub type SharedSecret = GroupElement;

/// Conjugates each element of `other_public_key` by the private element.
pub fn conjugate(private_key: &PrivateKey, other_public_key: &PublicKey) -> ConjugatedPublicKey {
    let p = private_key.element();
    let p_inv = p.invert();

    PublicKey::new(
        other_public_key
            .elements()
            .iter()
            .map(|e| p_inv.multiply(e).multiply(p))
            .collect(),
    )
}

/// Starts from `inv(P)` and multiplies in `conjugated[index]^exponent` for each
/// witness entry, in witness order.
///
/// With `conjugated` produced by the counterpart's private key `Q`, the result is
/// `inv(P) · inv(Q) · P · Q`.
///
/// # Errors
///
/// `DimensionMismatch` when the received key is too short for the witness.
pub fn derive_shared_secret(
    private_key: &PrivateKey,
    conjugated: &ConjugatedPublicKey,
) -> Result<SharedSecret, AagCryptoError> {
    let witness = private_key.witness();
    if let Some(max) = witness.max_index() {
        if max >= conjugated.len() {
            return Err(AagCryptoError::DimensionMismatch(format!(
                "conjugated key has {} elements, witness needs index {}",
                conjugated.len(),
                max
            )));
        }
    }

    Ok(witness.fold_over(private_key.element().invert(), conjugated.elements()))
}
