//! Row-major wire encoding for group elements and key sequences.
//!
//! An element travels as its modulus, its dimension and its entries as decimal
//! strings (exact integers are unbounded). Sequences are JSON arrays of those.

use crate::errors::AagCryptoError;
use crate::group::{Group, GroupElement};
use crate::keypair::PublicKey;
use crate::ring::{Matrix, Scalar};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireElement {
    pub modulus: u64,
    pub dimension: usize,
    /// Entries in row-major order.
    pub entries: Vec<String>,
}

/// Flattens an element into its wire form.
///
/// # Example
///
/// ```
/// # use aag_crypto::codec::encode_element;
/// # use aag_crypto::group::create_heisenberg_group;
/// let group = create_heisenberg_group(0).unwrap();
/// let wire = encode_element(&group.word(2, -3, 5));
/// assert_eq!(wire.entries, ["1", "2", "-1", "0", "1", "-3", "0", "0", "1"]);
/// ```
pub fn encode_element(element: &GroupElement) -> WireElement {
    WireElement {
        modulus: element.ring().modulus(),
        dimension: element.dimension(),
        entries: element
            .rows()
            .iter()
            .flatten()
            .map(|value| value.to_string())
            .collect(),
    }
}

/// Rebuilds an element of `group` from its wire form.
///
/// # Errors
///
/// * `InvalidEncoding` for a foreign modulus or an entry that is not an integer.
/// * `DimensionMismatch` when the entry count disagrees with the dimension.
/// * `StructuralViolation` when the matrix is not a member of `group`.
pub fn decode_element<G: Group + ?Sized>(
    group: &G,
    wire: &WireElement,
) -> Result<GroupElement, AagCryptoError> {
    let modulus = group.ring().modulus();
    if wire.modulus != modulus {
        return Err(AagCryptoError::InvalidEncoding(format!(
            "element encoded for modulus {} but group uses {}",
            wire.modulus, modulus
        )));
    }
    let expected = wire
        .dimension
        .checked_mul(wire.dimension)
        .filter(|&count| count > 0);
    if expected != Some(wire.entries.len()) {
        return Err(AagCryptoError::DimensionMismatch(format!(
            "{} entries cannot form a {}x{} matrix",
            wire.entries.len(),
            wire.dimension,
            wire.dimension
        )));
    }

    let values = wire
        .entries
        .iter()
        .map(|entry| {
            entry.parse::<Scalar>().map_err(|e| {
                AagCryptoError::InvalidEncoding(format!("entry {entry:?} is not an integer: {e}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let rows: Matrix = values
        .chunks(wire.dimension)
        .map(|row| row.to_vec())
        .collect();

    group.element(rows)
}

/// Serializes a sequence of elements, e.g. a public or conjugated key, to JSON.
pub fn encode_key(key: &PublicKey) -> Result<String, AagCryptoError> {
    let wire: Vec<WireElement> = key.elements().iter().map(encode_element).collect();
    Ok(serde_json::to_string(&wire)?)
}

/// Parses a key produced by [`encode_key`], validating every element against `group`.
pub fn decode_key<G: Group + ?Sized>(group: &G, json: &str) -> Result<PublicKey, AagCryptoError> {
    let wire: Vec<WireElement> = serde_json::from_str(json)?;
    let elements = wire
        .iter()
        .map(|w| decode_element(group, w))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PublicKey::new(elements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::conjugate;
    use crate::group::create_heisenberg_group;
    use crate::keypair::{generate_private_key, generate_public_key};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_conjugated_key_survives_transport() -> Result<(), AagCryptoError> {
        let group = create_heisenberg_group(0)?;
        let mut rng = StdRng::seed_from_u64(77);
        let own = generate_public_key(&group, 4, 100_000, &mut rng)?;
        let other = generate_public_key(&group, 6, 100_000, &mut rng)?;
        let private = generate_private_key(&group, &own, 2, &mut rng)?;

        let conjugated = conjugate(&private, &other);
        let json = encode_key(&conjugated)?;
        assert_eq!(decode_key(&group, &json)?, conjugated);
        Ok(())
    }

    #[test]
    fn test_modular_entries_are_normalized_on_the_wire() -> Result<(), AagCryptoError> {
        let group = create_heisenberg_group(13)?;
        let wire = encode_element(&group.word(-1, -1, 0));
        assert_eq!(wire.modulus, 13);
        assert!(wire
            .entries
            .iter()
            .all(|e| e.parse::<i64>().map(|v| (0..13).contains(&v)).unwrap_or(false)));
        Ok(())
    }

    #[test]
    fn test_decode_rejects_foreign_modulus() -> Result<(), AagCryptoError> {
        let exact = create_heisenberg_group(0)?;
        let modular = create_heisenberg_group(7)?;
        let wire = encode_element(modular.x());
        assert!(matches!(
            decode_element(&exact, &wire),
            Err(AagCryptoError::InvalidEncoding(_))
        ));
        Ok(())
    }

    #[test]
    fn test_decode_rejects_malformed() -> Result<(), AagCryptoError> {
        let group = create_heisenberg_group(0)?;
        let mut wire = encode_element(group.y());

        wire.entries.pop();
        assert!(matches!(
            decode_element(&group, &wire),
            Err(AagCryptoError::DimensionMismatch(_))
        ));

        wire.entries.push("one".into());
        assert!(matches!(
            decode_element(&group, &wire),
            Err(AagCryptoError::InvalidEncoding(_))
        ));

        wire.entries[8] = "1".into();
        wire.entries[3] = "5".into();
        assert!(matches!(
            decode_element(&group, &wire),
            Err(AagCryptoError::StructuralViolation(_))
        ));

        assert!(matches!(
            decode_key(&group, "[{]"),
            Err(AagCryptoError::SerializationError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_decode_rejects_oversized_dimension() -> Result<(), AagCryptoError> {
        let group = create_heisenberg_group(0)?;
        let wire = WireElement {
            modulus: 0,
            dimension: 1 << 33,
            entries: vec![],
        };
        assert!(matches!(
            decode_element(&group, &wire),
            Err(AagCryptoError::DimensionMismatch(_))
        ));

        let json = format!(r#"[{{"modulus":0,"dimension":{},"entries":[]}}]"#, usize::MAX);
        assert!(matches!(
            decode_key(&group, &json),
            Err(AagCryptoError::DimensionMismatch(_))
        ));
        Ok(())
    }
}
