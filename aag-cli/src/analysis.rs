//! Replay of the in-class length-based example.
//!
//! Alice's public key is `a1, a2, a3` and her private element is `a2 · a3⁻¹`;
//! Bob's key `b1, b2` is conjugated by it. The example peels the conjugation one
//! factor at a time, trying a wrong and a right candidate on each layer. Only
//! `GroupElement` operations are used; this is not a general attack.

use aag_crypto::errors::AagCryptoError;
use aag_crypto::group::{Group, GroupElement, HeisenbergGroup, create_heisenberg_group};

use num_bigint::BigInt;
use num_traits::Signed;

/// How a candidate factor `c` is stripped from each element `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// `c⁻¹ · x · c`
    Inner,
    /// `c · x · c⁻¹`
    Outer,
}

#[derive(Debug, Clone)]
pub struct PeelOutcome {
    pub label: &'static str,
    pub factor: GroupElement,
    pub side: Side,
    /// Whether the example keeps this candidate.
    pub accepted: bool,
    pub peeled: Vec<GroupElement>,
    /// Sum of `|x[0][2]|` over the peeled key.
    pub central_length: BigInt,
}

#[derive(Debug, Clone)]
pub struct PeelLayer {
    pub outcomes: Vec<PeelOutcome>,
}

impl PeelLayer {
    pub fn accepted(&self) -> Option<&PeelOutcome> {
        self.outcomes.iter().find(|o| o.accepted)
    }

    /// Candidate with the smallest central length on this layer.
    pub fn shortest(&self) -> Option<&PeelOutcome> {
        self.outcomes.iter().min_by(|a, b| a.central_length.cmp(&b.central_length))
    }
}

#[derive(Debug, Clone)]
pub struct InClassReport {
    pub private_element: GroupElement,
    pub conjugated: Vec<GroupElement>,
    pub layers: Vec<PeelLayer>,
    /// Product of the accepted factors, rebuilt into a private element.
    pub recovered_private: GroupElement,
    pub restores_bob_key: bool,
}

impl InClassReport {
    pub fn recovers_private(&self) -> bool {
        self.recovered_private == self.private_element
    }
}

const ALICE_KEY: [[[i64; 3]; 3]; 3] = [
    [[1, 1, 2], [0, 1, 3], [0, 0, 1]],
    [[1, 1, 1], [0, 1, 1], [0, 0, 1]],
    [[1, 0, 1], [0, 1, 1], [0, 0, 1]],
];

const BOB_KEY: [[[i64; 3]; 3]; 2] = [
    [[1, 2, 3], [0, 1, 3], [0, 0, 1]],
    [[1, 6, 3], [0, 1, 1], [0, 0, 1]],
];

fn element(group: &HeisenbergGroup, rows: &[[i64; 3]; 3]) -> Result<GroupElement, AagCryptoError> {
    group.element(
        rows.iter()
            .map(|r| r.iter().map(|&v| BigInt::from(v)).collect())
            .collect(),
    )
}

fn central_length(key: &[GroupElement]) -> BigInt {
    key.iter()
        .filter_map(|e| e.entry(0, 2))
        .map(|v| v.abs())
        .sum()
}

fn peel(
    label: &'static str,
    factor: &GroupElement,
    side: Side,
    accepted: bool,
    key: &[GroupElement],
) -> PeelOutcome {
    let peeled: Vec<GroupElement> = key
        .iter()
        .map(|x| match side {
            Side::Inner => x.conjugate_by(factor),
            Side::Outer => x.conjugate_by(&factor.invert()),
        })
        .collect();
    PeelOutcome {
        label,
        factor: factor.clone(),
        side,
        accepted,
        central_length: central_length(&peeled),
        peeled,
    }
}

/// Runs the example over the exact integers.
pub fn replay_in_class_example() -> Result<InClassReport, AagCryptoError> {
    let group = create_heisenberg_group(0)?;
    let [a1, a2, a3] = [
        element(&group, &ALICE_KEY[0])?,
        element(&group, &ALICE_KEY[1])?,
        element(&group, &ALICE_KEY[2])?,
    ];
    let bob_key = BOB_KEY
        .iter()
        .map(|rows| element(&group, rows))
        .collect::<Result<Vec<_>, _>>()?;

    let private_element = a2.multiply(&a3.invert());
    let conjugated: Vec<GroupElement> = bob_key
        .iter()
        .map(|b| b.conjugate_by(&private_element))
        .collect();

    let first = PeelLayer {
        outcomes: vec![
            peel("a1", &a1, Side::Inner, false, &conjugated),
            peel("a3", &a3, Side::Inner, true, &conjugated),
        ],
    };
    let after_first = first
        .accepted()
        .map(|o| o.peeled.clone())
        .unwrap_or_default();

    let second = PeelLayer {
        outcomes: vec![
            peel("a1", &a1, Side::Outer, false, &after_first),
            peel("a2", &a2, Side::Outer, true, &after_first),
        ],
    };
    let restores_bob_key = second
        .accepted()
        .is_some_and(|o| o.peeled == bob_key);

    let layers = vec![first, second];
    // inner peels strip a factor's inverse from the right, outer peels a factor from the left
    let recovered_private = layers
        .iter()
        .filter_map(PeelLayer::accepted)
        .fold(group.identity(), |acc, o| match o.side {
            Side::Inner => acc.multiply(&o.factor.invert()),
            Side::Outer => o.factor.multiply(&acc),
        });
    log::debug!("in-class replay restores Bob's key: {restores_bob_key}");

    Ok(InClassReport {
        private_element,
        conjugated,
        layers,
        recovered_private,
        restores_bob_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_element() -> Result<(), AagCryptoError> {
        let report = replay_in_class_example()?;
        let expected = GroupElement::try_from_i64_rows(
            &[vec![1, 1, -1], vec![0, 1, 0], vec![0, 0, 1]],
            report.private_element.ring(),
        )?;
        assert_eq!(report.private_element, expected);
        assert!(report.recovers_private());
        Ok(())
    }

    #[test]
    fn test_central_length() -> Result<(), AagCryptoError> {
        let group = create_heisenberg_group(0)?;
        let key = vec![group.word(0, 0, -4), group.word(1, 2, 3)];
        // X Y^2 Z^3 has top-right 3 + 1*2
        assert_eq!(central_length(&key), BigInt::from(9));
        Ok(())
    }
}
