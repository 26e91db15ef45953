use std::fmt;

use crate::errors::AagCryptoError;
use crate::group::{Group, GroupElement};
use crate::word::random_word;

use itertools::Itertools;
use rand::Rng;
use rand::seq::SliceRandom;

/// An ordered sequence of group elements, published by its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    elements: Vec<GroupElement>,
}

impl PublicKey {
    pub fn new(elements: Vec<GroupElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[GroupElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| format!("#{i}\n{e}"))
            .join("\n");
        write!(f, "{body}")
    }
}

/// The ±1 exponent attached to each witness entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exponent {
    Positive,
    Negative,
}

impl Exponent {
    pub fn value(self) -> i64 {
        match self {
            Exponent::Positive => 1,
            Exponent::Negative => -1,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Exponent::Positive
        } else {
            Exponent::Negative
        }
    }

    /// `element^self`.
    pub fn apply(self, element: &GroupElement) -> GroupElement {
        match self {
            Exponent::Positive => element.clone(),
            Exponent::Negative => element.invert(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WitnessEntry {
    /// Position in the owner's public key.
    pub index: usize,
    pub exponent: Exponent,
}

/// How a private key was assembled from its public key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Witness {
    entries: Vec<WitnessEntry>,
}

impl Witness {
    /// Builds a witness, rejecting repeated indices.
    pub fn try_with(entries: Vec<WitnessEntry>) -> Result<Self, AagCryptoError> {
        if !entries.iter().map(|e| e.index).all_unique() {
            return Err(AagCryptoError::InvalidConfiguration(
                "witness indices must be distinct".into(),
            ));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[WitnessEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest index referenced, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.entries.iter().map(|e| e.index).max()
    }

    /// Left-to-right product of `elements[index]^exponent`, starting from `start`.
    ///
    /// Indices must be in range for `elements`.
    pub(crate) fn fold_over(&self, start: GroupElement, elements: &[GroupElement]) -> GroupElement {
        self.entries.iter().fold(start, |acc, entry| {
            acc.multiply(&entry.exponent.apply(&elements[entry.index]))
        })
    }
}

impl fmt::Display for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .entries
            .iter()
            .map(|e| format!("({}, {:+})", e.index, e.exponent.value()))
            .join(" ");
        write!(f, "{body}")
    }
}

/// A private group element together with the witness it was built from.
///
/// Neither part is serializable; only the conjugation effect of the element
/// ever leaves its owner.
#[derive(Debug, Clone)]
pub struct PrivateKey {
    element: GroupElement,
    witness: Witness,
}

impl PrivateKey {
    /// Rebuilds the private element for an explicit witness over `public_key`.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when the witness is longer than the public key or
    /// references an index outside it.
    pub fn from_witness<G: Group + ?Sized>(
        group: &G,
        public_key: &PublicKey,
        witness: Witness,
    ) -> Result<Self, AagCryptoError> {
        if witness.len() > public_key.len() {
            return Err(AagCryptoError::InvalidConfiguration(format!(
                "witness length {} exceeds public key length {}",
                witness.len(),
                public_key.len()
            )));
        }
        if let Some(max) = witness.max_index() {
            if max >= public_key.len() {
                return Err(AagCryptoError::InvalidConfiguration(format!(
                    "witness index {} out of range for public key of length {}",
                    max,
                    public_key.len()
                )));
            }
        }

        let element = witness.fold_over(group.identity(), public_key.elements());
        Ok(Self { element, witness })
    }

    pub fn element(&self) -> &GroupElement {
        &self.element
    }

    pub fn witness(&self) -> &Witness {
        &self.witness
    }
}

/// Generates `size` independent random words as a public key.
pub fn generate_public_key<G, R>(
    group: &G,
    size: usize,
    bound: u64,
    rng: &mut R,
) -> Result<PublicKey, AagCryptoError>
where
    G: Group + ?Sized,
    R: Rng + ?Sized,
{
    if size == 0 {
        return Err(AagCryptoError::InvalidConfiguration(
            "public key size must be > 0".into(),
        ));
    }

    let elements = (0..size)
        .map(|_| random_word(group, bound, rng))
        .collect::<Result<Vec<_>, _>>()?;
    log::trace!("generated public key of {} elements", elements.len());

    Ok(PublicKey::new(elements))
}

/// Draws `private_size` distinct indices of `public_key` with random ±1
/// exponents and multiplies the chosen elements into a private key.
pub fn generate_private_key<G, R>(
    group: &G,
    public_key: &PublicKey,
    private_size: usize,
    rng: &mut R,
) -> Result<PrivateKey, AagCryptoError>
where
    G: Group + ?Sized,
    R: Rng + ?Sized,
{
    if private_size == 0 {
        return Err(AagCryptoError::InvalidConfiguration(
            "private key size must be > 0".into(),
        ));
    }
    if private_size > public_key.len() {
        return Err(AagCryptoError::InvalidConfiguration(format!(
            "private key size {} exceeds public key size {}",
            private_size,
            public_key.len()
        )));
    }

    let mut indices: Vec<usize> = (0..public_key.len()).collect();
    indices.shuffle(rng);

    let entries = indices
        .into_iter()
        .take(private_size)
        .map(|index| WitnessEntry {
            index,
            exponent: Exponent::random(rng),
        })
        .collect();

    PrivateKey::from_witness(group, public_key, Witness::try_with(entries)?)
}
