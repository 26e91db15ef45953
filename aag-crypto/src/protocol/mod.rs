//! # Protocol Module
//!
//! Drives a two-party run through
//! `Init → KeysGenerated → Exchanged → SecretsDerived → Verified | Mismatch`.

use std::fmt;
use std::thread;

use crate::errors::AagCryptoError;
use crate::exchange::{ConjugatedPublicKey, SharedSecret, conjugate, derive_shared_secret};
use crate::group::{Group, GroupElement};
use crate::keypair::{
    KeyExchangeConfig, PartySizes, PrivateKey, PublicKey, generate_private_key,
    generate_public_key,
};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolState {
    Init,
    KeysGenerated,
    Exchanged,
    SecretsDerived,
    Verified,
    Mismatch,
}

impl ProtocolState {
    pub fn name(self) -> &'static str {
        match self {
            ProtocolState::Init => "Init",
            ProtocolState::KeysGenerated => "KeysGenerated",
            ProtocolState::Exchanged => "Exchanged",
            ProtocolState::SecretsDerived => "SecretsDerived",
            ProtocolState::Verified => "Verified",
            ProtocolState::Mismatch => "Mismatch",
        }
    }
}

impl fmt::Display for ProtocolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which check a failed run tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretMismatch {
    /// `secret_a != inv(secret_b)`.
    NotInverse,
    /// The secrets agree but differ from `inv(A)·inv(B)·A·B`.
    CommutatorIdentity,
}

impl fmt::Display for SecretMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretMismatch::NotInverse => {
                f.write_str("shared secrets are not inverse of each other")
            }
            SecretMismatch::CommutatorIdentity => {
                f.write_str("shared secret differs from the private key commutator")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Verified,
    Mismatch(SecretMismatch),
}

/// Everything one party produced or received during a run.
#[derive(Debug, Clone)]
pub struct PartyTranscript {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
    /// The counterpart's conjugation of this party's public key.
    pub received: ConjugatedPublicKey,
    pub secret: SharedSecret,
}

#[derive(Debug, Clone)]
pub struct Transcript {
    pub alice: PartyTranscript,
    pub bob: PartyTranscript,
}

#[derive(Debug, Clone)]
pub struct ExchangeResult {
    pub alice_secret: SharedSecret,
    pub bob_secret: SharedSecret,
    pub matched: bool,
    pub verification: Verification,
    /// Present when [`KeyExchangeConfig::keep_transcript`] is set.
    pub transcript: Option<Transcript>,
}

impl ExchangeResult {
    /// Alice's secret, or `SecretMismatch` if verification failed.
    pub fn into_verified(self) -> Result<SharedSecret, AagCryptoError> {
        match self.verification {
            Verification::Verified => Ok(self.alice_secret),
            Verification::Mismatch(kind) => Err(AagCryptoError::SecretMismatch(kind.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
struct PartyKeys {
    public_key: PublicKey,
    private_key: PrivateKey,
}

#[derive(Debug)]
struct Party {
    name: &'static str,
    sizes: PartySizes,
    rng: StdRng,
    keys: Option<PartyKeys>,
    received: Option<ConjugatedPublicKey>,
    secret: Option<SharedSecret>,
}

impl Party {
    fn new(name: &'static str, sizes: PartySizes, rng: StdRng) -> Self {
        Self {
            name,
            sizes,
            rng,
            keys: None,
            received: None,
            secret: None,
        }
    }

    fn generate_keys<G: Group + ?Sized>(
        &mut self,
        group: &G,
        bound: u64,
    ) -> Result<(), AagCryptoError> {
        let public_key = generate_public_key(group, self.sizes.public_size, bound, &mut self.rng)?;
        let private_key =
            generate_private_key(group, &public_key, self.sizes.private_size, &mut self.rng)?;
        log::debug!(
            "{}: generated public key of {} elements, private key over {} of them",
            self.name,
            public_key.len(),
            private_key.witness().len()
        );

        self.keys = Some(PartyKeys {
            public_key,
            private_key,
        });
        Ok(())
    }

    fn keys(&self, found: ProtocolState) -> Result<&PartyKeys, AagCryptoError> {
        self.keys.as_ref().ok_or(AagCryptoError::InvalidState {
            expected: ProtocolState::KeysGenerated.name(),
            found: found.name(),
        })
    }
}

/// A single two-party run with explicit, strictly sequential steps.
///
/// Each party owns its own random generator; with a configured seed both are
/// derived from it, so a run is reproducible.
#[derive(Debug)]
pub struct KeyExchange<'g, G: Group + ?Sized> {
    group: &'g G,
    config: KeyExchangeConfig,
    state: ProtocolState,
    alice: Party,
    bob: Party,
    verification: Option<Verification>,
}

impl<'g, G: Group + ?Sized> KeyExchange<'g, G> {
    pub fn new(group: &'g G, config: KeyExchangeConfig) -> Result<Self, AagCryptoError> {
        config.validate()?;
        if config.modulus != group.ring().modulus() {
            return Err(AagCryptoError::InvalidConfiguration(format!(
                "configured modulus {} does not match the group's modulus {}",
                config.modulus,
                group.ring().modulus()
            )));
        }

        let mut master = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let alice = Party::new("alice", config.alice, StdRng::from_rng(&mut master));
        let bob = Party::new("bob", config.bob, StdRng::from_rng(&mut master));

        Ok(Self {
            group,
            config,
            state: ProtocolState::Init,
            alice,
            bob,
            verification: None,
        })
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    fn expect_state(&self, expected: ProtocolState) -> Result<(), AagCryptoError> {
        if self.state != expected {
            return Err(AagCryptoError::InvalidState {
                expected: expected.name(),
                found: self.state.name(),
            });
        }
        Ok(())
    }

    fn advance(&mut self, next: ProtocolState) {
        log::debug!("key exchange: {} -> {}", self.state, next);
        self.state = next;
    }

    /// Both parties build their keys; the two generations share nothing and run
    /// on separate threads.
    pub fn generate_keys(&mut self) -> Result<(), AagCryptoError> {
        self.expect_state(ProtocolState::Init)?;

        let group = self.group;
        let bound = self.config.random_bound;
        let (alice, bob) = (&mut self.alice, &mut self.bob);
        let (alice_result, bob_result) = thread::scope(|s| {
            let alice_handle = s.spawn(move || alice.generate_keys(group, bound));
            let bob_result = bob.generate_keys(group, bound);
            let alice_result = alice_handle
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
            (alice_result, bob_result)
        });
        alice_result?;
        bob_result?;

        self.advance(ProtocolState::KeysGenerated);
        Ok(())
    }

    /// Each party conjugates the other's public key by its own private key.
    pub fn exchange(&mut self) -> Result<(), AagCryptoError> {
        self.expect_state(ProtocolState::KeysGenerated)?;

        let alice_keys = self.alice.keys(self.state)?;
        let bob_keys = self.bob.keys(self.state)?;
        let to_alice = conjugate(&bob_keys.private_key, &alice_keys.public_key);
        let to_bob = conjugate(&alice_keys.private_key, &bob_keys.public_key);
        log::trace!(
            "exchanged {} conjugates to alice and {} to bob",
            to_alice.len(),
            to_bob.len()
        );

        self.alice.received = Some(to_alice);
        self.bob.received = Some(to_bob);
        self.advance(ProtocolState::Exchanged);
        Ok(())
    }

    pub fn derive_secrets(&mut self) -> Result<(), AagCryptoError> {
        self.expect_state(ProtocolState::Exchanged)?;

        for party in [&mut self.alice, &mut self.bob] {
            let keys = party.keys.as_ref().ok_or(AagCryptoError::InvalidState {
                expected: ProtocolState::KeysGenerated.name(),
                found: ProtocolState::Exchanged.name(),
            })?;
            let received = party.received.as_ref().ok_or(AagCryptoError::InvalidState {
                expected: ProtocolState::Exchanged.name(),
                found: ProtocolState::Exchanged.name(),
            })?;
            party.secret = Some(derive_shared_secret(&keys.private_key, received)?);
        }

        self.advance(ProtocolState::SecretsDerived);
        Ok(())
    }

    /// Checks `secret_a == inv(secret_b)` and `secret_a == [A, B]`.
    ///
    /// A failed check is a result, not an error.
    pub fn verify(&mut self) -> Result<Verification, AagCryptoError> {
        self.expect_state(ProtocolState::SecretsDerived)?;

        let (alice_secret, bob_secret) = self.secrets()?;
        let alice_private = self.alice.keys(self.state)?.private_key.element();
        let bob_private = self.bob.keys(self.state)?.private_key.element();

        let verification = if *alice_secret != bob_secret.invert() {
            Verification::Mismatch(SecretMismatch::NotInverse)
        } else if *alice_secret != GroupElement::commutator(alice_private, bob_private) {
            Verification::Mismatch(SecretMismatch::CommutatorIdentity)
        } else {
            Verification::Verified
        };

        match verification {
            Verification::Verified => self.advance(ProtocolState::Verified),
            Verification::Mismatch(kind) => {
                log::warn!("key exchange mismatch: {kind}");
                self.advance(ProtocolState::Mismatch);
            }
        }
        self.verification = Some(verification);
        Ok(verification)
    }

    fn secrets(&self) -> Result<(&SharedSecret, &SharedSecret), AagCryptoError> {
        let missing = || AagCryptoError::InvalidState {
            expected: ProtocolState::SecretsDerived.name(),
            found: self.state.name(),
        };
        Ok((
            self.alice.secret.as_ref().ok_or_else(missing)?,
            self.bob.secret.as_ref().ok_or_else(missing)?,
        ))
    }

    /// Consumes a verified (or mismatched) run into its result.
    pub fn finish(self) -> Result<ExchangeResult, AagCryptoError> {
        let verification = self.verification.ok_or(AagCryptoError::InvalidState {
            expected: ProtocolState::Verified.name(),
            found: self.state.name(),
        })?;
        let (alice_secret, bob_secret) = {
            let (a, b) = self.secrets()?;
            (a.clone(), b.clone())
        };

        let transcript = if self.config.keep_transcript {
            Some(Transcript {
                alice: into_transcript(self.alice, self.state)?,
                bob: into_transcript(self.bob, self.state)?,
            })
        } else {
            None
        };

        Ok(ExchangeResult {
            alice_secret,
            bob_secret,
            matched: verification == Verification::Verified,
            verification,
            transcript,
        })
    }
}

fn into_transcript(party: Party, found: ProtocolState) -> Result<PartyTranscript, AagCryptoError> {
    let missing = AagCryptoError::InvalidState {
        expected: ProtocolState::SecretsDerived.name(),
        found: found.name(),
    };
    match (party.keys, party.received, party.secret) {
        (Some(keys), Some(received), Some(secret)) => Ok(PartyTranscript {
            public_key: keys.public_key,
            private_key: keys.private_key,
            received,
            secret,
        }),
        _ => Err(missing),
    }
}

/// Runs the whole exchange for `config` over `group`.
///
/// # Example
///
/// ```
/// # use aag_crypto::group::create_heisenberg_group;
/// # use aag_crypto::keypair::{KeyExchangeConfig, PartySizes};
/// # use aag_crypto::protocol::run_key_exchange;
/// let group = create_heisenberg_group(0).unwrap();
/// let config =
///     KeyExchangeConfig::new(PartySizes::new(10, 2), PartySizes::new(10, 4)).with_seed(7);
/// let result = run_key_exchange(&group, config).unwrap();
/// assert!(result.matched);
/// assert_eq!(result.alice_secret, result.bob_secret.invert());
/// ```
pub fn run_key_exchange<G: Group + ?Sized>(
    group: &G,
    config: KeyExchangeConfig,
) -> Result<ExchangeResult, AagCryptoError> {
    let mut run = KeyExchange::new(group, config)?;
    run.generate_keys()?;
    run.exchange()?;
    run.derive_secrets()?;
    run.verify()?;
    run.finish()
}

/// Repeats `runs` exchanges and returns how many matched.
///
/// Each run gets its own seed drawn from the configured seed (or OS entropy),
/// so a seeded repetition is reproducible as a whole.
pub fn match_rate<G: Group + ?Sized>(
    group: &G,
    config: &KeyExchangeConfig,
    runs: usize,
) -> Result<usize, AagCryptoError> {
    let mut seeds = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut matched = 0;
    for _ in 0..runs {
        let mut run_config = config.clone();
        run_config.seed = Some(seeds.random());
        run_config.keep_transcript = false;
        if run_key_exchange(group, run_config)?.matched {
            matched += 1;
        }
    }
    log::debug!("{matched}/{runs} runs matched");
    Ok(matched)
}
