use std::path::Path;

use crate::errors::AagCryptoError;
use crate::word::DEFAULT_RANDOM_BOUND;

use serde::{Deserialize, Serialize};

/// Key sizes for one party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySizes {
    /// Number of random words in the public key.
    pub public_size: usize,
    /// Number of public key elements combined into the private key.
    pub private_size: usize,
}

impl PartySizes {
    pub fn new(public_size: usize, private_size: usize) -> Self {
        Self {
            public_size,
            private_size,
        }
    }

    pub fn validate(&self, party: &str) -> Result<(), AagCryptoError> {
        if self.public_size == 0 {
            return Err(AagCryptoError::InvalidConfiguration(format!(
                "{party}: public key size must be > 0"
            )));
        }
        if self.private_size == 0 {
            return Err(AagCryptoError::InvalidConfiguration(format!(
                "{party}: private key size must be > 0"
            )));
        }
        if self.private_size > self.public_size {
            return Err(AagCryptoError::InvalidConfiguration(format!(
                "{party}: private key size {} exceeds public key size {}",
                self.private_size, self.public_size
            )));
        }
        Ok(())
    }
}

/// Everything a two-party run needs apart from the group itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyExchangeConfig {
    /// Ring modulus, 0 for exact integers.
    pub modulus: u64,
    pub alice: PartySizes,
    pub bob: PartySizes,
    /// Generator exponents are drawn from `[-random_bound, random_bound]`.
    pub random_bound: u64,
    /// Fixed seed for reproducible runs; OS entropy otherwise.
    pub seed: Option<u64>,
    /// Keep keys, witnesses and conjugated keys in the result.
    pub keep_transcript: bool,
}

impl Default for KeyExchangeConfig {
    fn default() -> Self {
        Self {
            modulus: 0,
            alice: PartySizes::new(10, 2),
            bob: PartySizes::new(10, 4),
            random_bound: DEFAULT_RANDOM_BOUND,
            seed: None,
            keep_transcript: false,
        }
    }
}

impl KeyExchangeConfig {
    pub fn new(alice: PartySizes, bob: PartySizes) -> Self {
        Self {
            alice,
            bob,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_modulus(mut self, modulus: u64) -> Self {
        self.modulus = modulus;
        self
    }

    pub fn with_random_bound(mut self, random_bound: u64) -> Self {
        self.random_bound = random_bound;
        self
    }

    pub fn with_transcript(mut self) -> Self {
        self.keep_transcript = true;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, AagCryptoError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AagCryptoError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), AagCryptoError> {
        if self.modulus == 1 {
            return Err(AagCryptoError::InvalidModulus(
                "Modulus must be 0 (exact integers) or greater than 1, got 1".into(),
            ));
        }
        if self.random_bound == 0 {
            return Err(AagCryptoError::InvalidConfiguration(
                "random bound must be > 0".into(),
            ));
        }
        self.alice.validate("alice")?;
        self.bob.validate("bob")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = KeyExchangeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.alice, PartySizes::new(10, 2));
        assert_eq!(config.bob, PartySizes::new(10, 4));
        assert_eq!(config.random_bound, 100_000);
    }

    #[test]
    fn test_invalid_sizes() {
        let config = KeyExchangeConfig::new(PartySizes::new(3, 4), PartySizes::new(10, 4));
        assert!(matches!(
            config.validate(),
            Err(AagCryptoError::InvalidConfiguration(_))
        ));

        let config = KeyExchangeConfig::new(PartySizes::new(3, 3), PartySizes::new(0, 0));
        assert!(config.validate().is_err());

        let config = KeyExchangeConfig::default().with_random_bound(0);
        assert!(config.validate().is_err());

        let config = KeyExchangeConfig::default().with_modulus(1);
        assert!(matches!(
            config.validate(),
            Err(AagCryptoError::InvalidModulus(_))
        ));
    }

    #[test]
    fn test_from_json_partial() -> Result<(), AagCryptoError> {
        let config = KeyExchangeConfig::from_json_str(
            r#"{ "modulus": 65537, "bob": { "public_size": 6, "private_size": 6 }, "seed": 9 }"#,
        )?;
        assert_eq!(config.modulus, 65537);
        assert_eq!(config.alice, PartySizes::new(10, 2));
        assert_eq!(config.bob, PartySizes::new(6, 6));
        assert_eq!(config.seed, Some(9));
        Ok(())
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            KeyExchangeConfig::from_json_str(
                r#"{ "alice": { "public_size": 1, "private_size": 2 } }"#
            ),
            Err(AagCryptoError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            KeyExchangeConfig::from_json_str("{ not json"),
            Err(AagCryptoError::SerializationError(_))
        ));
    }
}
