#[derive(thiserror::Error, Debug)]
pub enum AagCryptoError {
    /// Error when creating a ring with an unusable modulus (k == 1).
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    /// Sizes or bounds that cannot produce a meaningful key exchange.
    #[error("InvalidConfiguration: {0}")]
    InvalidConfiguration(String),
    /// A matrix that is not a member of the group reached the group layer.
    #[error("StructuralViolation: {0}")]
    StructuralViolation(String),
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),

    #[error("Protocol step expected state {expected}, found {found}")]
    InvalidState {
        expected: &'static str,
        found: &'static str,
    },
    #[error("SecretMismatch: {0}")]
    SecretMismatch(String),

    #[error("InvalidEncoding: {0}")]
    InvalidEncoding(String),
    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Io: {0}")]
    Io(#[from] std::io::Error),
}
