pub mod keys;
pub mod params;

pub use keys::{
    Exponent, PrivateKey, PublicKey, Witness, WitnessEntry, generate_private_key,
    generate_public_key,
};
pub use params::{KeyExchangeConfig, PartySizes};
