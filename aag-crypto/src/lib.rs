//! # AAG Crypto
//!
//! The Anshel–Anshel–Goldfeld commutator key exchange over matrix groups,
//! instantiated with the discrete Heisenberg group over Z or Z/rZ.

pub mod codec;
pub mod errors;
pub mod exchange;
pub mod group;
pub mod keypair;
pub mod protocol;
pub mod ring;
pub mod word;

pub use errors::AagCryptoError;
pub use group::{Group, GroupElement, HeisenbergGroup, create_heisenberg_group};
pub use protocol::{ExchangeResult, run_key_exchange};
