//! Demo layer around `aag-crypto`: printable run reports and the replay of the
//! in-class length-based example.

pub mod analysis;
pub mod report;
