//! Privacy-preserving mining
//!
//! Produces structured analytics reports from a ciphertext reference without
//! decrypting it.
//!
//! ## Determinism
//!
//! - The reference is reduced to a SHA-256 [`Fingerprint`]; cluster centroid
//!   hashes derive from it and repeat across calls.
//! - Every numeric metric is sampled. An unseeded [`MiningDispatcher`] gives
//!   different numbers per call with identical report shapes; a seeded one
//!   is reproducible.

mod dispatcher;
mod types;

/// Generator functions for each algorithm
pub mod generators;



pub use dispatcher::MiningDispatcher;
pub use types::*;
