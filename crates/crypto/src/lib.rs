// Path: crates/crypto/src/lib.rs
//! # Meridian SDK Cryptography
//!
//! Hash functions, per-algorithm signing schemes and deterministic seed
//! derivation. The signing schemes implement the [`sign::SigningScheme`]
//! capability consumed by the commitment builder and the transaction layer.

pub mod algorithms;
pub mod encoding;
pub mod error;
pub mod seed;
pub mod sign;
