// Path: crates/crypto/src/error.rs
//! Local error types for the `meridian-crypto` crate.

// Re-export the canonical error type from the central types crate.
pub use meridian_types::error::CryptoError;
