// Path: crates/crypto/src/algorithms/hash/mod.rs
//! Cryptographic hash functions.
//!
//! Two families live here: the general-purpose SHA-2 digest used to
//! compress transaction identifiers, and the curve-native MiMC digests the
//! commitment protocol hashes field elements with.

use sha2::{Digest, Sha256};

pub mod mimc;

pub use mimc::{MimcBn254, MimcBw6761};

/// Hash function trait
pub trait HashFunction {
    /// Hash a message and return the digest
    fn hash(&self, message: &[u8]) -> Vec<u8>;

    /// Get the digest size in bytes
    fn digest_size(&self) -> usize;

    /// Get the name of the hash function
    fn name(&self) -> &str;
}

/// SHA-256 hash function implementation
#[derive(Default, Clone)]
pub struct Sha256Hash;

impl HashFunction for Sha256Hash {
    fn hash(&self, message: &[u8]) -> Vec<u8> {
        Sha256::digest(message).to_vec()
    }

    fn digest_size(&self) -> usize {
        32
    }

    fn name(&self) -> &str {
        "SHA-256"
    }
}

/// Create a SHA-256 hash of any type that can be referenced as bytes
pub fn sha256<T: AsRef<[u8]>>(data: T) -> Vec<u8> {
    Sha256::digest(data.as_ref()).to_vec()
}
