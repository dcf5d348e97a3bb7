// Path: crates/crypto/src/sign/mod.rs
//! Signing scheme capability.
//!
//! Each supported algorithm implements [`SigningScheme`] once; everything
//! downstream (commitment builder, transaction assembler, wallet) is
//! written against the trait and never branches on the algorithm itself.
//! Besides signing and verification, a scheme exposes the two curve
//! parameters the commitment protocol depends on: the scalar field modulus
//! (which fixes the byte width every Merkle leaf is padded to) and the
//! curve-native hash used for tree and preimage hashing.

use crate::algorithms::hash::HashFunction;
use crate::error::CryptoError;
use ark_ff::{BigInteger, PrimeField};
use meridian_types::keys::KeyType;
use num_bigint::BigUint;

pub mod bls;
pub mod ecdsa;
pub mod eddsa;
pub mod mldsa;

pub use bls::Bls12377Scheme;
pub use ecdsa::Secp256k1Scheme;
pub use eddsa::Ed25519Scheme;
pub use mldsa::MlDsa87Scheme;

/// Capability surface of one signature algorithm.
///
/// Schemes start empty and acquire key material either deterministically
/// (from a seed) or from serialized hex. Public-key-only schemes can
/// verify but not sign.
pub trait SigningScheme {
    /// The algorithm this scheme implements.
    fn key_type(&self) -> KeyType;

    /// Derive a fresh keypair from a seed using the default salt.
    fn generate_from_seed(&mut self, seed: &[u8]) -> Result<(), CryptoError>;

    /// Derive a keypair from a seed with a caller-chosen salt.
    fn regenerate_from_seed(&mut self, seed: &[u8], salt: &[u8]) -> Result<(), CryptoError>;

    /// Uppercase hex of the public key, empty if none is set.
    fn public_key_hex(&self, compressed: bool) -> String;

    /// Uppercase hex of the private key, empty if none is set.
    fn private_key_hex(&self) -> String;

    /// Load a public key from hex.
    fn set_public_key_hex(&mut self, compressed: bool, hex: &str) -> Result<(), CryptoError>;

    /// Load a private key from hex.
    fn set_private_key_hex(&mut self, hex: &str) -> Result<(), CryptoError>;

    /// Sign a message (the commitment preimage hash).
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Verify a signature. `Ok(false)` means the signature is well-formed
    /// but wrong; errors mean the inputs could not be interpreted at all.
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError>;

    /// The curve-native hash for this algorithm's scalar field.
    fn curve_hash(&self) -> Box<dyn HashFunction>;

    /// The scalar field modulus; its minimal big-endian byte width is the
    /// leaf padding width for payload commitments.
    fn scalar_field_modulus(&self) -> BigUint;
}

/// Construct the scheme implementing the given algorithm.
pub fn scheme_for(key_type: KeyType) -> Box<dyn SigningScheme> {
    match key_type {
        KeyType::Secp256k1 => Box::new(Secp256k1Scheme::new()),
        KeyType::MlDsa87 => Box::new(MlDsa87Scheme::new()),
        KeyType::Ed25519 => Box::new(Ed25519Scheme::new()),
        KeyType::Bls12377 => Box::new(Bls12377Scheme::new()),
    }
}

/// Scalar field modulus of BN254, the commitment field for every algorithm
/// except BLS.
pub fn bn254_scalar_field() -> BigUint {
    BigUint::from_bytes_be(&<ark_bn254::Fr as PrimeField>::MODULUS.to_bytes_be())
}

/// Scalar field modulus of BW6-761, the commitment field for BLS12-377
/// signatures.
pub fn bw6_761_scalar_field() -> BigUint {
    BigUint::from_bytes_be(&<ark_bw6_761::Fr as PrimeField>::MODULUS.to_bytes_be())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_moduli_have_expected_widths() {
        // 254-bit and 377-bit primes: 32 and 48 byte leaves.
        assert_eq!(bn254_scalar_field().to_bytes_be().len(), 32);
        assert_eq!(bw6_761_scalar_field().to_bytes_be().len(), 48);
    }

    #[test]
    fn schemes_report_their_key_type() {
        for kt in [
            KeyType::Secp256k1,
            KeyType::MlDsa87,
            KeyType::Ed25519,
            KeyType::Bls12377,
        ] {
            assert_eq!(scheme_for(kt).key_type(), kt);
        }
    }

    #[test]
    fn digest_halves_fit_every_supported_field() {
        // 128-bit identifier halves must always be below the modulus; this
        // is why 32-byte digests are split before entering the preimage.
        let half_max = BigUint::from_bytes_be(&[0xFF; 16]);
        assert!(half_max < bn254_scalar_field());
        assert!(half_max < bw6_761_scalar_field());
    }

    #[test]
    fn curve_hash_width_matches_modulus_width() {
        for kt in [
            KeyType::Secp256k1,
            KeyType::MlDsa87,
            KeyType::Ed25519,
            KeyType::Bls12377,
        ] {
            let scheme = scheme_for(kt);
            assert_eq!(
                scheme.curve_hash().digest_size(),
                scheme.scalar_field_modulus().to_bytes_be().len()
            );
        }
    }
}
