// Path: crates/crypto/src/sign/ecdsa/mod.rs
//! ECDSA over secp256k1.
//!
//! Messages are first digested with the curve-native MiMC-BN254 hash and
//! the 32-byte digest is signed as a prehash, so the signed scalar is the
//! same value the commitment protocol produced.

use crate::algorithms::hash::{HashFunction, MimcBn254};
use crate::encoding::{bytes_to_hex, hex_to_bytes};
use crate::error::CryptoError;
use crate::seed::{DeterministicSeedReader, DEFAULT_SALT};
use crate::sign::{bn254_scalar_field, SigningScheme};
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use meridian_types::keys::KeyType;
use num_bigint::BigUint;

/// Order of the secp256k1 group, for reducing seed material into a valid
/// non-zero scalar.
const CURVE_ORDER_HEX: &str = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141";

const SIGNATURE_LEN: usize = 64;
const PRIVATE_KEY_LEN: usize = 32;
const UNCOMPRESSED_LEN: usize = 65;
const COMPRESSED_LEN: usize = 33;

/// secp256k1 ECDSA signing scheme.
#[derive(Default)]
pub struct Secp256k1Scheme {
    signing_key: Option<SigningKey>,
    verifying_key: Option<VerifyingKey>,
}

impl Secp256k1Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    fn derive(&mut self, seed: &[u8], salt: &[u8]) -> Result<(), CryptoError> {
        let mut reader = DeterministicSeedReader::new(seed, salt);
        // Oversample by 64 bits, then reduce into [1, n-1]; the bias this
        // leaves is below 2^-64.
        let raw = reader.take(PRIVATE_KEY_LEN + 8)?;
        let order = BigUint::parse_bytes(CURVE_ORDER_HEX.as_bytes(), 16)
            .expect("curve order constant parses");
        let scalar = BigUint::from_bytes_be(&raw) % (&order - 1u8) + 1u8;

        let mut scalar_bytes = scalar.to_bytes_be();
        while scalar_bytes.len() < PRIVATE_KEY_LEN {
            scalar_bytes.insert(0, 0);
        }

        let signing_key = SigningKey::from_slice(&scalar_bytes)
            .map_err(|e| CryptoError::OperationFailed(format!("unable to derive key: {e}")))?;
        self.verifying_key = Some(*signing_key.verifying_key());
        self.signing_key = Some(signing_key);
        Ok(())
    }

    fn digest(message: &[u8]) -> Vec<u8> {
        MimcBn254::new().hash(message)
    }
}

impl SigningScheme for Secp256k1Scheme {
    fn key_type(&self) -> KeyType {
        KeyType::Secp256k1
    }

    fn generate_from_seed(&mut self, seed: &[u8]) -> Result<(), CryptoError> {
        self.derive(seed, DEFAULT_SALT)
    }

    fn regenerate_from_seed(&mut self, seed: &[u8], salt: &[u8]) -> Result<(), CryptoError> {
        self.derive(seed, salt)
    }

    fn public_key_hex(&self, compressed: bool) -> String {
        match &self.verifying_key {
            Some(vk) => bytes_to_hex(vk.to_encoded_point(compressed).as_bytes()),
            None => String::new(),
        }
    }

    fn private_key_hex(&self) -> String {
        match &self.signing_key {
            Some(sk) => bytes_to_hex(&sk.to_bytes()),
            None => String::new(),
        }
    }

    fn set_public_key_hex(&mut self, compressed: bool, hex: &str) -> Result<(), CryptoError> {
        let bytes = hex_to_bytes(hex)?;
        let expected = if compressed {
            COMPRESSED_LEN
        } else {
            UNCOMPRESSED_LEN
        };
        if bytes.len() != expected {
            return Err(CryptoError::InvalidLength {
                expected,
                got: bytes.len(),
            });
        }
        let vk = VerifyingKey::from_sec1_bytes(&bytes)
            .map_err(|e| CryptoError::Deserialization(format!("invalid secp256k1 point: {e}")))?;
        self.verifying_key = Some(vk);
        Ok(())
    }

    fn set_private_key_hex(&mut self, hex: &str) -> Result<(), CryptoError> {
        let bytes = hex_to_bytes(hex)?;
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(CryptoError::InvalidLength {
                expected: PRIVATE_KEY_LEN,
                got: bytes.len(),
            });
        }
        let signing_key = SigningKey::from_slice(&bytes)
            .map_err(|e| CryptoError::Deserialization(format!("invalid secp256k1 scalar: {e}")))?;
        self.verifying_key = Some(*signing_key.verifying_key());
        self.signing_key = Some(signing_key);
        Ok(())
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let sk = self.signing_key.as_ref().ok_or(CryptoError::PrivateKeyNotSet)?;
        let digest = Self::digest(message);
        let signature: Signature = sk
            .sign_prehash(&digest)
            .map_err(|e| CryptoError::OperationFailed(format!("signing failed: {e}")))?;
        Ok(signature.to_bytes().to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        let vk = self.verifying_key.as_ref().ok_or(CryptoError::PublicKeyNotSet)?;
        if signature.len() != SIGNATURE_LEN {
            return Err(CryptoError::InvalidLength {
                expected: SIGNATURE_LEN,
                got: signature.len(),
            });
        }
        let signature = Signature::from_slice(signature)
            .map_err(|e| CryptoError::Deserialization(format!("invalid signature: {e}")))?;
        let digest = Self::digest(message);
        Ok(vk.verify_prehash(&digest, &signature).is_ok())
    }

    fn curve_hash(&self) -> Box<dyn HashFunction> {
        Box::new(MimcBn254::new())
    }

    fn scalar_field_modulus(&self) -> BigUint {
        bn254_scalar_field()
    }
}
