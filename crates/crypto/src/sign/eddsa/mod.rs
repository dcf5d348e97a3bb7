// Path: crates/crypto/src/sign/eddsa/mod.rs
//! Ed25519 signing scheme.

use crate::algorithms::hash::{HashFunction, MimcBn254};
use crate::encoding::{bytes_to_hex, hex_to_bytes};
use crate::error::CryptoError;
use crate::seed::{DeterministicSeedReader, DEFAULT_SALT};
use crate::sign::{bn254_scalar_field, SigningScheme};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use meridian_types::keys::KeyType;
use num_bigint::BigUint;

const SEED_LEN: usize = 32;
const PUBLIC_KEY_LEN: usize = 32;
const KEYPAIR_LEN: usize = 64;
const SIGNATURE_LEN: usize = 64;

/// Ed25519 signing scheme.
///
/// The private key hex is the 64-byte seed-then-public-key form; a bare
/// 32-byte seed is also accepted on input.
#[derive(Default)]
pub struct Ed25519Scheme {
    signing_key: Option<SigningKey>,
    verifying_key: Option<VerifyingKey>,
}

impl Ed25519Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    fn derive(&mut self, seed: &[u8], salt: &[u8]) -> Result<(), CryptoError> {
        let mut reader = DeterministicSeedReader::new(seed, salt);
        let raw = reader.take(SEED_LEN)?;
        let seed32: [u8; SEED_LEN] = raw.as_slice().try_into().expect("fixed-length read");
        let signing_key = SigningKey::from_bytes(&seed32);
        self.verifying_key = Some(signing_key.verifying_key());
        self.signing_key = Some(signing_key);
        Ok(())
    }
}

impl SigningScheme for Ed25519Scheme {
    fn key_type(&self) -> KeyType {
        KeyType::Ed25519
    }

    fn generate_from_seed(&mut self, seed: &[u8]) -> Result<(), CryptoError> {
        self.derive(seed, DEFAULT_SALT)
    }

    fn regenerate_from_seed(&mut self, seed: &[u8], salt: &[u8]) -> Result<(), CryptoError> {
        self.derive(seed, salt)
    }

    fn public_key_hex(&self, _compressed: bool) -> String {
        match &self.verifying_key {
            Some(vk) => bytes_to_hex(vk.as_bytes()),
            None => String::new(),
        }
    }

    fn private_key_hex(&self) -> String {
        match &self.signing_key {
            Some(sk) => bytes_to_hex(&sk.to_keypair_bytes()),
            None => String::new(),
        }
    }

    fn set_public_key_hex(&mut self, _compressed: bool, hex: &str) -> Result<(), CryptoError> {
        let bytes = hex_to_bytes(hex)?;
        let got = bytes.len();
        let bytes: [u8; PUBLIC_KEY_LEN] =
            bytes.as_slice().try_into().map_err(|_| CryptoError::InvalidLength {
                expected: PUBLIC_KEY_LEN,
                got,
            })?;
        let vk = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| CryptoError::Deserialization(format!("invalid ed25519 point: {e}")))?;
        self.verifying_key = Some(vk);
        Ok(())
    }

    fn set_private_key_hex(&mut self, hex: &str) -> Result<(), CryptoError> {
        let bytes = hex_to_bytes(hex)?;
        let signing_key = match bytes.len() {
            KEYPAIR_LEN => {
                let pair: [u8; KEYPAIR_LEN] = bytes.as_slice().try_into().expect("length checked");
                SigningKey::from_keypair_bytes(&pair).map_err(|e| {
                    CryptoError::Deserialization(format!("inconsistent ed25519 keypair: {e}"))
                })?
            }
            SEED_LEN => {
                let seed: [u8; SEED_LEN] = bytes.as_slice().try_into().expect("length checked");
                SigningKey::from_bytes(&seed)
            }
            other => {
                return Err(CryptoError::InvalidLength {
                    expected: KEYPAIR_LEN,
                    got: other,
                })
            }
        };
        self.verifying_key = Some(signing_key.verifying_key());
        self.signing_key = Some(signing_key);
        Ok(())
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let sk = self.signing_key.as_ref().ok_or(CryptoError::PrivateKeyNotSet)?;
        Ok(sk.sign(message).to_bytes().to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        let vk = self.verifying_key.as_ref().ok_or(CryptoError::PublicKeyNotSet)?;
        let bytes: [u8; SIGNATURE_LEN] =
            signature.try_into().map_err(|_| CryptoError::InvalidLength {
                expected: SIGNATURE_LEN,
                got: signature.len(),
            })?;
        let signature = Signature::from_bytes(&bytes);
        Ok(vk.verify(message, &signature).is_ok())
    }

    fn curve_hash(&self) -> Box<dyn HashFunction> {
        Box::new(MimcBn254::new())
    }

    fn scalar_field_modulus(&self) -> BigUint {
        bn254_scalar_field()
    }
}
