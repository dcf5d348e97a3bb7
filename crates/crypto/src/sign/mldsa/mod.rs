// Path: crates/crypto/src/sign/mldsa/mod.rs
//! ML-DSA-87 lattice-based signatures.
//!
//! Keys are stored in their serialized form and rehydrated per operation;
//! key generation draws its randomness from the deterministic seed stream
//! so that wallet recovery reproduces the same keypair.

use crate::algorithms::hash::{HashFunction, MimcBn254};
use crate::encoding::{bytes_to_hex, hex_to_bytes};
use crate::error::CryptoError;
use crate::seed::{DeterministicSeedReader, DEFAULT_SALT};
use crate::sign::{bn254_scalar_field, SigningScheme};
use fips204::ml_dsa_87::{self, PrivateKey, PublicKey, PK_LEN, SIG_LEN, SK_LEN};
use fips204::traits::{KeyGen, SerDes, Signer, Verifier};
use meridian_types::keys::KeyType;
use num_bigint::BigUint;
use rand::rngs::OsRng;

/// ML-DSA-87 signing scheme.
#[derive(Default)]
pub struct MlDsa87Scheme {
    public: Option<Vec<u8>>,
    secret: Option<Vec<u8>>,
}

impl MlDsa87Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    fn derive(&mut self, seed: &[u8], salt: &[u8]) -> Result<(), CryptoError> {
        let mut reader = DeterministicSeedReader::new(seed, salt);
        let (public, secret) = ml_dsa_87::KG::try_keygen_with_rng(&mut reader)
            .map_err(|e| CryptoError::OperationFailed(format!("ML-DSA keygen failed: {e}")))?;
        self.public = Some(public.into_bytes().to_vec());
        self.secret = Some(secret.into_bytes().to_vec());
        Ok(())
    }

    fn secret_key(&self) -> Result<PrivateKey, CryptoError> {
        let bytes = self.secret.as_ref().ok_or(CryptoError::PrivateKeyNotSet)?;
        let arr: [u8; SK_LEN] =
            bytes.as_slice().try_into().map_err(|_| CryptoError::InvalidLength {
                expected: SK_LEN,
                got: bytes.len(),
            })?;
        PrivateKey::try_from_bytes(arr)
            .map_err(|e| CryptoError::Deserialization(format!("invalid ML-DSA private key: {e}")))
    }

    fn public_key(&self) -> Result<PublicKey, CryptoError> {
        let bytes = self.public.as_ref().ok_or(CryptoError::PublicKeyNotSet)?;
        let arr: [u8; PK_LEN] =
            bytes.as_slice().try_into().map_err(|_| CryptoError::InvalidLength {
                expected: PK_LEN,
                got: bytes.len(),
            })?;
        PublicKey::try_from_bytes(arr)
            .map_err(|e| CryptoError::Deserialization(format!("invalid ML-DSA public key: {e}")))
    }
}

impl SigningScheme for MlDsa87Scheme {
    fn key_type(&self) -> KeyType {
        KeyType::MlDsa87
    }

    fn generate_from_seed(&mut self, seed: &[u8]) -> Result<(), CryptoError> {
        self.derive(seed, DEFAULT_SALT)
    }

    fn regenerate_from_seed(&mut self, seed: &[u8], salt: &[u8]) -> Result<(), CryptoError> {
        self.derive(seed, salt)
    }

    fn public_key_hex(&self, _compressed: bool) -> String {
        match &self.public {
            Some(bytes) => bytes_to_hex(bytes),
            None => String::new(),
        }
    }

    fn private_key_hex(&self) -> String {
        match &self.secret {
            Some(bytes) => bytes_to_hex(bytes),
            None => String::new(),
        }
    }

    fn set_public_key_hex(&mut self, _compressed: bool, hex: &str) -> Result<(), CryptoError> {
        let bytes = hex_to_bytes(hex)?;
        if bytes.len() != PK_LEN {
            return Err(CryptoError::InvalidLength {
                expected: PK_LEN,
                got: bytes.len(),
            });
        }
        self.public = Some(bytes);
        // Fail early if the encoding is not a valid key.
        self.public_key()?;
        Ok(())
    }

    fn set_private_key_hex(&mut self, hex: &str) -> Result<(), CryptoError> {
        let bytes = hex_to_bytes(hex)?;
        if bytes.len() != SK_LEN {
            return Err(CryptoError::InvalidLength {
                expected: SK_LEN,
                got: bytes.len(),
            });
        }
        self.secret = Some(bytes);
        self.secret_key()?;
        Ok(())
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let secret = self.secret_key()?;
        // Hedged signing: fresh randomness per signature.
        let signature = secret
            .try_sign_with_rng(&mut OsRng, message, &[])
            .map_err(|e| CryptoError::OperationFailed(format!("ML-DSA signing failed: {e}")))?;
        Ok(signature.to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        let public = self.public_key()?;
        let signature: [u8; SIG_LEN] =
            signature.try_into().map_err(|_| CryptoError::InvalidLength {
                expected: SIG_LEN,
                got: signature.len(),
            })?;
        Ok(public.verify(message, &signature, &[]))
    }

    fn curve_hash(&self) -> Box<dyn HashFunction> {
        Box::new(MimcBn254::new())
    }

    fn scalar_field_modulus(&self) -> BigUint {
        bn254_scalar_field()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_verify_round_trip() {
        let mut scheme = MlDsa87Scheme::new();
        scheme.generate_from_seed(b"pq seed material").unwrap();

        let message = b"post-quantum commitment";
        let signature = scheme.sign(message).unwrap();
        assert_eq!(signature.len(), SIG_LEN);
        assert!(scheme.verify(message, &signature).unwrap());
        assert!(!scheme.verify(b"tampered", &signature).unwrap());
    }

    #[test]
    fn seed_derivation_is_deterministic() {
        let mut a = MlDsa87Scheme::new();
        let mut b = MlDsa87Scheme::new();
        a.generate_from_seed(b"recovery seed").unwrap();
        b.generate_from_seed(b"recovery seed").unwrap();
        assert_eq!(a.public_key_hex(false), b.public_key_hex(false));
        assert_eq!(a.private_key_hex(), b.private_key_hex());
    }

    #[test]
    fn keys_round_trip_through_hex() {
        let mut scheme = MlDsa87Scheme::new();
        scheme.generate_from_seed(b"hex round trip").unwrap();
        let signature = scheme.sign(b"msg").unwrap();

        let mut restored = MlDsa87Scheme::new();
        restored
            .set_public_key_hex(false, &scheme.public_key_hex(false))
            .unwrap();
        assert!(restored.verify(b"msg", &signature).unwrap());

        restored.set_private_key_hex(&scheme.private_key_hex()).unwrap();
        let second = restored.sign(b"msg").unwrap();
        assert!(scheme.verify(b"msg", &second).unwrap());
    }

    #[test]
    fn wrong_key_sizes_are_rejected() {
        let mut scheme = MlDsa87Scheme::new();
        assert!(matches!(
            scheme.set_public_key_hex(false, "ABCD"),
            Err(CryptoError::InvalidLength { .. })
        ));
        assert!(matches!(
            scheme.set_private_key_hex("ABCD"),
            Err(CryptoError::InvalidLength { .. })
        ));
    }
}
