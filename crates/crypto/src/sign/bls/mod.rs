// Path: crates/crypto/src/sign/bls/mod.rs
//! BLS signatures over BLS12-377.
//!
//! Optimized for minimal public key size:
//! - Public keys in G1 (48-byte compressed)
//! - Signatures in G2 (96-byte compressed)
//! - Messages mapped to G2 via hash-to-scalar times the G2 generator
//!
//! Verification is the pairing identity e(G1, S) = e(PK, H(m)).

use crate::algorithms::hash::{HashFunction, MimcBw6761};
use crate::encoding::{bytes_to_hex, hex_to_bytes};
use crate::error::CryptoError;
use crate::seed::{DeterministicSeedReader, DEFAULT_SALT};
use crate::sign::{bw6_761_scalar_field, SigningScheme};
use ark_bls12_377::{Bls12_377, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::{CurveGroup, Group};
use ark_ff::{BigInteger, PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use meridian_types::keys::KeyType;
use num_bigint::BigUint;
use sha2::{Digest, Sha256};

// Domain separation tag for hash-to-scalar.
const BLS_DST: &[u8] = b"MERIDIAN-BLS-SIG-BLS12377G2-SHA256-NUL";

const PUBLIC_KEY_LEN: usize = 48;
const SCALAR_LEN: usize = 32;
const PRIVATE_KEY_LEN: usize = PUBLIC_KEY_LEN + SCALAR_LEN;
const SIGNATURE_LEN: usize = 96;

/// BLS12-377 signing scheme.
#[derive(Default)]
pub struct Bls12377Scheme {
    secret: Option<Fr>,
    public: Option<G1Affine>,
}

impl Bls12377Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    fn derive(&mut self, seed: &[u8], salt: &[u8]) -> Result<(), CryptoError> {
        let mut reader = DeterministicSeedReader::new(seed, salt);
        // Oversample the scalar field width by 64 bits, then reduce into
        // [1, r-1].
        let width = (Fr::MODULUS_BIT_SIZE as usize + 7) / 8;
        let raw = reader.take(width + 8)?;
        let order = BigUint::from_bytes_be(&Fr::MODULUS.to_bytes_be());
        let scalar = BigUint::from_bytes_be(&raw) % (&order - 1u8) + 1u8;
        let secret = Fr::from_be_bytes_mod_order(&scalar.to_bytes_be());

        self.public = Some((G1Projective::generator() * secret).into_affine());
        self.secret = Some(secret);
        Ok(())
    }

    /// Map a message to G2: hash-to-scalar, then multiply the generator.
    fn hash_to_point(message: &[u8]) -> G2Affine {
        let mut hasher = Sha256::new();
        hasher.update(BLS_DST);
        hasher.update(message);
        let scalar = Fr::from_be_bytes_mod_order(&hasher.finalize());
        (G2Projective::generator() * scalar).into_affine()
    }

    fn serialize_point<P: CanonicalSerialize>(point: &P) -> Vec<u8> {
        let mut bytes = Vec::new();
        point
            .serialize_compressed(&mut bytes)
            .expect("serializing to a Vec cannot fail");
        bytes
    }
}

impl SigningScheme for Bls12377Scheme {
    fn key_type(&self) -> KeyType {
        KeyType::Bls12377
    }

    fn generate_from_seed(&mut self, seed: &[u8]) -> Result<(), CryptoError> {
        self.derive(seed, DEFAULT_SALT)
    }

    fn regenerate_from_seed(&mut self, seed: &[u8], salt: &[u8]) -> Result<(), CryptoError> {
        self.derive(seed, salt)
    }

    // BLS public keys have a single canonical compressed form; the
    // `compressed` flag is accepted for interface uniformity.
    fn public_key_hex(&self, _compressed: bool) -> String {
        match &self.public {
            Some(pk) => bytes_to_hex(&Self::serialize_point(pk)),
            None => String::new(),
        }
    }

    fn private_key_hex(&self) -> String {
        match (&self.public, &self.secret) {
            (Some(pk), Some(sk)) => {
                let mut bytes = Self::serialize_point(pk);
                bytes.extend_from_slice(&sk.into_bigint().to_bytes_be());
                bytes_to_hex(&bytes)
            }
            _ => String::new(),
        }
    }

    fn set_public_key_hex(&mut self, _compressed: bool, hex: &str) -> Result<(), CryptoError> {
        let bytes = hex_to_bytes(hex)?;
        if bytes.len() != PUBLIC_KEY_LEN {
            return Err(CryptoError::InvalidLength {
                expected: PUBLIC_KEY_LEN,
                got: bytes.len(),
            });
        }
        let point = G1Affine::deserialize_compressed(&bytes[..])
            .map_err(|_| CryptoError::Deserialization("invalid G1 point".into()))?;
        self.public = Some(point);
        Ok(())
    }

    /// The private key layout is public key (48 bytes) followed by the
    /// big-endian scalar (32 bytes).
    fn set_private_key_hex(&mut self, hex: &str) -> Result<(), CryptoError> {
        let bytes = hex_to_bytes(hex)?;
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(CryptoError::InvalidLength {
                expected: PRIVATE_KEY_LEN,
                got: bytes.len(),
            });
        }
        let public = G1Affine::deserialize_compressed(&bytes[..PUBLIC_KEY_LEN])
            .map_err(|_| CryptoError::Deserialization("invalid G1 point".into()))?;
        let secret = Fr::from_be_bytes_mod_order(&bytes[PUBLIC_KEY_LEN..]);
        self.public = Some(public);
        self.secret = Some(secret);
        Ok(())
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let secret = self.secret.as_ref().ok_or(CryptoError::PrivateKeyNotSet)?;
        let hashed = Self::hash_to_point(message);
        let signature = (G2Projective::from(hashed) * secret).into_affine();
        Ok(Self::serialize_point(&signature))
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        let public = self.public.as_ref().ok_or(CryptoError::PublicKeyNotSet)?;
        if signature.len() != SIGNATURE_LEN {
            return Err(CryptoError::InvalidLength {
                expected: SIGNATURE_LEN,
                got: signature.len(),
            });
        }
        let signature = G2Affine::deserialize_compressed(signature)
            .map_err(|_| CryptoError::Deserialization("invalid G2 point".into()))?;
        let hashed = Self::hash_to_point(message);

        // e(-G1, S) * e(PK, H(m)) == 1  <=>  e(G1, S) == e(PK, H(m))
        let neg_generator = (-G1Projective::generator()).into_affine();
        let check: PairingOutput<Bls12_377> =
            Bls12_377::multi_pairing([neg_generator, *public], [signature, hashed]);
        Ok(check.is_zero())
    }

    fn curve_hash(&self) -> Box<dyn HashFunction> {
        Box::new(MimcBw6761::new())
    }

    fn scalar_field_modulus(&self) -> BigUint {
        bw6_761_scalar_field()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_verify_round_trip() {
        let mut scheme = Bls12377Scheme::new();
        scheme.generate_from_seed(b"bls seed material").unwrap();

        let message = b"pairing checked";
        let signature = scheme.sign(message).unwrap();
        assert_eq!(signature.len(), SIGNATURE_LEN);
        assert!(scheme.verify(message, &signature).unwrap());
        assert!(!scheme.verify(b"wrong", &signature).unwrap());
    }

    #[test]
    fn seed_derivation_is_deterministic() {
        let mut a = Bls12377Scheme::new();
        let mut b = Bls12377Scheme::new();
        a.generate_from_seed(b"same").unwrap();
        b.generate_from_seed(b"same").unwrap();
        assert_eq!(a.public_key_hex(false), b.public_key_hex(false));
    }

    #[test]
    fn private_key_hex_round_trips() {
        let mut scheme = Bls12377Scheme::new();
        scheme.generate_from_seed(b"serialization").unwrap();
        let signature = scheme.sign(b"msg").unwrap();

        let mut restored = Bls12377Scheme::new();
        restored.set_private_key_hex(&scheme.private_key_hex()).unwrap();
        assert_eq!(restored.public_key_hex(false), scheme.public_key_hex(false));
        assert_eq!(restored.sign(b"msg").unwrap(), signature);
    }

    #[test]
    fn public_key_only_scheme_verifies() {
        let mut signer = Bls12377Scheme::new();
        signer.generate_from_seed(b"pk only").unwrap();
        let signature = signer.sign(b"payload").unwrap();

        let mut verifier = Bls12377Scheme::new();
        verifier
            .set_public_key_hex(false, &signer.public_key_hex(false))
            .unwrap();
        assert!(verifier.verify(b"payload", &signature).unwrap());
    }

    #[test]
    fn key_and_signature_sizes_match_the_wire_layout() {
        let mut scheme = Bls12377Scheme::new();
        scheme.generate_from_seed(b"sizes").unwrap();
        assert_eq!(scheme.public_key_hex(false).len(), PUBLIC_KEY_LEN * 2);
        assert_eq!(scheme.private_key_hex().len(), PRIVATE_KEY_LEN * 2);
    }
}
