// Path: crates/types/src/keys/mod.rs
//! Key algorithm identifiers.

use crate::error::CryptoError;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The signature algorithms supported by the ledger.
///
/// Each algorithm carries its own curve parameters (scalar field modulus and
/// curve-native hash); those are exposed through the signing scheme
/// capability, not here. There is deliberately no default variant: callers
/// choose the algorithm explicitly at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// ECDSA over secp256k1, commitments on the BN254 scalar field.
    Secp256k1,
    /// ML-DSA-87, lattice-based post-quantum signatures.
    MlDsa87,
    /// Ed25519 Schnorr-style signatures.
    Ed25519,
    /// BLS signatures over BLS12-377 with pairing-based verification.
    Bls12377,
}

impl KeyType {
    /// The wire name of the algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Secp256k1 => "secp256k1",
            KeyType::MlDsa87 => "mldsa87",
            KeyType::Ed25519 => "ed25519",
            KeyType::Bls12377 => "bls12377",
        }
    }

    /// The legacy integer discriminant used by older node releases.
    pub fn discriminant(&self) -> u8 {
        match self {
            KeyType::Secp256k1 => 0,
            KeyType::MlDsa87 => 1,
            KeyType::Ed25519 => 2,
            KeyType::Bls12377 => 3,
        }
    }

    /// Parse a legacy integer discriminant.
    pub fn from_discriminant(value: u64) -> Result<Self, CryptoError> {
        match value {
            0 => Ok(KeyType::Secp256k1),
            1 => Ok(KeyType::MlDsa87),
            2 => Ok(KeyType::Ed25519),
            3 => Ok(KeyType::Bls12377),
            other => Err(CryptoError::UnknownKeyType(other.to_string())),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "secp256k1" => Ok(KeyType::Secp256k1),
            "mldsa87" => Ok(KeyType::MlDsa87),
            "ed25519" => Ok(KeyType::Ed25519),
            "bls12377" => Ok(KeyType::Bls12377),
            other => Err(CryptoError::UnknownKeyType(other.to_string())),
        }
    }
}

impl Serialize for KeyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for KeyType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyTypeVisitor;

        impl<'de> Visitor<'de> for KeyTypeVisitor {
            type Value = KeyType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a key type name or integer discriminant")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<KeyType, E> {
                KeyType::from_str(value).map_err(|e| E::custom(e.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<KeyType, E> {
                KeyType::from_discriminant(value).map_err(|e| E::custom(e.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<KeyType, E> {
                u64::try_from(value)
                    .map_err(|_| E::custom(format!("invalid key type: {value}")))
                    .and_then(|v| self.visit_u64(v))
            }

            // Some emitters encode the discriminant as a JSON float.
            fn visit_f64<E: de::Error>(self, value: f64) -> Result<KeyType, E> {
                self.visit_u64(value as u64)
            }
        }

        deserializer.deserialize_any(KeyTypeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_type_name_round_trip() {
        for kt in [
            KeyType::Secp256k1,
            KeyType::MlDsa87,
            KeyType::Ed25519,
            KeyType::Bls12377,
        ] {
            assert_eq!(kt.as_str().parse::<KeyType>().unwrap(), kt);
            assert_eq!(KeyType::from_discriminant(kt.discriminant() as u64).unwrap(), kt);
        }
    }

    #[test]
    fn key_type_parse_is_case_insensitive() {
        assert_eq!("BLS12377".parse::<KeyType>().unwrap(), KeyType::Bls12377);
        assert!("p384".parse::<KeyType>().is_err());
    }

    #[test]
    fn key_type_deserializes_from_string_and_number() {
        let from_str: KeyType = serde_json::from_str("\"ed25519\"").unwrap();
        assert_eq!(from_str, KeyType::Ed25519);
        let from_num: KeyType = serde_json::from_str("3").unwrap();
        assert_eq!(from_num, KeyType::Bls12377);
        assert!(serde_json::from_str::<KeyType>("\"unknown\"").is_err());
    }
}
