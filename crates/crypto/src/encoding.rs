// Path: crates/crypto/src/encoding.rs
//! Hex helpers shared by the signing schemes and wallet files.
//!
//! The ledger's wire convention is uppercase hex for keys, signatures and
//! payload roots.

use crate::error::CryptoError;

/// Encode bytes as uppercase hex.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decode a hex string (either case) into bytes.
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>, CryptoError> {
    hex::decode(input).map_err(|e| CryptoError::InvalidHex(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_is_uppercase() {
        let bytes = [0xde, 0xad, 0xbe, 0xef];
        let encoded = bytes_to_hex(&bytes);
        assert_eq!(encoded, "DEADBEEF");
        assert_eq!(hex_to_bytes(&encoded).unwrap(), bytes);
        assert_eq!(hex_to_bytes("deadbeef").unwrap(), bytes);
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(hex_to_bytes("not-hex").is_err());
        assert!(hex_to_bytes("abc").is_err());
    }
}
