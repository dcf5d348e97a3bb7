// Path: crates/wallet/src/mnemonic.rs
//! BIP-39 mnemonic phrases.

use bip39::{Language, Mnemonic};
use meridian_types::error::WalletError;
use rand::RngCore;

/// Supported mnemonic entropy sizes, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entropy {
    Bits128,
    Bits160,
    Bits192,
    Bits224,
    Bits256,
}

/// Default entropy size (256 bits = 24 words).
pub const DEFAULT_ENTROPY: Entropy = Entropy::Bits256;

impl Entropy {
    /// Entropy size in bits.
    pub fn bits(&self) -> usize {
        match self {
            Entropy::Bits128 => 128,
            Entropy::Bits160 => 160,
            Entropy::Bits192 => 192,
            Entropy::Bits224 => 224,
            Entropy::Bits256 => 256,
        }
    }

    /// Number of mnemonic words this entropy size produces.
    pub fn word_count(&self) -> usize {
        match self {
            Entropy::Bits128 => 12,
            Entropy::Bits160 => 15,
            Entropy::Bits192 => 18,
            Entropy::Bits224 => 21,
            Entropy::Bits256 => 24,
        }
    }

    /// Parse an entropy size from bits.
    pub fn from_bits(bits: usize) -> Result<Self, WalletError> {
        match bits {
            128 => Ok(Entropy::Bits128),
            160 => Ok(Entropy::Bits160),
            192 => Ok(Entropy::Bits192),
            224 => Ok(Entropy::Bits224),
            256 => Ok(Entropy::Bits256),
            other => Err(WalletError::InvalidEntropy(other)),
        }
    }
}

/// Generate a random mnemonic phrase with the given entropy size.
pub fn generate_mnemonic(entropy: Entropy) -> Result<String, WalletError> {
    let mut bytes = vec![0u8; entropy.bits() / 8];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    let mnemonic = Mnemonic::from_entropy_in(Language::English, &bytes)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Derive the 64-byte BIP-39 seed from a mnemonic and optional passphrase.
pub fn mnemonic_to_seed(mnemonic: &str, passphrase: &str) -> Result<Vec<u8>, WalletError> {
    let parsed = parse(mnemonic)?;
    Ok(parsed.to_seed(passphrase).to_vec())
}

/// Whether a phrase is valid BIP-39.
pub fn validate_mnemonic(mnemonic: &str) -> bool {
    parse(mnemonic).is_ok()
}

/// Number of words in a phrase.
pub fn word_count(mnemonic: &str) -> usize {
    mnemonic.split_whitespace().count()
}

/// Entropy size of a phrase, derived from its word count.
pub fn entropy_size(mnemonic: &str) -> Result<Entropy, WalletError> {
    match word_count(mnemonic) {
        12 => Ok(Entropy::Bits128),
        15 => Ok(Entropy::Bits160),
        18 => Ok(Entropy::Bits192),
        21 => Ok(Entropy::Bits224),
        24 => Ok(Entropy::Bits256),
        other => Err(WalletError::InvalidMnemonic(format!(
            "invalid word count: {other}"
        ))),
    }
}

fn parse(mnemonic: &str) -> Result<Mnemonic, WalletError> {
    Mnemonic::parse_in_normalized(Language::English, mnemonic)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_mnemonics_validate_and_have_the_right_length() {
        for entropy in [
            Entropy::Bits128,
            Entropy::Bits160,
            Entropy::Bits192,
            Entropy::Bits224,
            Entropy::Bits256,
        ] {
            let phrase = generate_mnemonic(entropy).unwrap();
            assert!(validate_mnemonic(&phrase));
            assert_eq!(word_count(&phrase), entropy.word_count());
            assert_eq!(entropy_size(&phrase).unwrap(), entropy);
        }
    }

    #[test]
    fn seed_derivation_matches_the_bip39_vector() {
        // Trezor test vector: all-zero entropy, passphrase "TREZOR".
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        let seed = mnemonic_to_seed(phrase, "TREZOR").unwrap();
        assert_eq!(
            hex::encode(&seed),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn passphrases_change_the_seed() {
        let phrase = generate_mnemonic(Entropy::Bits128).unwrap();
        let a = mnemonic_to_seed(&phrase, "").unwrap();
        let b = mnemonic_to_seed(&phrase, "passphrase").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn invalid_phrases_are_rejected() {
        assert!(!validate_mnemonic("definitely not a mnemonic"));
        assert!(mnemonic_to_seed("bad phrase here", "").is_err());
        assert!(Entropy::from_bits(100).is_err());
    }
}
