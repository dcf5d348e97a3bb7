// Path: crates/wallet/src/lib.rs
//! # Meridian SDK Wallets
//!
//! Wallet generation from BIP-39 mnemonics, address derivation and
//! key-file persistence. A wallet owns one signing scheme; everything the
//! transaction layer needs from it flows through that capability.

use meridian_crypto::algorithms::hash::sha256;
use meridian_crypto::sign::{scheme_for, SigningScheme};
use meridian_types::error::WalletError;
use meridian_types::keys::KeyType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub mod mnemonic;

pub use mnemonic::{generate_mnemonic, mnemonic_to_seed, validate_mnemonic, Entropy, DEFAULT_ENTROPY};

/// Extension enforced on wallet files.
pub const WALLET_FILE_EXTENSION: &str = "mkey";

/// Well-known auth group covering wallet administration.
pub const WALLET_GROUP_NAME: &str = "wallet";

/// CRUD permissions for one auth group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPermission {
    /// Create new entries of this type
    pub create: bool,
    /// Read existing entries of this type
    pub read: bool,
    /// Update existing entries of this type
    pub update: bool,
    /// Delete existing entries of this type
    pub delete: bool,
}

/// A wallet: an address plus the signing scheme that controls it.
pub struct Wallet {
    pub address: String,
    pub enabled: bool,
    pub parent: String,
    pub auth_groups: BTreeMap<String, AuthPermission>,
    key: Box<dyn SigningScheme>,
}

/// The JSON structure wallet files persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletFile {
    pub address: String,
    pub enabled: bool,
    pub parent: String,
    #[serde(rename = "authGroups", default)]
    pub auth_groups: BTreeMap<String, AuthPermission>,
    #[serde(default)]
    pub mnemonic: String,
    #[serde(rename = "keyType")]
    pub key_type: KeyType,
    #[serde(rename = "publicKeyHex", default)]
    pub public_key_hex: String,
    #[serde(rename = "privateKeyHex", default)]
    pub private_key_hex: String,
}

/// Derive a wallet address from an uncompressed public key hex string:
/// lowercase hex of the SHA-256 of the lowercased key.
pub fn parse_address(public_key_hex: &str) -> String {
    hex::encode(sha256(public_key_hex.to_ascii_lowercase().as_bytes()))
}

impl Wallet {
    /// The signing scheme controlling this wallet.
    pub fn key(&self) -> &dyn SigningScheme {
        self.key.as_ref()
    }

    pub fn key_type(&self) -> KeyType {
        self.key.key_type()
    }

    /// Create a wallet from an existing mnemonic phrase.
    pub fn from_mnemonic(
        mnemonic: &str,
        passphrase: &str,
        key_type: KeyType,
    ) -> Result<Self, WalletError> {
        let seed = mnemonic::mnemonic_to_seed(mnemonic, passphrase)?;
        let mut key = scheme_for(key_type);
        key.generate_from_seed(&seed)?;

        let address = parse_address(&key.public_key_hex(false));
        Ok(Self {
            address,
            enabled: false,
            parent: String::new(),
            auth_groups: BTreeMap::new(),
            key,
        })
    }

    /// Create a wallet with a fresh random mnemonic. Returns the wallet and
    /// the phrase; the phrase is the only way to recover the wallet later.
    pub fn generate_new(
        passphrase: &str,
        key_type: KeyType,
        parent: &str,
        auth_groups: BTreeMap<String, AuthPermission>,
        entropy: Entropy,
    ) -> Result<(Self, String), WalletError> {
        let phrase = mnemonic::generate_mnemonic(entropy)?;
        let mut wallet = Self::from_mnemonic(&phrase, passphrase, key_type)?;
        wallet.parent = parent.to_string();
        wallet.enabled = true;
        wallet.auth_groups = auth_groups;
        Ok((wallet, phrase))
    }

    /// Rebuild a wallet from serialized keys.
    pub fn from_hex_keys(
        public_key_hex: &str,
        private_key_hex: &str,
        key_type: KeyType,
    ) -> Result<Self, WalletError> {
        let mut key = scheme_for(key_type);
        key.set_public_key_hex(false, public_key_hex)?;
        key.set_private_key_hex(private_key_hex)?;

        let address = parse_address(&key.public_key_hex(false));
        Ok(Self {
            address,
            enabled: false,
            parent: String::new(),
            auth_groups: BTreeMap::new(),
            key,
        })
    }

    /// Parse a wallet from its JSON file contents.
    pub fn from_json(data: &str, passphrase: &str) -> Result<Self, WalletError> {
        let file: WalletFile =
            serde_json::from_str(data).map_err(|e| WalletError::Malformed(e.to_string()))?;
        Self::from_wallet_file(file, passphrase)
    }

    /// Load a wallet from a file written by [`Wallet::save_to_file`].
    ///
    /// Recovery precedence: mnemonic first (full re-derivation), then
    /// private key, then public key only (a wallet that can verify but not
    /// sign).
    pub fn load_from_file(path: impl AsRef<Path>, passphrase: &str) -> Result<Self, WalletError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let file: WalletFile =
            serde_json::from_str(&data).map_err(|e| WalletError::Malformed(e.to_string()))?;
        tracing::debug!(path = %path.as_ref().display(), "loaded wallet file");
        Self::from_wallet_file(file, passphrase)
    }

    fn from_wallet_file(file: WalletFile, passphrase: &str) -> Result<Self, WalletError> {
        if !file.mnemonic.is_empty() {
            let mut wallet = Self::from_mnemonic(&file.mnemonic, passphrase, file.key_type)?;
            wallet.enabled = file.enabled;
            wallet.parent = file.parent;
            wallet.auth_groups = file.auth_groups;
            return Ok(wallet);
        }

        if !file.private_key_hex.is_empty() {
            let mut key = scheme_for(file.key_type);
            if !file.public_key_hex.is_empty() {
                key.set_public_key_hex(false, &file.public_key_hex)?;
            }
            key.set_private_key_hex(&file.private_key_hex)?;
            return Ok(Self {
                address: file.address,
                enabled: file.enabled,
                parent: file.parent,
                auth_groups: file.auth_groups,
                key,
            });
        }

        // Public key only: enough to verify signatures and watch an
        // address, not to sign.
        let mut key = scheme_for(file.key_type);
        key.set_public_key_hex(false, &file.public_key_hex)?;
        Ok(Self {
            address: file.address,
            enabled: file.enabled,
            parent: file.parent,
            auth_groups: file.auth_groups,
            key,
        })
    }

    /// Write the wallet to disk as JSON with owner-only permissions. The
    /// mnemonic is stored so the wallet can be fully re-derived; the
    /// private key is written only when explicitly requested.
    pub fn save_to_file(
        &self,
        path: impl AsRef<Path>,
        mnemonic: &str,
        include_private_key: bool,
    ) -> Result<PathBuf, WalletError> {
        let mut path = path.as_ref().to_path_buf();
        if path.extension().map_or(true, |e| e != WALLET_FILE_EXTENSION) {
            let mut name = path.file_name().unwrap_or_default().to_os_string();
            name.push(".");
            name.push(WALLET_FILE_EXTENSION);
            path.set_file_name(name);
        }

        let mut file = WalletFile {
            address: self.address.clone(),
            enabled: self.enabled,
            parent: self.parent.clone(),
            auth_groups: self.auth_groups.clone(),
            mnemonic: mnemonic.to_string(),
            key_type: self.key.key_type(),
            public_key_hex: self.key.public_key_hex(false),
            private_key_hex: String::new(),
        };
        if include_private_key {
            file.private_key_hex = self.key.private_key_hex();
        }

        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| WalletError::Malformed(e.to_string()))?;
        std::fs::write(&path, json)?;
        restrict_permissions(&path)?;
        tracing::debug!(path = %path.display(), "wrote wallet file");
        Ok(path)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), WalletError> {
    use std::os::unix::fs::PermissionsExt;
    let perms = std::fs::Permissions::from_mode(0o600);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), WalletError> {
    Ok(())
}
