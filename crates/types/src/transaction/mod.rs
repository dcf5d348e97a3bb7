// Path: crates/types/src/transaction/mod.rs
//! Transaction wire types.
//!
//! These mirror the node's JSON contract exactly: field names, enum wire
//! strings and the timestamp format are all part of the external interface
//! and must not drift.

use crate::error::TransactionError;
use crate::keys::KeyType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Version string stamped on transactions produced by this SDK.
pub const TRANSACTION_VERSION: &str = "2.0.0";

/// Per-node logical clock, keyed by node identifier.
pub type VectorClock = BTreeMap<String, u64>;

/// Lifecycle status of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Submitted,
    Accepted,
    Rejected,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Submitted => "SUBMITTED",
            TransactionStatus::Accepted => "ACCEPTED",
            TransactionStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SUBMITTED" => Ok(TransactionStatus::Submitted),
            "ACCEPTED" => Ok(TransactionStatus::Accepted),
            "REJECTED" => Ok(TransactionStatus::Rejected),
            other => Err(TransactionError::InvalidStatus(other.to_string())),
        }
    }
}

/// The kind of operation a transaction carries, named `payloadType` on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Data,
    CreateWallet,
    AlterWallet,
    DeployContract,
    InvokeContract,
    UpgradeContract,
    RollbackContract,
    CreateToken,
    TransferToken,
    ApproveToken,
    MintToken,
    BurnToken,
    MintNft,
    TransferNft,
    ApproveNft,
    SetApprovalForAll,
    TransferMultiToken,
    MintMultiToken,
    ConvertToken,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Data => "DATA",
            TransactionKind::CreateWallet => "CREATE_WALLET",
            TransactionKind::AlterWallet => "ALTER_WALLET",
            TransactionKind::DeployContract => "DEPLOY_SMART_CONTRACT",
            TransactionKind::InvokeContract => "INVOKE_SMART_CONTRACT",
            TransactionKind::UpgradeContract => "UPGRADE_SMART_CONTRACT",
            TransactionKind::RollbackContract => "ROLLBACK_SMART_CONTRACT",
            TransactionKind::CreateToken => "CREATE_TOKEN",
            TransactionKind::TransferToken => "TRANSFER_TOKEN",
            TransactionKind::ApproveToken => "APPROVE_TOKEN",
            TransactionKind::MintToken => "MINT_TOKEN",
            TransactionKind::BurnToken => "BURN_TOKEN",
            TransactionKind::MintNft => "MINT_NFT",
            TransactionKind::TransferNft => "TRANSFER_NFT",
            TransactionKind::ApproveNft => "APPROVE_NFT",
            TransactionKind::SetApprovalForAll => "SET_APPROVAL_FOR_ALL",
            TransactionKind::TransferMultiToken => "TRANSFER_MULTI_TOKEN",
            TransactionKind::MintMultiToken => "MINT_MULTI_TOKEN",
            TransactionKind::ConvertToken => "CONVERT_TOKEN",
        }
    }

    /// Whether this kind signs a bare exact-mode payload root instead of the
    /// identifier-bound commitment. These transactions have no stable
    /// `from` identity at signing time (the wallet or contract does not
    /// exist until the transaction is accepted), so identifier binding
    /// would be meaningless.
    pub fn uses_unbound_commitment(&self) -> bool {
        matches!(
            self,
            TransactionKind::CreateWallet
                | TransactionKind::AlterWallet
                | TransactionKind::DeployContract
                | TransactionKind::UpgradeContract
        )
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DATA" => Ok(TransactionKind::Data),
            "CREATE_WALLET" => Ok(TransactionKind::CreateWallet),
            "ALTER_WALLET" => Ok(TransactionKind::AlterWallet),
            "DEPLOY_SMART_CONTRACT" => Ok(TransactionKind::DeployContract),
            "INVOKE_SMART_CONTRACT" => Ok(TransactionKind::InvokeContract),
            "UPGRADE_SMART_CONTRACT" => Ok(TransactionKind::UpgradeContract),
            "ROLLBACK_SMART_CONTRACT" => Ok(TransactionKind::RollbackContract),
            "CREATE_TOKEN" => Ok(TransactionKind::CreateToken),
            "TRANSFER_TOKEN" => Ok(TransactionKind::TransferToken),
            "APPROVE_TOKEN" => Ok(TransactionKind::ApproveToken),
            "MINT_TOKEN" => Ok(TransactionKind::MintToken),
            "BURN_TOKEN" => Ok(TransactionKind::BurnToken),
            "MINT_NFT" => Ok(TransactionKind::MintNft),
            "TRANSFER_NFT" => Ok(TransactionKind::TransferNft),
            "APPROVE_NFT" => Ok(TransactionKind::ApproveNft),
            "SET_APPROVAL_FOR_ALL" => Ok(TransactionKind::SetApprovalForAll),
            "TRANSFER_MULTI_TOKEN" => Ok(TransactionKind::TransferMultiToken),
            "MINT_MULTI_TOKEN" => Ok(TransactionKind::MintMultiToken),
            "CONVERT_TOKEN" => Ok(TransactionKind::ConvertToken),
            other => Err(TransactionError::InvalidKind(other.to_string())),
        }
    }
}

/// The node's processing verdict for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    ToBeProcessed,
    Success,
    RejectedByDuplicate,
    RejectedByUnexisting,
    RejectedByDisabled,
    RejectedByUnauthorized,
    RejectedByInvalidSignature,
    TransactionError,
    RejectedByInvalidKeyType,
}

impl TransactionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionOutcome::ToBeProcessed => "TO_BE_PROCESSED",
            TransactionOutcome::Success => "SUCCESS",
            TransactionOutcome::RejectedByDuplicate => "REJECTED_BY_DUPLICATE",
            TransactionOutcome::RejectedByUnexisting => "REJECTED_BY_UNEXISTING",
            TransactionOutcome::RejectedByDisabled => "REJECTED_BY_DISABLED",
            TransactionOutcome::RejectedByUnauthorized => "REJECTED_BY_UNAUTHORIZED",
            TransactionOutcome::RejectedByInvalidSignature => "REJECTED_BY_INVALID_SIGNATURE",
            TransactionOutcome::TransactionError => "TRANSACTION_ERROR",
            TransactionOutcome::RejectedByInvalidKeyType => "REJECTED_BY_INVALID_KEY_TYPE",
        }
    }
}

impl fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionOutcome {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TO_BE_PROCESSED" => Ok(TransactionOutcome::ToBeProcessed),
            "SUCCESS" => Ok(TransactionOutcome::Success),
            "REJECTED_BY_DUPLICATE" => Ok(TransactionOutcome::RejectedByDuplicate),
            "REJECTED_BY_UNEXISTING" => Ok(TransactionOutcome::RejectedByUnexisting),
            "REJECTED_BY_DISABLED" => Ok(TransactionOutcome::RejectedByDisabled),
            "REJECTED_BY_UNAUTHORIZED" => Ok(TransactionOutcome::RejectedByUnauthorized),
            "REJECTED_BY_INVALID_SIGNATURE" => Ok(TransactionOutcome::RejectedByInvalidSignature),
            "TRANSACTION_ERROR" => Ok(TransactionOutcome::TransactionError),
            "REJECTED_BY_INVALID_KEY_TYPE" => Ok(TransactionOutcome::RejectedByInvalidKeyType),
            other => Err(TransactionError::InvalidOutcome(other.to_string())),
        }
    }
}

/// Exact and approximate times the node associates with a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeTimestamp {
    #[serde(rename = "ExactTime")]
    pub exact_time: Option<DateTime<Utc>>,
    #[serde(rename = "ApproximateTime")]
    pub approximate_time: Option<DateTime<Utc>>,
}

/// The fields a sender fills in to create a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionInput {
    #[serde(rename = "blockchainId")]
    pub blockchain_id: String,
    pub to: String,
    pub from: String,
    pub payload: String,
    #[serde(rename = "senderSignature")]
    pub sender_signature: String,
    #[serde(rename = "payloadType")]
    pub payload_type: String,
    pub suggestor: String,
    #[serde(rename = "senderTimestamp")]
    pub sender_timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "payloadRoot")]
    pub payload_root: String,
    #[serde(rename = "keyType")]
    pub key_type: Option<KeyType>,
}

/// The fields the node generates when it processes a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    #[serde(rename = "blockHeight")]
    pub block_height: i64,
    #[serde(rename = "vectorClock", default)]
    pub clock: VectorClock,
    #[serde(rename = "timestamp", default)]
    pub timestamp: NodeTimestamp,
    pub version: String,
    pub weight: i64,
    pub status: String,
    pub output: String,
    #[serde(default)]
    pub proof: String,
    #[serde(rename = "proofVersion", default)]
    pub proof_version: String,
}

/// A full transaction: sender input plus node-generated record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(flatten)]
    pub input: TransactionInput,
    #[serde(flatten)]
    pub record: TransactionRecord,
}

impl Transaction {
    /// Weight is the byte size of the string fields plus a fixed allowance
    /// for the integer fields.
    pub fn compute_weight(&self) -> i64 {
        let mut weight = 0usize;
        weight += self.input.blockchain_id.len();
        weight += self.record.transaction_id.len();
        weight += self.input.to.len();
        weight += self.input.from.len();
        weight += self.input.payload.len();
        weight += self.input.sender_signature.len();
        weight += self.record.version.len();
        weight += self.input.suggestor.len();
        weight as i64 + 16
    }

    /// Update the stored weight from the current field contents.
    pub fn set_weight(&mut self) {
        self.record.weight = self.compute_weight();
    }
}

/// A block as reported by the node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "blockHash")]
    pub hash: String,
    #[serde(rename = "previousBlockHash")]
    pub previous_block_hash: String,
    pub height: i64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(rename = "merkleRoot")]
    pub merkle_root: String,
    #[serde(default)]
    pub voters: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strings_round_trip() {
        let kinds = [
            TransactionKind::Data,
            TransactionKind::CreateWallet,
            TransactionKind::AlterWallet,
            TransactionKind::DeployContract,
            TransactionKind::InvokeContract,
            TransactionKind::UpgradeContract,
            TransactionKind::RollbackContract,
            TransactionKind::CreateToken,
            TransactionKind::TransferToken,
            TransactionKind::ApproveToken,
            TransactionKind::MintToken,
            TransactionKind::BurnToken,
            TransactionKind::MintNft,
            TransactionKind::TransferNft,
            TransactionKind::ApproveNft,
            TransactionKind::SetApprovalForAll,
            TransactionKind::TransferMultiToken,
            TransactionKind::MintMultiToken,
            TransactionKind::ConvertToken,
        ];
        for kind in kinds {
            assert_eq!(kind.as_str().parse::<TransactionKind>().unwrap(), kind);
        }
        assert!("NOT_A_KIND".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn unbound_kinds_are_exactly_the_identityless_ones() {
        assert!(TransactionKind::CreateWallet.uses_unbound_commitment());
        assert!(TransactionKind::AlterWallet.uses_unbound_commitment());
        assert!(TransactionKind::DeployContract.uses_unbound_commitment());
        assert!(TransactionKind::UpgradeContract.uses_unbound_commitment());
        assert!(!TransactionKind::Data.uses_unbound_commitment());
        assert!(!TransactionKind::InvokeContract.uses_unbound_commitment());
        assert!(!TransactionKind::TransferToken.uses_unbound_commitment());
    }

    #[test]
    fn transaction_weight_counts_string_fields() {
        let mut tx = Transaction::default();
        tx.input.blockchain_id = "chain".into(); // 5
        tx.input.to = "to".into(); // 2
        tx.input.from = "from".into(); // 4
        tx.input.payload = "payload".into(); // 7
        tx.set_weight();
        assert_eq!(tx.record.weight, 5 + 2 + 4 + 7 + 16);
    }

    #[test]
    fn transaction_json_uses_wire_field_names() {
        let mut tx = Transaction::default();
        tx.input.blockchain_id = "b".into();
        tx.record.transaction_id = "t".into();
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json.get("blockchainId").is_some());
        assert!(json.get("transactionId").is_some());
        assert!(json.get("senderSignature").is_some());
        assert!(json.get("payloadRoot").is_some());
    }
}
