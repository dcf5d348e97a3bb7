// Path: crates/transaction/src/payloads/mod.rs
//! JSON payload bodies for the supported operation kinds.
//!
//! These are the structures carried in a transaction's `payload` field,
//! serialized with the node's JSON field names. Binary fields use base64,
//! matching the node's JSON convention for byte arrays.

use serde::{Deserialize, Serialize};

pub const ERC20_TOKEN_TYPE: &str = "ERC20";
pub const ERC721_TOKEN_TYPE: &str = "ERC721";
pub const ERC1155_TOKEN_TYPE: &str = "ERC1155";

/// A single contract argument, already encoded with the typed binary codec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractArg {
    #[serde(with = "base64_bytes")]
    pub value: Vec<u8>,
}

impl ContractArg {
    /// Encode a codec value into an argument.
    pub fn encode(value: &crate::codec::Value) -> Self {
        Self {
            value: crate::codec::encode(value),
        }
    }
}

/// Payload for `INVOKE_SMART_CONTRACT`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvokeContractPayload {
    #[serde(rename = "functionName")]
    pub function_name: String,
    #[serde(default)]
    pub args: Vec<ContractArg>,
    #[serde(rename = "gasLimit")]
    pub gas_limit: u64,
}

/// Payload for `ROLLBACK_SMART_CONTRACT`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollbackContractPayload {
    #[serde(rename = "targetVersion")]
    pub target_version: u64,
    #[serde(rename = "rollbackReason", default, skip_serializing_if = "String::is_empty")]
    pub rollback_reason: String,
}

/// Payload for `UPGRADE_SMART_CONTRACT`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpgradeContractPayload {
    #[serde(rename = "newSourceCode")]
    pub new_source_code: String,
    #[serde(rename = "upgradeReason", default, skip_serializing_if = "String::is_empty")]
    pub upgrade_reason: String,
}

/// Payload for `CREATE_TOKEN`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTokenPayload {
    #[serde(rename = "tokenType")]
    pub token_type: String,
    pub name: String,
    pub symbol: String,
    /// ERC20 only.
    #[serde(default, skip_serializing_if = "is_zero_u8")]
    pub decimals: u8,
    /// ERC20 only.
    #[serde(rename = "initialSupply", default, skip_serializing_if = "is_zero_u64")]
    pub initial_supply: u64,
    /// NFT only.
    #[serde(rename = "baseURI", default, skip_serializing_if = "String::is_empty")]
    pub base_uri: String,
    pub mintable: bool,
    pub burnable: bool,
}

/// Transfer payload, shared by ERC20/ERC721/ERC1155.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferTokenPayload {
    #[serde(rename = "tokenAddress")]
    pub token_address: String,
    /// Defaults to the transaction sender when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,
    pub to: String,
    /// ERC20/ERC1155.
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub amount: u64,
    /// ERC721/ERC1155.
    #[serde(rename = "tokenId", default, skip_serializing_if = "is_zero_u64")]
    pub token_id: u64,
    /// ERC1155 batch.
    #[serde(rename = "tokenIds", default, skip_serializing_if = "Vec::is_empty")]
    pub token_ids: Vec<u64>,
    /// ERC1155 batch.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amounts: Vec<u64>,
    /// ERC1155 additional data.
    #[serde(with = "base64_bytes", default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<u8>,
}

/// Batch transfer payload for ERC1155.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchTransferTokenPayload {
    #[serde(rename = "tokenAddress")]
    pub token_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,
    pub to: String,
    #[serde(rename = "tokenIds")]
    pub token_ids: Vec<u64>,
    pub amounts: Vec<u64>,
    #[serde(with = "base64_bytes", default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<u8>,
}

/// Approval payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApproveTokenPayload {
    #[serde(rename = "tokenAddress")]
    pub token_address: String,
    pub spender: String,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub amount: u64,
    #[serde(rename = "tokenId", default, skip_serializing_if = "is_zero_u64")]
    pub token_id: u64,
}

/// Mint payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MintTokenPayload {
    #[serde(rename = "tokenAddress")]
    pub token_address: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub amount: u64,
    #[serde(rename = "tokenId", default, skip_serializing_if = "is_zero_u64")]
    pub token_id: u64,
    #[serde(rename = "tokenURI", default, skip_serializing_if = "String::is_empty")]
    pub token_uri: String,
}

/// Burn payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BurnTokenPayload {
    #[serde(rename = "tokenAddress")]
    pub token_address: String,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub amount: u64,
    #[serde(rename = "tokenId", default, skip_serializing_if = "is_zero_u64")]
    pub token_id: u64,
}

/// Operator approval payload (ERC721/ERC1155).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetApprovalForAllPayload {
    #[serde(rename = "tokenAddress")]
    pub token_address: String,
    pub operator: String,
    pub approved: bool,
}

/// Conversion payload for semi-fungible ERC1155 tokens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertTokenPayload {
    #[serde(rename = "tokenAddress")]
    pub token_address: String,
    #[serde(rename = "fromTokenId")]
    pub from_token_id: u64,
    #[serde(rename = "toTokenId", default, skip_serializing_if = "is_zero_u64")]
    pub to_token_id: u64,
    pub amount: u64,
    #[serde(rename = "newTokenURI", default, skip_serializing_if = "String::is_empty")]
    pub new_token_uri: String,
    /// Keep the source tokens instead of burning them.
    #[serde(rename = "preserveTokens", default, skip_serializing_if = "is_false")]
    pub preserve_tokens: bool,
}

/// Token metadata as stored by the node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenMetadata {
    #[serde(rename = "tokenType")]
    pub token_type: String,
    pub name: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "is_zero_u8")]
    pub decimals: u8,
    pub owner: String,
    #[serde(rename = "blockchainId")]
    pub blockchain_id: String,
    pub mintable: bool,
    pub burnable: bool,
    #[serde(rename = "baseURI", default, skip_serializing_if = "String::is_empty")]
    pub base_uri: String,
    #[serde(rename = "totalSupply")]
    pub total_supply: u64,
    #[serde(rename = "createdBlock")]
    pub created_block: i64,
}

fn is_zero_u8(v: &u8) -> bool {
    *v == 0
}

fn is_zero_u64(v: &u64) -> bool {
    *v == 0
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// Base64 (de)serialization for binary JSON fields.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Value;

    #[test]
    fn invoke_payload_serializes_with_wire_names() {
        let payload = InvokeContractPayload {
            function_name: "transfer".into(),
            args: vec![
                ContractArg::encode(&Value::String("to-address".into())),
                ContractArg::encode(&Value::Int64(25)),
            ],
            gas_limit: 100_000,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("functionName").is_some());
        assert!(json.get("gasLimit").is_some());
        // Encoded args travel as base64 strings.
        assert!(json["args"][0]["value"].is_string());

        let back: InvokeContractPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back.args, payload.args);
        assert_eq!(
            crate::codec::decode(&back.args[1].value).unwrap(),
            Value::Int64(25)
        );
    }

    #[test]
    fn optional_fields_are_omitted_when_empty() {
        let payload = TransferTokenPayload {
            token_address: "tok".into(),
            to: "dest".into(),
            amount: 10,
            ..TransferTokenPayload::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("from").is_none());
        assert!(json.get("tokenIds").is_none());
        assert!(json.get("data").is_none());
        assert_eq!(json["amount"], 10);
    }

    #[test]
    fn create_token_round_trips() {
        let payload = CreateTokenPayload {
            token_type: ERC20_TOKEN_TYPE.into(),
            name: "Meridian Coin".into(),
            symbol: "MRD".into(),
            decimals: 8,
            initial_supply: 1_000_000,
            mintable: true,
            burnable: false,
            ..CreateTokenPayload::default()
        };
        let json = serde_json::to_string(&payload).unwrap();
        let back: CreateTokenPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back.symbol, "MRD");
        assert_eq!(back.initial_supply, 1_000_000);
    }
}
