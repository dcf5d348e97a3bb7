// Path: crates/transaction/src/session/mod.rs
//! Node session: the HTTP boundary of the SDK.
//!
//! A session is bound to one node endpoint and one wallet. Connecting
//! fetches the node's identity (which becomes the transaction suggestor)
//! and checks that the node actually serves at least one blockchain.
//! All commitment and signing work stays in the pure crates; this module
//! only stamps inputs, invokes them and moves JSON.

use crate::commitment::{hash_signature_commitment, signature_commitment, unbound_commitment};
use chrono::{DateTime, Utc};
use meridian_crypto::encoding::bytes_to_hex;
use meridian_types::error::TransactionError;
use meridian_types::transaction::{Transaction, TransactionInput, TransactionKind};
use meridian_wallet::Wallet;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Per-chain status block in the node's health response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChainInfo {
    #[serde(rename = "blockHeight", default)]
    pub height: i64,
    #[serde(rename = "pendingTransactions", default)]
    pub pending: Vec<String>,
    #[serde(rename = "messageClock", default)]
    pub clock: BTreeMap<String, u64>,
    #[serde(rename = "lastMessageTime", default)]
    pub last_message_time: Option<DateTime<Utc>>,
    #[serde(rename = "committeeMembers", default)]
    pub committee_members: Vec<String>,
    #[serde(rename = "isInCommittee", default)]
    pub is_in_committee: bool,
    #[serde(rename = "isVoting", default)]
    pub is_voting: bool,
    #[serde(rename = "peerCount", default)]
    pub peer_count: i64,
    #[serde(rename = "networkPeers", default)]
    pub network_peers: Vec<String>,
}

/// The node's `/health` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthInfo {
    #[serde(rename = "nodeVersion", default)]
    pub version: String,
    #[serde(rename = "chainsInfo", default)]
    pub chains: BTreeMap<String, ChainInfo>,
    #[serde(rename = "nodeId", default)]
    pub node_id: String,
    #[serde(rename = "peerId", default)]
    pub peer_id: String,
}

/// A connection to one node, signing with one wallet.
pub struct TransactionSession {
    node_endpoint: String,
    suggestor: String,
    wallet: Wallet,
    client: reqwest::Client,
}

impl std::fmt::Debug for TransactionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionSession")
            .field("node_endpoint", &self.node_endpoint)
            .field("suggestor", &self.suggestor)
            .finish_non_exhaustive()
    }
}

impl TransactionSession {
    /// Connect to a node: fetch its identity and verify it serves at least
    /// one blockchain.
    pub async fn connect(node_endpoint: &str, wallet: Wallet) -> Result<Self, TransactionError> {
        let client = reqwest::Client::new();

        let health: HealthInfo = get_json(&client, &format!("{node_endpoint}/health")).await?;
        let chains: Vec<String> =
            get_json(&client, &format!("{node_endpoint}/blockchains")).await?;
        if chains.is_empty() {
            return Err(TransactionError::NoChains);
        }
        tracing::debug!(
            node_id = %health.node_id,
            chains = chains.len(),
            "connected to node"
        );

        Ok(Self {
            node_endpoint: node_endpoint.to_string(),
            suggestor: health.node_id,
            wallet,
            client,
        })
    }

    /// The node identity stamped on generated transactions.
    pub fn suggestor(&self) -> &str {
        &self.suggestor
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    /// Fill in the protocol fields of `input`, build and sign its
    /// commitment, submit it and return the node's view of the transaction.
    pub async fn generate_transaction(
        &self,
        mut input: TransactionInput,
    ) -> Result<Transaction, TransactionError> {
        input.suggestor = self.suggestor.clone();
        // Second precision: the wire format carries RFC3339 seconds and the
        // signed preimage carries Unix seconds; they must agree.
        let now = Utc::now();
        input.sender_timestamp =
            Some(DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now));

        let kind: TransactionKind = input.payload_type.parse()?;
        // Wallet-creating transactions come from a not-yet-known source.
        if kind != TransactionKind::CreateWallet {
            input.from = self.wallet.address.clone();
        }
        input.key_type = Some(self.wallet.key_type());

        let scheme = self.wallet.key();
        let to_sign = if kind.uses_unbound_commitment() {
            let root = unbound_commitment(&input, scheme)?;
            input.payload_root = bytes_to_hex(&root);
            root
        } else {
            let commitment = signature_commitment(&input, scheme)?;
            input.payload_root = bytes_to_hex(&commitment.payload_root);
            hash_signature_commitment(scheme.curve_hash().as_ref(), &commitment)
        };

        let signature = scheme.sign(&to_sign)?;
        input.sender_signature = bytes_to_hex(&signature);

        let url = format!(
            "{}/blockchains/{}/transactions",
            self.node_endpoint, input.blockchain_id
        );
        tracing::debug!(kind = %kind, url = %url, "submitting transaction");

        let response = self
            .client
            .post(&url)
            .json(&input)
            .send()
            .await
            .map_err(|e| TransactionError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransactionError::Transport(e.to_string()))?;
        if !matches!(status.as_u16(), 200 | 201) {
            return Err(TransactionError::NodeStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| TransactionError::Serialization(e.to_string()))
    }
}

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, TransactionError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| TransactionError::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransactionError::Transport(e.to_string()))?;
    if !matches!(status.as_u16(), 200 | 201) {
        return Err(TransactionError::NodeStatus {
            status: status.as_u16(),
            message: body,
        });
    }

    serde_json::from_str(&body).map_err(|e| TransactionError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_info_parses_the_node_wire_format() {
        let body = r#"{
            "nodeVersion": "1.4.2",
            "nodeId": "node-abc",
            "peerId": "12D3KooW",
            "chainsInfo": {
                "main": {
                    "blockHeight": 42,
                    "pendingTransactions": ["tx1"],
                    "messageClock": {"node-abc": 7},
                    "isInCommittee": true,
                    "isVoting": false,
                    "peerCount": 3,
                    "networkPeers": ["p1", "p2", "p3"]
                }
            }
        }"#;
        let health: HealthInfo = serde_json::from_str(body).unwrap();
        assert_eq!(health.node_id, "node-abc");
        assert_eq!(health.chains["main"].height, 42);
        assert_eq!(health.chains["main"].clock["node-abc"], 7);
        assert!(health.chains["main"].is_in_committee);
    }

    #[test]
    fn missing_health_fields_default() {
        let health: HealthInfo = serde_json::from_str("{}").unwrap();
        assert!(health.node_id.is_empty());
        assert!(health.chains.is_empty());
    }

    #[tokio::test]
    async fn connect_to_an_unreachable_node_is_a_transport_error() {
        let wallet = meridian_wallet::Wallet::from_mnemonic(
            &meridian_wallet::generate_mnemonic(meridian_wallet::Entropy::Bits128).unwrap(),
            "",
            meridian_types::keys::KeyType::Ed25519,
        )
        .unwrap();
        // Port 1 on loopback refuses immediately.
        let err = TransactionSession::connect("http://127.0.0.1:1", wallet)
            .await
            .unwrap_err();
        assert!(matches!(err, TransactionError::Transport(_)));
    }
}
