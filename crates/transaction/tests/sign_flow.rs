// Path: crates/transaction/tests/sign_flow.rs
//! End-to-end signing flow, node submission excluded: wallet from
//! mnemonic, commitment assembly, signature, verification.

use chrono::{TimeZone, Utc};
use meridian_commitment::verify_proof;
use meridian_crypto::encoding::bytes_to_hex;
use meridian_transaction::commitment::{
    hash_signature_commitment, signature_commitment, unbound_commitment,
};
use meridian_transaction::{codec, payloads};
use meridian_types::keys::KeyType;
use meridian_types::transaction::{TransactionInput, TransactionKind};
use meridian_wallet::{Entropy, Wallet};

fn input_for(kind: TransactionKind, payload: String, from: &str) -> TransactionInput {
    TransactionInput {
        blockchain_id: "main".into(),
        to: "receiver-address".into(),
        from: from.into(),
        payload,
        payload_type: kind.as_str().into(),
        suggestor: "node-1".into(),
        sender_timestamp: Some(Utc.timestamp_opt(1_722_000_000, 0).unwrap()),
        ..TransactionInput::default()
    }
}

#[test]
fn bound_transactions_sign_and_verify_for_every_algorithm() {
    let phrase =
        meridian_wallet::generate_mnemonic(Entropy::Bits256).expect("mnemonic generation");

    for key_type in [
        KeyType::Secp256k1,
        KeyType::Ed25519,
        KeyType::Bls12377,
        KeyType::MlDsa87,
    ] {
        let wallet = Wallet::from_mnemonic(&phrase, "", key_type).unwrap();
        let input = input_for(
            TransactionKind::Data,
            "hello ledger".into(),
            &wallet.address,
        );

        let commitment = signature_commitment(&input, wallet.key()).unwrap();
        let digest = hash_signature_commitment(wallet.key().curve_hash().as_ref(), &commitment);
        let signature = wallet.key().sign(&digest).unwrap();

        assert!(
            wallet.key().verify(&digest, &signature).unwrap(),
            "{key_type} signature must verify"
        );

        // The inclusion proof the node receives must verify against the
        // root that was signed over.
        assert!(verify_proof(
            wallet.key().curve_hash().as_ref(),
            &commitment.payload_root,
            &commitment.proof_elements,
            commitment.chunk_index,
            commitment.num_leaves,
        ));
    }
}

#[test]
fn unbound_transactions_sign_the_bare_payload_root() {
    let phrase = meridian_wallet::generate_mnemonic(Entropy::Bits128).unwrap();
    let wallet = Wallet::from_mnemonic(&phrase, "", KeyType::Secp256k1).unwrap();

    let kind = TransactionKind::CreateWallet;
    assert!(kind.uses_unbound_commitment());

    let input = input_for(kind, "wallet registration payload".into(), "");
    let root = unbound_commitment(&input, wallet.key()).unwrap();
    let signature = wallet.key().sign(&root).unwrap();
    assert!(wallet.key().verify(&root, &signature).unwrap());

    // The hex form of the root is what lands in `payloadRoot` on the wire.
    let hex_root = bytes_to_hex(&root);
    assert_eq!(hex_root.len(), root.len() * 2);
    assert_eq!(hex_root, hex_root.to_ascii_uppercase());
}

#[test]
fn invoke_payload_arguments_survive_the_full_encode_path() {
    // Structured contract arguments: codec -> payload JSON -> commitment.
    let mut config = std::collections::BTreeMap::new();
    config.insert("retries".to_string(), codec::Value::Int32(3));
    config.insert("verbose".to_string(), codec::Value::Bool(true));

    let payload = payloads::InvokeContractPayload {
        function_name: "configure".into(),
        args: vec![
            payloads::ContractArg::encode(&codec::Value::Map(config.clone())),
            payloads::ContractArg::encode(&codec::Value::Int64(9000)),
        ],
        gas_limit: 500_000,
    };
    let payload_json = serde_json::to_string(&payload).unwrap();

    let phrase = meridian_wallet::generate_mnemonic(Entropy::Bits128).unwrap();
    let wallet = Wallet::from_mnemonic(&phrase, "", KeyType::Ed25519).unwrap();
    let input = input_for(TransactionKind::InvokeContract, payload_json, &wallet.address);

    let commitment = signature_commitment(&input, wallet.key()).unwrap();
    let digest = hash_signature_commitment(wallet.key().curve_hash().as_ref(), &commitment);
    let signature = wallet.key().sign(&digest).unwrap();
    assert!(wallet.key().verify(&digest, &signature).unwrap());

    // The receiving side decodes the arguments back to the same values.
    let back: payloads::InvokeContractPayload = serde_json::from_str(&input.payload).unwrap();
    assert_eq!(
        codec::decode(&back.args[0].value).unwrap(),
        codec::Value::Map(config)
    );
    assert_eq!(
        codec::decode(&back.args[1].value).unwrap(),
        codec::Value::Int64(9000)
    );
}

#[test]
fn bls_commitments_use_the_wide_field() {
    let phrase = meridian_wallet::generate_mnemonic(Entropy::Bits128).unwrap();
    let wallet = Wallet::from_mnemonic(&phrase, "", KeyType::Bls12377).unwrap();
    let input = input_for(TransactionKind::Data, "wide field".into(), &wallet.address);

    let commitment = signature_commitment(&input, wallet.key()).unwrap();
    // BW6-761 scalar field: 48-byte leaves, 48-byte root and digest.
    assert_eq!(commitment.payload_root.len(), 48);
    assert_eq!(commitment.proof_chunk.len(), 48);
    let digest = hash_signature_commitment(wallet.key().curve_hash().as_ref(), &commitment);
    assert_eq!(digest.len(), 48);
}
