// Path: crates/commitment/src/merkle/tests.rs

use super::*;
use meridian_crypto::algorithms::hash::{MimcBn254, MimcBw6761, Sha256Hash};
use meridian_crypto::sign::{bn254_scalar_field, bw6_761_scalar_field};

const CHUNK_SIZE: usize = 16;
const DEPTH: u32 = 6;

#[test]
fn bounded_commitment_has_fixed_shape_and_verifies() {
    let hash = MimcBn254::new();
    let modulus = bn254_scalar_field();
    let payload = vec![0x5Au8; 100];

    let commitment =
        commit_bounded(&payload, &modulus, CHUNK_SIZE, DEPTH, &hash, 0).unwrap();

    assert_eq!(commitment.leaf_count, 1 << DEPTH);
    assert_eq!(commitment.root.len(), hash.digest_size());
    assert_eq!(commitment.leaf_chunk.len(), 32);
    assert_eq!(commitment.proof_elements[0], commitment.leaf_chunk);
    assert!(verify_proof(
        &hash,
        &commitment.root,
        &commitment.proof_elements,
        commitment.proof_index,
        commitment.leaf_count,
    ));
}

#[test]
fn bounded_commitment_rejects_oversized_payloads() {
    let hash = MimcBn254::new();
    let modulus = bn254_scalar_field();
    let max = CHUNK_SIZE * (1 << DEPTH);
    let payload = vec![1u8; max + 1];

    let err = commit_bounded(&payload, &modulus, CHUNK_SIZE, DEPTH, &hash, 0).unwrap_err();
    match err {
        CommitmentError::PayloadTooLarge { max: m, got } => {
            assert_eq!(m, max);
            assert_eq!(got, max + 1);
        }
        other => panic!("expected PayloadTooLarge, got {other:?}"),
    }

    // A payload that exactly fills the tree is fine.
    let full = vec![1u8; max];
    assert!(commit_bounded(&full, &modulus, CHUNK_SIZE, DEPTH, &hash, 0).is_ok());
}

#[test]
fn exact_mode_has_no_upper_bound() {
    let hash = MimcBn254::new();
    let modulus = bn254_scalar_field();

    // Larger than the hard-bound capacity; exact mode must accept it.
    let payload = vec![7u8; CHUNK_SIZE * (1 << DEPTH) * 3 + 5];
    let commitment = commit_exact(&payload, &modulus, CHUNK_SIZE, &hash, 0).unwrap();

    let expected_leaves = payload.len().div_ceil(CHUNK_SIZE) as u64;
    assert_eq!(commitment.leaf_count, expected_leaves);
    assert!(verify_proof(
        &hash,
        &commitment.root,
        &commitment.proof_elements,
        0,
        commitment.leaf_count,
    ));
}

#[test]
fn exact_mode_handles_every_small_leaf_count() {
    // Non-power-of-two trees exercise the unbalanced verification paths.
    let hash = Sha256Hash;
    let modulus = bn254_scalar_field();

    for payload_len in 1..=(CHUNK_SIZE * 9) {
        let payload: Vec<u8> = (0..payload_len).map(|i| i as u8).collect();
        let leaf_count = payload_len.div_ceil(CHUNK_SIZE) as u64;
        for proof_index in 0..leaf_count {
            let commitment =
                commit_exact(&payload, &modulus, CHUNK_SIZE, &hash, proof_index).unwrap();
            assert_eq!(commitment.leaf_count, leaf_count);
            assert!(
                verify_proof(
                    &hash,
                    &commitment.root,
                    &commitment.proof_elements,
                    proof_index,
                    leaf_count,
                ),
                "proof failed for {payload_len} bytes, index {proof_index}"
            );
        }
    }
}

#[test]
fn empty_payload_commits_to_one_zero_leaf() {
    let hash = MimcBn254::new();
    let modulus = bn254_scalar_field();
    let commitment = commit_exact(&[], &modulus, CHUNK_SIZE, &hash, 0).unwrap();
    assert_eq!(commitment.leaf_count, 1);
    assert_eq!(commitment.leaf_chunk, vec![0u8; 32]);
}

#[test]
fn leaves_are_left_padded_to_the_field_width() {
    let hash = Sha256Hash;
    let modulus = bn254_scalar_field();
    let payload = [0xABu8; 7];

    let commitment = commit_exact(&payload, &modulus, CHUNK_SIZE, &hash, 0).unwrap();
    let mut expected = vec![0u8; 32];
    expected[32 - 7..].copy_from_slice(&payload);
    assert_eq!(commitment.leaf_chunk, expected);
}

#[test]
fn bls_field_leaves_are_48_bytes_wide() {
    let hash = MimcBw6761::new();
    let modulus = bw6_761_scalar_field();
    let payload = vec![9u8; 50];

    let commitment =
        commit_bounded(&payload, &modulus, CHUNK_SIZE, DEPTH, &hash, 0).unwrap();
    assert_eq!(commitment.leaf_chunk.len(), 48);
    assert_eq!(commitment.root.len(), 48);
    assert!(verify_proof(
        &hash,
        &commitment.root,
        &commitment.proof_elements,
        0,
        commitment.leaf_count,
    ));
}

#[test]
fn chunk_size_must_fit_the_field() {
    let hash = Sha256Hash;
    let modulus = bn254_scalar_field();
    let err = commit_exact(&[1, 2, 3], &modulus, 33, &hash, 0).unwrap_err();
    assert!(matches!(
        err,
        CommitmentError::ChunkWiderThanField {
            chunk_size: 33,
            field_width: 32,
        }
    ));
    assert!(commit_exact(&[1, 2, 3], &modulus, 32, &hash, 0).is_ok());
}

#[test]
fn proof_index_must_address_a_leaf() {
    let hash = Sha256Hash;
    let modulus = bn254_scalar_field();
    let err = commit_exact(&[1u8; 16], &modulus, CHUNK_SIZE, &hash, 5).unwrap_err();
    assert!(matches!(err, CommitmentError::ProofIndexOutOfRange { .. }));
}

#[test]
fn tampered_proofs_do_not_verify() {
    let hash = Sha256Hash;
    let modulus = bn254_scalar_field();
    let payload: Vec<u8> = (0..200u8).collect();
    let commitment = commit_exact(&payload, &modulus, CHUNK_SIZE, &hash, 3).unwrap();

    // Wrong root.
    let mut bad_root = commitment.root.clone();
    bad_root[0] ^= 1;
    assert!(!verify_proof(
        &hash,
        &bad_root,
        &commitment.proof_elements,
        3,
        commitment.leaf_count,
    ));

    // Wrong index.
    assert!(!verify_proof(
        &hash,
        &commitment.root,
        &commitment.proof_elements,
        4,
        commitment.leaf_count,
    ));

    // Tampered leaf data.
    let mut bad_elements = commitment.proof_elements.clone();
    bad_elements[0][31] ^= 1;
    assert!(!verify_proof(
        &hash,
        &commitment.root,
        &bad_elements,
        3,
        commitment.leaf_count,
    ));

    // Truncated proof.
    let truncated = commitment.proof_elements[..commitment.proof_elements.len() - 1].to_vec();
    assert!(!verify_proof(
        &hash,
        &commitment.root,
        &truncated,
        3,
        commitment.leaf_count,
    ));
}

#[test]
fn identical_inputs_produce_identical_commitments() {
    let hash = MimcBn254::new();
    let modulus = bn254_scalar_field();
    let payload = b"deterministic payload bytes";
    let a = commit_bounded(payload, &modulus, CHUNK_SIZE, DEPTH, &hash, 0).unwrap();
    let b = commit_bounded(payload, &modulus, CHUNK_SIZE, DEPTH, &hash, 0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_payloads_produce_different_roots() {
    let hash = MimcBn254::new();
    let modulus = bn254_scalar_field();
    let a = commit_bounded(b"payload one", &modulus, CHUNK_SIZE, DEPTH, &hash, 0).unwrap();
    let b = commit_bounded(b"payload two", &modulus, CHUNK_SIZE, DEPTH, &hash, 0).unwrap();
    assert_ne!(a.root, b.root);
}
