// Path: crates/transaction/src/commitment/mod.rs
//! Signature commitment assembler.
//!
//! Binds transaction metadata and the payload root into one scalar-sized
//! value to sign, independent of payload size. Two branches exist:
//!
//! - **Bound**: ordinary transactions. Each identifier (blockchain id,
//!   from, to, suggestor) is hashed with SHA-256 and split into 16-byte
//!   high/low halves - 128-bit halves are always below any supported
//!   scalar field modulus, which is why the full 32-byte digest cannot be
//!   used directly. The halves, the hard-bound payload root and the
//!   8-byte big-endian timestamp are concatenated in a fixed order and the
//!   result is hashed with the signer's curve-native hash.
//! - **Unbound**: wallet creation/alteration and contract deploy/upgrade.
//!   These have no stable sender identity yet, so the exact-mode payload
//!   root is signed directly.
//!
//! The preimage segment order is a wire contract: reordering it breaks
//! signature compatibility with every deployed verifier.

use crate::{CHUNK_SIZE, DEPTH};
use meridian_commitment::{commit_bounded, commit_exact};
use meridian_crypto::algorithms::hash::{sha256, HashFunction};
use meridian_crypto::sign::SigningScheme;
use meridian_types::error::TransactionError;
use meridian_types::transaction::TransactionInput;

const HALF_LEN: usize = 16;

/// The commitment a bound-branch signature speaks about: identifier digest
/// halves, payload root and timestamp, plus the inclusion proof bundle for
/// the root chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCommitment {
    pub blockchain_id_high: Vec<u8>,
    pub blockchain_id_low: Vec<u8>,
    pub from_high: Vec<u8>,
    pub from_low: Vec<u8>,
    pub to_high: Vec<u8>,
    pub to_low: Vec<u8>,
    pub payload_root: Vec<u8>,
    /// Sender timestamp, Unix seconds.
    pub timestamp: u64,
    pub suggestor_high: Vec<u8>,
    pub suggestor_low: Vec<u8>,
    /// Inclusion proof for the chunk at `chunk_index`.
    pub proof_elements: Vec<Vec<u8>>,
    pub chunk_index: u64,
    pub num_leaves: u64,
    pub chunk_size: usize,
    /// The padded chunk the proof speaks about.
    pub proof_chunk: Vec<u8>,
    pub depth: u32,
}

impl SignatureCommitment {
    /// The exact ordered byte sequence whose curve-native hash gets signed.
    ///
    /// Order: blockchain id high/low, from high/low, to high/low, payload
    /// root, timestamp (8 bytes big-endian), suggestor high/low.
    pub fn preimage(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 * HALF_LEN + self.payload_root.len() + 8);
        out.extend_from_slice(&self.blockchain_id_high);
        out.extend_from_slice(&self.blockchain_id_low);
        out.extend_from_slice(&self.from_high);
        out.extend_from_slice(&self.from_low);
        out.extend_from_slice(&self.to_high);
        out.extend_from_slice(&self.to_low);
        out.extend_from_slice(&self.payload_root);
        out.extend_from_slice(&self.timestamp.to_be_bytes());
        out.extend_from_slice(&self.suggestor_high);
        out.extend_from_slice(&self.suggestor_low);
        out
    }
}

/// Hash an identifier with SHA-256 and split the digest into its 16-byte
/// high and low halves.
pub fn split_hash32(data: &str) -> (Vec<u8>, Vec<u8>) {
    let digest = sha256(data.as_bytes());
    (digest[..HALF_LEN].to_vec(), digest[HALF_LEN..].to_vec())
}

/// Build the bound-branch commitment for a transaction input: split the
/// identifiers and commit to the payload with a hard-bound tree shaped for
/// the signer's scalar field.
pub fn signature_commitment(
    input: &TransactionInput,
    scheme: &dyn SigningScheme,
) -> Result<SignatureCommitment, TransactionError> {
    let (blockchain_id_high, blockchain_id_low) = split_hash32(&input.blockchain_id);
    let (from_high, from_low) = split_hash32(&input.from);
    let (to_high, to_low) = split_hash32(&input.to);
    let (suggestor_high, suggestor_low) = split_hash32(&input.suggestor);

    let timestamp = sender_timestamp(input)?;
    let modulus = scheme.scalar_field_modulus();
    let hash = scheme.curve_hash();

    let commitment = commit_bounded(
        input.payload.as_bytes(),
        &modulus,
        CHUNK_SIZE,
        DEPTH,
        hash.as_ref(),
        0,
    )?;

    Ok(SignatureCommitment {
        blockchain_id_high,
        blockchain_id_low,
        from_high,
        from_low,
        to_high,
        to_low,
        payload_root: commitment.root,
        timestamp,
        suggestor_high,
        suggestor_low,
        proof_elements: commitment.proof_elements,
        chunk_index: commitment.proof_index,
        num_leaves: commitment.leaf_count,
        chunk_size: CHUNK_SIZE,
        proof_chunk: commitment.leaf_chunk,
        depth: DEPTH,
    })
}

/// Hash a commitment's preimage with the given curve-native hash. The
/// result is the exact byte sequence handed to `sign`.
pub fn hash_signature_commitment(
    hash: &dyn HashFunction,
    commitment: &SignatureCommitment,
) -> Vec<u8> {
    hash.hash(&commitment.preimage())
}

/// Unbound branch: the exact-mode payload root, signed directly.
pub fn unbound_commitment(
    input: &TransactionInput,
    scheme: &dyn SigningScheme,
) -> Result<Vec<u8>, TransactionError> {
    let modulus = scheme.scalar_field_modulus();
    let hash = scheme.curve_hash();
    let commitment = commit_exact(
        input.payload.as_bytes(),
        &modulus,
        CHUNK_SIZE,
        hash.as_ref(),
        0,
    )?;
    Ok(commitment.root)
}

fn sender_timestamp(input: &TransactionInput) -> Result<u64, TransactionError> {
    let stamp = input
        .sender_timestamp
        .ok_or_else(|| TransactionError::Serialization("senderTimestamp is not set".into()))?;
    Ok(stamp.timestamp() as u64)
}
