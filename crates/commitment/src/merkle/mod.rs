// Path: crates/commitment/src/merkle/mod.rs
//! Chunked field-element Merkle commitment builder.
//!
//! The payload is split into `chunk_size`-byte chunks and every chunk is
//! left-padded with zero bytes to the byte width of the scalar field
//! modulus, so each leaf is a valid field element for the curve-native hash
//! building the tree.
//!
//! Two modes exist:
//!
//! - [`commit_exact`]: one leaf per chunk, no upper bound on payload size.
//!   Used when only the root matters (wallet creation, contract
//!   deployment), where the proof is discarded.
//! - [`commit_bounded`]: the leaf count is fixed at `2^depth` and larger
//!   payloads are rejected. Slots past the payload are all-zero leaves, so
//!   downstream verifiers can assume a constant tree shape.
//!
//! The size asymmetry between the modes is intentional: unbound payloads
//! are allowed to grow, hard-bound payloads are not. Both behaviors are
//! pinned by tests.
//!
//! Every commitment self-verifies its own inclusion proof before it is
//! returned; a failure there is a builder defect and surfaces as the fatal
//! [`CommitmentError::ProofVerification`], never as a silent bad proof.

use meridian_crypto::algorithms::hash::HashFunction;
use meridian_types::error::CommitmentError;
use num_bigint::BigUint;

/// A Merkle commitment over a chunked, field-padded payload.
///
/// `proof_elements[0]` is the padded chunk being proven; the remaining
/// elements are sibling digests ordered from the leaf up to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleCommitment {
    /// Root digest of the padded leaves.
    pub root: Vec<u8>,
    /// Inclusion proof for the leaf at `proof_index`.
    pub proof_elements: Vec<Vec<u8>>,
    /// The padded chunk the proof speaks about.
    pub leaf_chunk: Vec<u8>,
    /// Number of leaves in the tree.
    pub leaf_count: u64,
    /// Index of the proven leaf.
    pub proof_index: u64,
}

/// Build an exact-mode commitment: `ceil(len / chunk_size)` leaves, no
/// upper bound on the payload size. An empty payload commits to a single
/// all-zero leaf.
///
/// `chunk_size` must be non-zero and must not exceed the byte width of
/// `modulus`.
pub fn commit_exact(
    payload: &[u8],
    modulus: &BigUint,
    chunk_size: usize,
    hash: &dyn HashFunction,
    proof_index: u64,
) -> Result<MerkleCommitment, CommitmentError> {
    let field_width = check_chunk_size(modulus, chunk_size)?;

    let leaf_count = payload.len().div_ceil(chunk_size).max(1);
    let leaves = chunk_leaves(payload, chunk_size, field_width, leaf_count);

    build_commitment(&leaves, hash, proof_index)
}

/// Build a hard-bound commitment: exactly `2^depth` leaves regardless of
/// payload length, with all-zero leaves past the payload. Payloads longer
/// than `chunk_size * 2^depth` are rejected.
pub fn commit_bounded(
    payload: &[u8],
    modulus: &BigUint,
    chunk_size: usize,
    depth: u32,
    hash: &dyn HashFunction,
    proof_index: u64,
) -> Result<MerkleCommitment, CommitmentError> {
    let field_width = check_chunk_size(modulus, chunk_size)?;

    let leaf_count = 1usize << depth;
    let max_size = chunk_size * leaf_count;
    if payload.len() > max_size {
        return Err(CommitmentError::PayloadTooLarge {
            max: max_size,
            got: payload.len(),
        });
    }

    let leaves = chunk_leaves(payload, chunk_size, field_width, leaf_count);
    if leaves.len() != leaf_count {
        return Err(CommitmentError::LeafCountMismatch {
            expected: leaf_count as u64,
            got: leaves.len() as u64,
        });
    }

    build_commitment(&leaves, hash, proof_index)
}

/// Verify an inclusion proof against a root.
///
/// `proof_elements[0]` is the (padded) leaf data; later elements are
/// sibling digests from the leaf towards the root. Trees with a leaf count
/// that is not a power of two split at the largest power of two below the
/// count, so exact-mode proofs of any size verify with the same walk.
pub fn verify_proof(
    hash: &dyn HashFunction,
    root: &[u8],
    proof_elements: &[Vec<u8>],
    proof_index: u64,
    leaf_count: u64,
) -> bool {
    if proof_elements.is_empty() || proof_index >= leaf_count {
        return false;
    }

    let mut height = 0usize;
    let mut sum = hash.hash(&proof_elements[0]);
    height += 1;

    // Climb while the aligned subtree containing the leaf is complete.
    let mut stable_end = proof_index;
    loop {
        if height >= u64::BITS as usize {
            return false;
        }
        let subtree_size = 1u64 << height;
        let subtree_start = (proof_index / subtree_size) * subtree_size;
        let subtree_end = subtree_start + subtree_size - 1;
        if subtree_end >= leaf_count {
            break;
        }
        stable_end = subtree_end;

        let Some(sibling) = proof_elements.get(height) else {
            return false;
        };
        let midpoint = subtree_start + subtree_size / 2;
        sum = if proof_index < midpoint {
            node_sum(hash, &sum, sibling)
        } else {
            node_sum(hash, sibling, &sum)
        };
        height += 1;
    }

    // Leaves to the right of the last complete subtree join as one sibling.
    if stable_end != leaf_count - 1 {
        let Some(sibling) = proof_elements.get(height) else {
            return false;
        };
        sum = node_sum(hash, &sum, sibling);
        height += 1;
    }

    // Anything left joins from the left.
    while height < proof_elements.len() {
        sum = node_sum(hash, &proof_elements[height], &sum);
        height += 1;
    }

    sum == root
}

fn check_chunk_size(modulus: &BigUint, chunk_size: usize) -> Result<usize, CommitmentError> {
    let field_width = modulus.to_bytes_be().len();
    if chunk_size == 0 || chunk_size > field_width {
        return Err(CommitmentError::ChunkWiderThanField {
            chunk_size,
            field_width,
        });
    }
    Ok(field_width)
}

/// Slice the payload into `leaf_count` chunks, each left-padded with zero
/// bytes to the field width. Slots past the payload become all-zero leaves.
fn chunk_leaves(
    payload: &[u8],
    chunk_size: usize,
    field_width: usize,
    leaf_count: usize,
) -> Vec<Vec<u8>> {
    (0..leaf_count)
        .map(|i| {
            let mut leaf = vec![0u8; field_width];
            let start = i * chunk_size;
            if start < payload.len() {
                let end = (start + chunk_size).min(payload.len());
                let chunk = &payload[start..end];
                leaf[field_width - chunk.len()..].copy_from_slice(chunk);
            }
            leaf
        })
        .collect()
}

fn build_commitment(
    leaves: &[Vec<u8>],
    hash: &dyn HashFunction,
    proof_index: u64,
) -> Result<MerkleCommitment, CommitmentError> {
    let leaf_count = leaves.len() as u64;
    if proof_index >= leaf_count {
        return Err(CommitmentError::ProofIndexOutOfRange {
            index: proof_index,
            leaf_count,
        });
    }

    let root = subtree_root(leaves, hash);
    let mut proof_elements = Vec::new();
    collect_proof(leaves, proof_index as usize, hash, &mut proof_elements);
    let leaf_chunk = leaves[proof_index as usize].clone();

    // A commitment never leaves the builder with a proof that does not
    // verify against its own root.
    if !verify_proof(hash, &root, &proof_elements, proof_index, leaf_count) {
        return Err(CommitmentError::ProofVerification);
    }

    Ok(MerkleCommitment {
        root,
        proof_elements,
        leaf_chunk,
        leaf_count,
        proof_index,
    })
}

/// Root of a leaf range. Ranges that are not a power of two split at the
/// largest power of two below their length.
fn subtree_root(leaves: &[Vec<u8>], hash: &dyn HashFunction) -> Vec<u8> {
    match leaves.len() {
        1 => hash.hash(&leaves[0]),
        n => {
            let split = previous_power_of_two(n);
            let left = subtree_root(&leaves[..split], hash);
            let right = subtree_root(&leaves[split..], hash);
            node_sum(hash, &left, &right)
        }
    }
}

/// Collect the proof for `index`: the leaf data first, then sibling roots
/// bottom-up.
fn collect_proof(leaves: &[Vec<u8>], index: usize, hash: &dyn HashFunction, out: &mut Vec<Vec<u8>>) {
    if leaves.len() == 1 {
        out.push(leaves[0].clone());
        return;
    }
    let split = previous_power_of_two(leaves.len());
    if index < split {
        collect_proof(&leaves[..split], index, hash, out);
        out.push(subtree_root(&leaves[split..], hash));
    } else {
        collect_proof(&leaves[split..], index - split, hash, out);
        out.push(subtree_root(&leaves[..split], hash));
    }
}

fn node_sum(hash: &dyn HashFunction, left: &[u8], right: &[u8]) -> Vec<u8> {
    let mut joined = Vec::with_capacity(left.len() + right.len());
    joined.extend_from_slice(left);
    joined.extend_from_slice(right);
    hash.hash(&joined)
}

/// Largest power of two strictly below `n`. Caller guarantees `n >= 2`.
fn previous_power_of_two(n: usize) -> usize {
    1 << (usize::BITS - 1 - (n - 1).leading_zeros())
}

#[cfg(test)]
mod tests;
