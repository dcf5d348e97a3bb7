// Path: crates/commitment/src/lib.rs
//! # Meridian SDK Payload Commitments
//!
//! Turns an arbitrary-length payload into a fixed-size Merkle root shaped
//! for the scalar field of the active signature algorithm, together with a
//! self-verified inclusion proof for one designated chunk.

pub mod merkle;

pub use merkle::{commit_bounded, commit_exact, verify_proof, MerkleCommitment};
