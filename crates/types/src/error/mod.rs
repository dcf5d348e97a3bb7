// Path: crates/types/src/error/mod.rs
//! Core error types for the Meridian SDK.

use thiserror::Error;

/// Errors related to cryptographic keys and signing operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A signing operation was attempted before a private key was set.
    #[error("private key is not set")]
    PrivateKeyNotSet,
    /// A verification was attempted before a public key was set.
    #[error("public key is not set")]
    PublicKeyNotSet,
    /// A key was already set and cannot be overwritten.
    #[error("{0} key is already set")]
    KeyAlreadySet(&'static str),
    /// Key or signature material had the wrong length.
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// The number of bytes the operation requires.
        expected: usize,
        /// The number of bytes that were provided.
        got: usize,
    },
    /// A hex string could not be decoded.
    #[error("unable to decode hex input: {0}")]
    InvalidHex(String),
    /// Key or point material failed to deserialize.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
    /// The named key type is not one of the supported algorithms.
    #[error("unknown key type: {0}")]
    UnknownKeyType(String),
    /// A backend cryptographic operation failed.
    #[error("crypto operation failed: {0}")]
    OperationFailed(String),
}

/// Errors produced by the payload commitment builder.
#[derive(Debug, Error)]
pub enum CommitmentError {
    /// The payload exceeds the hard-bound tree capacity. Caller-correctable.
    #[error("payload is too large: max size is {max} bytes, got {got} bytes")]
    PayloadTooLarge {
        /// The maximum payload size for the configured chunk size and depth.
        max: usize,
        /// The size of the payload that was submitted.
        got: usize,
    },
    /// The chunk size does not fit inside a single field element.
    #[error("chunk size {chunk_size} exceeds the field element width {field_width}")]
    ChunkWiderThanField {
        /// The configured chunk size in bytes.
        chunk_size: usize,
        /// The byte width of the scalar field modulus.
        field_width: usize,
    },
    /// The requested proof index does not address a leaf of the tree.
    #[error("proof index {index} out of range for {leaf_count} leaves")]
    ProofIndexOutOfRange {
        /// The requested leaf index.
        index: u64,
        /// The number of leaves in the tree.
        leaf_count: u64,
    },
    /// The built tree does not have the expected number of leaves.
    /// Indicates a logic defect, not bad caller input.
    #[error("unexpected leaf count: expected {expected}, got {got}")]
    LeafCountMismatch {
        /// The leaf count the configuration requires.
        expected: u64,
        /// The leaf count the tree actually produced.
        got: u64,
    },
    /// A freshly built inclusion proof failed self-verification.
    /// Fatal: the builder or the hash function is broken.
    #[error("freshly built inclusion proof failed verification")]
    ProofVerification,
}

/// Errors produced by the typed binary codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The buffer ended before a complete value could be read.
    #[error("buffer too short at offset {offset}: need {need} bytes, have {have}")]
    Truncated {
        /// Offset at which the read was attempted.
        offset: usize,
        /// Number of bytes the value requires.
        need: usize,
        /// Number of bytes remaining in the buffer.
        have: usize,
    },
    /// The declared length of a fixed-size or terminal value is wrong.
    #[error("{kind} length mismatch at offset {offset}: declared {declared}, actual {actual}")]
    LengthMismatch {
        /// Name of the value kind being decoded.
        kind: &'static str,
        /// Offset of the value header.
        offset: usize,
        /// The length declared in the header.
        declared: usize,
        /// The length implied by the buffer.
        actual: usize,
    },
    /// The type tag is not one of the supported kinds.
    #[error("unknown type tag {tag} at offset {offset}")]
    UnknownTag {
        /// The unrecognized tag byte.
        tag: u8,
        /// Offset of the tag byte.
        offset: usize,
    },
    /// A string body was not valid UTF-8.
    #[error("string body at offset {offset} is not valid UTF-8")]
    InvalidUtf8 {
        /// Offset of the string header.
        offset: usize,
    },
    /// A map key decoded to something other than a string.
    #[error("map key must be a string, found tag {tag} at offset {offset}")]
    NonStringKey {
        /// The tag byte found where a string key was expected.
        tag: u8,
        /// Offset of the offending key.
        offset: usize,
    },
}

/// Errors related to building and submitting transactions.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// A transaction status string could not be parsed.
    #[error("invalid transaction status, {0}")]
    InvalidStatus(String),
    /// A transaction kind string could not be parsed.
    #[error("invalid transaction type, {0}")]
    InvalidKind(String),
    /// A transaction outcome string could not be parsed.
    #[error("invalid transaction output, {0}")]
    InvalidOutcome(String),
    /// Building the payload commitment failed.
    #[error("commitment error: {0}")]
    Commitment(#[from] CommitmentError),
    /// A signing or verification operation failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
    /// (De)serializing a transaction or node response failed.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The HTTP transport to the node failed.
    #[error("transport error: {0}")]
    Transport(String),
    /// The node answered with an unexpected status code.
    #[error("node returned unexpected status code {status}: {message}")]
    NodeStatus {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, for diagnosis.
        message: String,
    },
    /// The node exposes no blockchains to submit to.
    #[error("no chains found for the node")]
    NoChains,
}

/// Errors related to wallet generation and persistence.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The mnemonic phrase is not valid BIP-39.
    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),
    /// The requested entropy size is unsupported.
    #[error("entropy size must be a multiple of 32 between 128 and 256 bits, got {0}")]
    InvalidEntropy(usize),
    /// A key operation failed while building the wallet.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
    /// Reading or writing the wallet file failed.
    #[error("wallet file error: {0}")]
    Io(#[from] std::io::Error),
    /// The wallet file contents could not be parsed.
    #[error("failed to parse wallet data: {0}")]
    Malformed(String),
}
