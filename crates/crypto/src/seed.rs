// Path: crates/crypto/src/seed.rs
//! Deterministic seed expansion for key derivation.
//!
//! Every signing scheme derives its key material by reading from a
//! [`DeterministicSeedReader`], so one seed (and therefore one mnemonic)
//! always reproduces one wallet, for every algorithm.

use crate::error::CryptoError;
use pbkdf2::pbkdf2_hmac;
use rand_core::{CryptoRng, RngCore};
use sha1::Sha1;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Salt used when no caller-specific salt is supplied.
pub const DEFAULT_SALT: &[u8] = b"meridian-deterministic-reader";

const PBKDF2_ROUNDS: u32 = 4096;
const EXPANDED_LEN: usize = 64;

/// A finite, deterministic byte stream expanded from a seed with
/// PBKDF2-HMAC-SHA1. The stream is 64 bytes long, which covers the largest
/// single draw any supported scheme makes; reading past the end is an error.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DeterministicSeedReader {
    data: Vec<u8>,
    #[zeroize(skip)]
    offset: usize,
}

impl DeterministicSeedReader {
    /// Expand `seed` with the given salt.
    pub fn new(seed: &[u8], salt: &[u8]) -> Self {
        let mut data = vec![0u8; EXPANDED_LEN];
        pbkdf2_hmac::<Sha1>(seed, salt, PBKDF2_ROUNDS, &mut data);
        Self { data, offset: 0 }
    }

    /// Wrap raw bytes without expansion. Used when the caller already holds
    /// uniformly distributed material.
    pub fn from_raw(data: Vec<u8>) -> Self {
        Self { data, offset: 0 }
    }

    /// Number of unread bytes left in the stream.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Read exactly `n` bytes from the stream.
    pub fn take(&mut self, n: usize) -> Result<Vec<u8>, CryptoError> {
        if self.remaining() < n {
            return Err(CryptoError::OperationFailed(format!(
                "seed stream exhausted: need {n} bytes, {} remain",
                self.remaining()
            )));
        }
        let out = self.data[self.offset..self.offset + n].to_vec();
        self.offset += n;
        Ok(out)
    }
}

// Key generators that expect an RNG (ML-DSA) draw from the same stream.
// The stream is long enough for every draw those generators make; the
// panic below guards the invariant rather than user input.
impl RngCore for DeterministicSeedReader {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.try_fill_bytes(dest)
            .expect("deterministic seed stream exhausted");
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        let bytes = self
            .take(dest.len())
            .map_err(|e| rand_core::Error::new(e.to_string()))?;
        dest.copy_from_slice(&bytes);
        Ok(())
    }
}

impl CryptoRng for DeterministicSeedReader {}
