use crate::header::SALT_LEN;
use crate::kdf::KeyMaterial;
use sha2::{Digest, Sha256};

/// Bytes processed between keystream state permutations.
pub const MUTATION_INTERVAL: usize = 16;

/// Keystream state size (one SHA-256 digest).
const STATE_LEN: usize = 32;

/// Keyed mutating stream cipher.
///
/// Keyed and salted once per file. The keystream state starts as
/// `sha256(key || salt)` and is re-permuted as `sha256(state || counter)`
/// after every `MUTATION_INTERVAL` processed bytes, increasing diffusion
/// over long streams. The transform is XOR, so encode and decode are the
/// same operation driven over chunks in stream order.
pub struct RingCipher {
    state: [u8; STATE_LEN],
    /// Bytes processed since the last mutation.
    since_mutation: usize,
    /// Total mutations performed, absorbed into each permutation.
    mutations: u64,
}

impl RingCipher {
    pub fn new(key: &KeyMaterial, salt: &[u8; SALT_LEN]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        hasher.update(salt);
        Self {
            state: hasher.finalize().into(),
            since_mutation: 0,
            mutations: 0,
        }
    }

    /// XOR the keystream over `buf` in place. State carries across calls,
    /// so chunks must be driven in the exact order they appear in the
    /// stream.
    pub fn apply(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            *byte ^= self.state[self.since_mutation];
            self.since_mutation += 1;
            if self.since_mutation == MUTATION_INTERVAL {
                self.mutate();
            }
        }
    }

    pub fn encode(&mut self, buf: &mut [u8]) {
        self.apply(buf);
    }

    pub fn decode(&mut self, buf: &mut [u8]) {
        self.apply(buf);
    }

    fn mutate(&mut self) {
        let mut hasher = Sha256::new();
        hasher.update(self.state);
        hasher.update(self.mutations.to_be_bytes());
        self.state = hasher.finalize().into();
        self.mutations += 1;
        self.since_mutation = 0;
    }
}
