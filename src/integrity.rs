use sha2::{Digest, Sha256};

/// Size of the trailer digest in bytes.
pub const TRAILER_LEN: usize = 32;

/// Running hash over the transfer, finalized once as the container's
/// integrity trailer.
///
/// The hash is seeded with the passphrase, then fed each plaintext chunk
/// followed by the frame bytes (length prefix and payload) that carry it,
/// in stream order. Covering the frames as written means any modification
/// of the container body changes the digest, including bits of compressor
/// metadata that would otherwise decompress to unchanged plaintext.
///
/// The trailer is still a prefix-hash keyed only by absorption order: it
/// detects corruption and casual tampering, not a capable adversary.
/// Upgrading it to a real authenticator would change the on-disk format.
pub struct RunningHash {
    hasher: Sha256,
}

impl RunningHash {
    /// Start a new running hash, seeded with the passphrase.
    pub fn new(passphrase: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(passphrase);
        Self { hasher }
    }

    /// Fold one plaintext chunk into the hash. Chunks must arrive in
    /// stream order with no gaps or overlaps.
    pub fn absorb(&mut self, plaintext: &[u8]) {
        self.hasher.update(plaintext);
    }

    /// Fold one frame into the hash, exactly as it appears on disk: the
    /// big-endian length prefix, then the payload. Called once per chunk,
    /// after `absorb`, on both encode and decode.
    pub fn absorb_frame(&mut self, payload: &[u8]) {
        self.hasher.update((payload.len() as u16).to_be_bytes());
        self.hasher.update(payload);
    }

    /// Finalize into the trailer digest. Consumes the hash; it is
    /// finalized exactly once per stream.
    pub fn finalize(self) -> [u8; TRAILER_LEN] {
        self.hasher.finalize().into()
    }

    /// Finalize and compare byte-for-byte against a trailer read from a
    /// container.
    pub fn matches(self, trailer: &[u8; TRAILER_LEN]) -> bool {
        self.finalize() == *trailer
    }
}
