use crate::header::IV_LEN;
use crate::kdf::KeyMaterial;
use aes::cipher::{KeyIvInit, StreamCipher};
use aes::Aes256;

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Outer cipher layer: AES-256 in CTR mode.
///
/// CTR keeps the transform length-preserving and carries its counter state
/// across chunks, so chunks must be processed in stream order. Keyed from
/// the same derived material as the stream cipher.
pub struct BlockCipher {
    inner: Aes256Ctr,
}

impl BlockCipher {
    pub fn new(key: &KeyMaterial, iv: &[u8; IV_LEN]) -> Self {
        Self {
            inner: Aes256Ctr::new(key.as_bytes().into(), iv.into()),
        }
    }

    /// Encrypt `buf` in place, advancing the counter state.
    pub fn encode(&mut self, buf: &mut [u8]) {
        self.inner.apply_keystream(buf);
    }

    /// Decrypt `buf` in place. CTR is its own inverse; the distinct name
    /// keeps the pipeline direction readable.
    pub fn decode(&mut self, buf: &mut [u8]) {
        self.inner.apply_keystream(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::derive_keys;

    fn cipher() -> BlockCipher {
        BlockCipher::new(&derive_keys(b"passphrase"), &[0x42u8; IV_LEN])
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let original: Vec<u8> = (0..1000).map(|i| (i * 7 % 256) as u8).collect();
        let mut buf = original.clone();

        cipher().encode(&mut buf);
        assert_ne!(buf, original);

        cipher().decode(&mut buf);
        assert_eq!(buf, original);
    }

    #[test]
    fn test_counter_state_carries_across_chunks() {
        let original = vec![0x33u8; 80];

        let mut whole = original.clone();
        cipher().encode(&mut whole);

        let mut pieces = original.clone();
        let mut c = cipher();
        let (a, b) = pieces.split_at_mut(21); // not block-aligned
        c.encode(a);
        c.encode(b);

        assert_eq!(whole, pieces);
    }

    #[test]
    fn test_iv_changes_ciphertext() {
        let key = derive_keys(b"passphrase");
        let mut a = vec![0u8; 32];
        let mut b = vec![0u8; 32];
        BlockCipher::new(&key, &[0x01u8; IV_LEN]).encode(&mut a);
        BlockCipher::new(&key, &[0x02u8; IV_LEN]).encode(&mut b);
        assert_ne!(a, b);
    }
}
