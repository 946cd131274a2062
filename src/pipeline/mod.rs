//! Per-chunk transform pipeline.
//!
//! Encode order: `compress -> ring -> block`. Decode runs the exact
//! inverse: `block -> ring -> decompress`. Both ciphers carry state across
//! chunks, so one pipeline instance must see the chunks of one file in
//! stream order and nothing else.

pub mod block;
pub mod compress;
pub mod ring;

use crate::error::Result;
use crate::header::Header;
use crate::kdf::KeyMaterial;

pub use block::BlockCipher;
pub use compress::{compress, decompress};
pub use ring::RingCipher;

/// Owned cipher state for one file transform. Constructed once from the
/// derived key and the container header, then threaded through the chunk
/// loop by the transfer controller.
pub struct ChunkPipeline {
    ring: RingCipher,
    block: BlockCipher,
}

impl ChunkPipeline {
    pub fn new(key: &KeyMaterial, header: &Header) -> Self {
        Self {
            ring: RingCipher::new(key, &header.salt),
            block: BlockCipher::new(key, &header.iv),
        }
    }

    /// Transform one plaintext chunk into a frame payload.
    pub fn encode_chunk(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut payload = compress(plaintext)?;
        self.ring.encode(&mut payload);
        self.block.encode(&mut payload);
        Ok(payload)
    }

    /// Transform one frame payload back into plaintext.
    pub fn decode_chunk(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        let mut buf = payload.to_vec();
        self.block.decode(&mut buf);
        self.ring.decode(&mut buf);
        decompress(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::derive_keys;

    fn pipeline_pair() -> (ChunkPipeline, ChunkPipeline) {
        let key = derive_keys(b"pipeline test key");
        let header = Header::generate();
        (
            ChunkPipeline::new(&key, &header),
            ChunkPipeline::new(&key, &header),
        )
    }

    #[test]
    fn test_chunk_roundtrip() {
        let (mut enc, mut dec) = pipeline_pair();
        let plaintext: Vec<u8> = (0..1024).map(|i| (i % 256) as u8).collect();

        let payload = enc.encode_chunk(&plaintext).unwrap();
        assert_ne!(payload, plaintext);

        let restored = dec.decode_chunk(&payload).unwrap();
        assert_eq!(restored, plaintext);
    }

    #[test]
    fn test_multi_chunk_order_dependence() {
        let (mut enc, mut dec) = pipeline_pair();
        let chunks: Vec<Vec<u8>> = (0..5u8).map(|i| vec![i; 700]).collect();

        let payloads: Vec<Vec<u8>> = chunks
            .iter()
            .map(|c| enc.encode_chunk(c).unwrap())
            .collect();

        for (payload, chunk) in payloads.into_iter().zip(&chunks) {
            assert_eq!(&dec.decode_chunk(&payload).unwrap(), chunk);
        }
    }

    #[test]
    fn test_reordered_chunks_do_not_decode() {
        let (mut enc, mut dec) = pipeline_pair();
        let first = vec![0x11u8; 512];
        let second = vec![0x22u8; 512];

        let p1 = enc.encode_chunk(&first).unwrap();
        let p2 = enc.encode_chunk(&second).unwrap();

        // Feeding the second payload first desynchronizes the stateful
        // ciphers; the result is garbage or a decompression failure
        match dec.decode_chunk(&p2) {
            Ok(bytes) => assert_ne!(bytes, second),
            Err(_) => {}
        }
        drop(p1);
    }

    #[test]
    fn test_wrong_key_does_not_decode() {
        let key = derive_keys(b"right key");
        let header = Header::generate();
        let mut enc = ChunkPipeline::new(&key, &header);
        let mut dec = ChunkPipeline::new(&derive_keys(b"wrong key"), &header);

        let payload = enc.encode_chunk(&[0x77u8; 256]).unwrap();
        match dec.decode_chunk(&payload) {
            Ok(bytes) => assert_ne!(bytes, vec![0x77u8; 256]),
            Err(_) => {}
        }
    }
}
