use crate::error::{EncboxError, Result};

/// zstd compression level for chunk payloads.
const LEVEL: i32 = 3;

/// Compress one plaintext chunk on its own.
///
/// Chunks are compressed independently, not stream-wide, so very small or
/// incompressible chunks may expand. That is accepted; the frame codec
/// rejects payloads that outgrow the length prefix.
pub fn compress(chunk: &[u8]) -> Result<Vec<u8>> {
    zstd::encode_all(chunk, LEVEL)
        .map_err(|e| EncboxError::Corruption(format!("zstd compress: {}", e)))
}

/// Decompress one chunk payload.
///
/// The encoder only frames non-empty plaintext chunks, so a payload that
/// fails to decompress or recovers no bytes signals container corruption.
pub fn decompress(payload: &[u8]) -> Result<Vec<u8>> {
    let plain = zstd::decode_all(payload)
        .map_err(|e| EncboxError::Corruption(format!("zstd decompress: {}", e)))?;
    if plain.is_empty() {
        return Err(EncboxError::Corruption(
            "decompression recovered no bytes".into(),
        ));
    }
    Ok(plain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let data = b"Hello, World! This is a test of compression.";
        let compressed = compress(data).unwrap();
        let restored = decompress(&compressed).unwrap();
        assert_eq!(data.as_slice(), restored);
    }

    #[test]
    fn test_small_chunk_may_expand() {
        let data = [0xFFu8; 3];
        let compressed = compress(&data).unwrap();
        // Expansion is accepted, not an error
        assert!(compressed.len() >= data.len());
        assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn test_garbage_payload_is_corruption() {
        let err = decompress(&[0xDE, 0xAD, 0xBE, 0xEF]).unwrap_err();
        assert!(matches!(err, EncboxError::Corruption(_)));
    }

    #[test]
    fn test_empty_recovery_is_corruption() {
        // A frame that decompresses to nothing never comes from the encoder
        let empty_frame = compress(b"").unwrap();
        let err = decompress(&empty_frame).unwrap_err();
        assert!(matches!(err, EncboxError::Corruption(_)));
    }

    #[test]
    fn test_full_chunk_roundtrip() {
        let data: Vec<u8> = (0..1024).map(|i| (i % 251) as u8).collect();
        let compressed = compress(&data).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), data);
    }
}
