use crate::error::{EncboxError, Result};
use rand::RngCore;
use std::io::{Read, Write};

/// Salt size in bytes. The salt seeds the stream cipher keystream.
pub const SALT_LEN: usize = 1024;

/// Initialization vector size in bytes. The iv seeds the block cipher
/// counter state.
pub const IV_LEN: usize = 16;

/// Total header size: salt followed by iv, uncompressed and unencrypted.
pub const HEADER_LEN: usize = SALT_LEN + IV_LEN;

/// Container header: the first `HEADER_LEN` bytes of every container.
/// Layout: [salt: 1024][iv: 16], both raw random bytes.
#[derive(Clone, Debug)]
pub struct Header {
    pub salt: [u8; SALT_LEN],
    pub iv: [u8; IV_LEN],
}

impl Header {
    /// Generate a fresh header from the process CSPRNG.
    /// Salts are freshly randomized per call, independent of the key.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        rng.fill_bytes(&mut salt);
        rng.fill_bytes(&mut iv);
        Self { salt, iv }
    }

    /// Write salt then iv as the first bytes of the container.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(&self.salt).map_err(EncboxError::Write)?;
        out.write_all(&self.iv).map_err(EncboxError::Write)?;
        Ok(())
    }

    /// Read both fixed-size fields, in order, before any chunk processing.
    pub fn read_from<R: Read>(input: &mut R) -> Result<Self> {
        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        read_exact_or_truncated(input, &mut salt, "header salt")?;
        read_exact_or_truncated(input, &mut iv, "header iv")?;
        Ok(Self { salt, iv })
    }
}

/// `read_exact` with short reads reported as container truncation.
pub(crate) fn read_exact_or_truncated<R: Read>(
    input: &mut R,
    buf: &mut [u8],
    at: &'static str,
) -> Result<()> {
    input.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            EncboxError::TruncatedStream(at)
        } else {
            EncboxError::Io(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_roundtrip() {
        let header = Header::generate();
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_LEN);

        let restored = Header::read_from(&mut buf.as_slice()).unwrap();
        assert_eq!(restored.salt, header.salt);
        assert_eq!(restored.iv, header.iv);
    }

    #[test]
    fn test_generate_is_randomized() {
        let a = Header::generate();
        let b = Header::generate();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.iv, b.iv);
    }

    #[test]
    fn test_short_header_is_truncation() {
        let bytes = vec![0u8; HEADER_LEN - 1];
        let err = Header::read_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, EncboxError::TruncatedStream(_)));
    }
}
