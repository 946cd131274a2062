use crate::error::{EncboxError, Result};
use crate::header::read_exact_or_truncated;
use std::io::{Read, Write};

/// Size of the length prefix in bytes (big-endian u16).
pub const PREFIX_LEN: usize = 2;

/// Largest payload a frame can carry.
pub const MAX_PAYLOAD: usize = u16::MAX as usize;

/// Write one frame: 2-byte big-endian length prefix, then the payload.
///
/// Compression can expand incompressible chunks, so a payload that no
/// longer fits the prefix is rejected here rather than truncated.
pub fn write_frame<W: Write>(out: &mut W, payload: &[u8]) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(EncboxError::ChunkTooLarge(payload.len()));
    }
    out.write_all(&(payload.len() as u16).to_be_bytes())
        .map_err(EncboxError::Write)?;
    out.write_all(payload).map_err(EncboxError::Write)?;
    Ok(())
}

/// Read one frame: the prefix, then exactly that many payload bytes.
/// A short read at either step means the container was truncated.
pub fn read_frame<R: Read>(input: &mut R) -> Result<Vec<u8>> {
    let mut prefix = [0u8; PREFIX_LEN];
    read_exact_or_truncated(input, &mut prefix, "frame length prefix")?;
    let len = u16::from_be_bytes(prefix) as usize;

    let mut payload = vec![0u8; len];
    read_exact_or_truncated(input, &mut payload, "frame payload")?;
    Ok(payload)
}

/// On-disk size of a frame carrying `payload_len` bytes.
pub fn framed_len(payload_len: usize) -> usize {
    PREFIX_LEN + payload_len
}
