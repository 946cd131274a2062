use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncboxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("output file {0} already exists")]
    OutputExists(PathBuf),

    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("truncated container: short read at {0}")]
    TruncatedStream(&'static str),

    #[error("write failed: {0}")]
    Write(std::io::Error),

    #[error("chunk payload of {0} bytes exceeds the 65535-byte frame limit")]
    ChunkTooLarge(usize),

    #[error("corrupted container: {0}")]
    Corruption(String),

    #[error("integrity check failed: trailer digest does not match stream contents")]
    Integrity,

    #[error("cleanup failed: cannot remove {path}: {source}")]
    Cleanup {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid file name: {0}")]
    BadName(String),
}

pub type Result<T> = std::result::Result<T, EncboxError>;
