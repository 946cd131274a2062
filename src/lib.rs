//! Encbox - compressed, layered-cipher single-file encryption container
//!
//! Encodes one file into a self-contained `.enc` container that is
//! compressed, encrypted with two independent cipher layers, and
//! integrity-checked, then atomically replaces the original. Decoding is
//! the exact inverse and all-or-nothing: output only survives a verified
//! trailer.
//!
//! ## Container layout
//!
//! ```text
//! [salt: 1024][iv: 16]{[len: u16 BE][payload: len]}*[sha256 trailer: 32]
//! ```
//!
//! ## Transform pipeline (per chunk)
//!
//! ```text
//! Encode: plaintext → zstd → ring stream cipher → AES-256-CTR → frame
//! Decode: frame → AES-256-CTR → ring stream cipher → zstd → plaintext
//! ```
//!
//! Both cipher layers carry state across chunks, so chunks are processed
//! strictly in stream order by a single-threaded controller. The running
//! hash is seeded with the passphrase and folded over every plaintext
//! chunk and every frame as written; the finalized digest is the
//! container trailer, so any single-bit change to the container body
//! fails decoding.
//!
//! ## Example
//!
//! ```no_run
//! use encbox::transfer::{decode_file, encode_file};
//! use std::path::Path;
//!
//! let mut progress = |_treated: u64, _total: u64| {};
//!
//! // input.txt becomes input.txt.enc; the original is removed
//! let container = encode_file(Path::new("input.txt"), b"passphrase", &mut progress).unwrap();
//!
//! // and back again
//! decode_file(&container, b"passphrase", &mut progress).unwrap();
//! ```

pub mod error;
pub mod frame;
pub mod header;
pub mod integrity;
pub mod kdf;
pub mod pipeline;
pub mod transfer;

pub use error::{EncboxError, Result};
pub use header::Header;
pub use transfer::{decode_file, encode_file};
