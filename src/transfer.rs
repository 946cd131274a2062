//! Transfer controller: drives one file transform end to end.
//!
//! `START -> HEADER -> STREAMING -> TRAILER -> {COMMIT | ABORT}`. The
//! controller owns all buffers and both cipher states for the duration of
//! one transform; nothing is shared across files. Any error transitions
//! straight to abort: the partial output is deleted and the input is left
//! untouched. Only a fully verified transform commits, and committing
//! removes the original input, leaving the container as the sole surviving
//! representation of the data.

use crate::error::{EncboxError, Result};
use crate::frame::{framed_len, read_frame, write_frame};
use crate::header::{read_exact_or_truncated, Header, HEADER_LEN};
use crate::integrity::{RunningHash, TRAILER_LEN};
use crate::kdf::derive_keys;
use crate::pipeline::ChunkPipeline;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to the input filename on encode and stripped on decode.
pub const SUFFIX: &str = ".enc";

/// Plaintext bytes read per chunk.
pub const CHUNK_LEN: usize = 1024;

/// Progress callback: (bytes treated, bytes total), invoked once per chunk.
pub type Progress<'a> = &'a mut dyn FnMut(u64, u64);

/// Output path for encoding `input_path`: the same name with `SUFFIX`
/// appended.
pub fn encoded_output_path(input_path: &Path) -> PathBuf {
    let mut os = input_path.as_os_str().to_os_string();
    os.push(SUFFIX);
    PathBuf::from(os)
}

/// Output path for decoding `input_path`: the same name with the suffix
/// length stripped. Fails if the name is too short to strip.
pub fn decoded_output_path(input_path: &Path) -> Result<PathBuf> {
    strip_suffix_len(input_path.as_os_str()).ok_or_else(|| {
        EncboxError::BadName(format!(
            "{} is too short to strip the {} suffix",
            input_path.display(),
            SUFFIX
        ))
    })
}

/// Strip the suffix length from the raw filename bytes. Names need not be
/// valid UTF-8 on Unix.
#[cfg(unix)]
fn strip_suffix_len(name: &std::ffi::OsStr) -> Option<PathBuf> {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};
    let bytes = name.as_bytes();
    if bytes.len() <= SUFFIX.len() {
        return None;
    }
    let stripped = bytes[..bytes.len() - SUFFIX.len()].to_vec();
    Some(PathBuf::from(std::ffi::OsString::from_vec(stripped)))
}

#[cfg(not(unix))]
fn strip_suffix_len(name: &std::ffi::OsStr) -> Option<PathBuf> {
    let s = name.to_str()?;
    if s.len() <= SUFFIX.len() {
        return None;
    }
    Some(PathBuf::from(&s[..s.len() - SUFFIX.len()]))
}

/// Encode `input_path` into a `.enc` container, consuming the input on
/// success. Returns the container path.
pub fn encode_file(
    input_path: &Path,
    passphrase: &[u8],
    progress: Progress<'_>,
) -> Result<PathBuf> {
    let output_path = encoded_output_path(input_path);

    let mut input = open_input(input_path)?;
    let total = input.metadata()?.len();
    let output = create_output(&output_path)?;

    let result = encode_stream(&mut input, output, passphrase, total, progress);
    drop(input);
    finish(result, input_path, output_path)
}

/// Decode a `.enc` container at `input_path` back into the original file,
/// consuming the container on success. Returns the restored path.
pub fn decode_file(
    input_path: &Path,
    passphrase: &[u8],
    progress: Progress<'_>,
) -> Result<PathBuf> {
    let output_path = decoded_output_path(input_path)?;

    let input = open_input(input_path)?;
    let container_len = input.metadata()?.len();
    let output = create_output(&output_path)?;

    let result = decode_stream(input, output, passphrase, container_len, progress);
    finish(result, input_path, output_path)
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| EncboxError::Open {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Create the output file, refusing to clobber. `create_new` makes the
/// existence check and the creation one atomic step.
fn create_output(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                EncboxError::OutputExists(path.to_path_buf())
            } else {
                EncboxError::Open {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })
}

/// Commit or abort. On commit the input is removed; on abort the partial
/// output is removed. A removal that fails is itself a reportable failure,
/// since it leaves the filesystem inconsistent.
fn finish(result: Result<()>, input_path: &Path, output_path: PathBuf) -> Result<PathBuf> {
    match result {
        Ok(()) => {
            fs::remove_file(input_path).map_err(|e| EncboxError::Cleanup {
                path: input_path.to_path_buf(),
                source: e,
            })?;
            Ok(output_path)
        }
        Err(err) => match fs::remove_file(&output_path) {
            Ok(()) => Err(err),
            Err(e) => Err(EncboxError::Cleanup {
                path: output_path,
                source: e,
            }),
        },
    }
}

fn encode_stream<R: Read, W: Write>(
    input: &mut R,
    output: W,
    passphrase: &[u8],
    total: u64,
    progress: Progress<'_>,
) -> Result<()> {
    let mut out = BufWriter::new(output);

    // HEADER: fresh salt and iv seed the cipher states
    let header = Header::generate();
    header.write_to(&mut out)?;
    let key = derive_keys(passphrase);
    let mut pipeline = ChunkPipeline::new(&key, &header);
    let mut hash = RunningHash::new(passphrase);

    // STREAMING: plaintext is hashed before it is transformed
    let mut buf = [0u8; CHUNK_LEN];
    let mut treated = 0u64;
    loop {
        let n = input.read(&mut buf)?;
        if n == 0 {
            break;
        }
        let chunk = &buf[..n];
        hash.absorb(chunk);
        let payload = pipeline.encode_chunk(chunk)?;
        hash.absorb_frame(&payload);
        write_frame(&mut out, &payload)?;
        treated += n as u64;
        progress(treated, total);
    }

    // TRAILER
    out.write_all(&hash.finalize()).map_err(EncboxError::Write)?;
    out.flush().map_err(EncboxError::Write)?;
    Ok(())
}

fn decode_stream<R: Read, W: Write>(
    input: R,
    output: W,
    passphrase: &[u8],
    container_len: u64,
    progress: Progress<'_>,
) -> Result<()> {
    if container_len < (HEADER_LEN + TRAILER_LEN) as u64 {
        return Err(EncboxError::TruncatedStream("container header"));
    }
    let mut input = BufReader::new(input);
    let mut out = BufWriter::new(output);

    // HEADER
    let header = Header::read_from(&mut input)?;
    let key = derive_keys(passphrase);
    let mut pipeline = ChunkPipeline::new(&key, &header);
    let mut hash = RunningHash::new(passphrase);

    // STREAMING: everything between header and trailer is framed chunks
    let chunk_total = container_len - (HEADER_LEN + TRAILER_LEN) as u64;
    let mut consumed = 0u64;
    while consumed < chunk_total {
        let payload = read_frame(&mut input)?;
        consumed += framed_len(payload.len()) as u64;
        if consumed > chunk_total {
            return Err(EncboxError::Corruption(
                "frame overruns the integrity trailer".into(),
            ));
        }
        let plaintext = pipeline.decode_chunk(&payload)?;
        hash.absorb(&plaintext);
        hash.absorb_frame(&payload);
        out.write_all(&plaintext).map_err(EncboxError::Write)?;
        progress(consumed, chunk_total);
    }

    // TRAILER: all-or-nothing, a mismatch discards the whole output
    let mut trailer = [0u8; TRAILER_LEN];
    read_exact_or_truncated(&mut input, &mut trailer, "integrity trailer")?;
    if !hash.matches(&trailer) {
        return Err(EncboxError::Integrity);
    }

    out.flush().map_err(EncboxError::Write)?;
    Ok(())
}
