// File-level helpers for Quoted-Printable encoding/decoding.
//
// The codec is single-shot, so each helper reads its input fully into
// memory, makes one codec call, and writes the result through a `BufWriter`.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::codec::CodecError;
use crate::engine::{self, CodecOptions};

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `encode_file()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeStats {
    /// Input size in bytes.
    pub input_size: u64,
    /// Encoded output size in bytes.
    pub output_size: u64,
    /// Soft line breaks inserted by the encoder.
    pub soft_breaks: u64,
}

/// Statistics returned by `decode_file()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeStats {
    /// Encoded input size in bytes.
    pub input_size: u64,
    /// Decoded output size in bytes.
    pub output_size: u64,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// I/O error (file open, read, write).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Codec error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// Stream helpers
// ---------------------------------------------------------------------------

/// Read all of `reader`, encode it, and write the result to `writer`.
pub fn encode_stream<R: Read, W: Write>(
    mut reader: R,
    writer: W,
    opts: &CodecOptions,
) -> Result<EncodeStats, IoError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    let encoded = engine::encode_with_options(&input, opts)?;
    write_all_buffered(writer, &encoded)?;
    Ok(EncodeStats {
        input_size: input.len() as u64,
        output_size: encoded.len() as u64,
        soft_breaks: count_soft_breaks(&encoded),
    })
}

/// Read all of `reader`, decode it, and write the result to `writer`.
pub fn decode_stream<R: Read, W: Write>(
    mut reader: R,
    writer: W,
    opts: &CodecOptions,
) -> Result<DecodeStats, IoError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    let decoded = engine::decode_with_options(&input, opts)?;
    write_all_buffered(writer, &decoded)?;
    Ok(DecodeStats {
        input_size: input.len() as u64,
        output_size: decoded.len() as u64,
    })
}

// ---------------------------------------------------------------------------
// encode_file / decode_file
// ---------------------------------------------------------------------------

/// Encode the file at `input_path`, writing to `output_path`.
pub fn encode_file(
    input_path: &Path,
    output_path: &Path,
    opts: &CodecOptions,
) -> Result<EncodeStats, IoError> {
    let input = File::open(input_path)?;
    let output = File::create(output_path)?;
    encode_stream(input, output, opts)
}

/// Decode the file at `input_path`, writing to `output_path`.
pub fn decode_file(
    input_path: &Path,
    output_path: &Path,
    opts: &CodecOptions,
) -> Result<DecodeStats, IoError> {
    let input = File::open(input_path)?;
    let output = File::create(output_path)?;
    decode_stream(input, output, opts)
}

fn write_all_buffered<W: Write>(writer: W, data: &[u8]) -> io::Result<()> {
    let mut out = BufWriter::with_capacity(BUF_SIZE, writer);
    out.write_all(data)?;
    out.flush()
}

/// Count "=\r\n" sequences. Encoder output never contains a literal "="
/// so each one is a soft break.
fn count_soft_breaks(encoded: &[u8]) -> u64 {
    encoded.windows(3).filter(|w| *w == b"=\r\n").count() as u64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
