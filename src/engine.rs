// Dispatch layer: ties options and lookup tables to a binding.
//
// Provides the high-level encode/decode APIs that:
//   - Size the target (source length for decode, worst case for encode)
//   - Pick the literal table for the requested mode
//   - Invoke the selected binding
//   - Reject an out-of-bounds written length and trim the result

use log::debug;

use crate::binding::BindingChoice;
use crate::codec::{
    self, CodecError, TABLE_DECODING, TABLE_ENCODING, TABLE_LEGAL, TABLE_LITERALS,
    TABLE_LITERALS_RESTRICTED,
};

// ---------------------------------------------------------------------------
// Codec options
// ---------------------------------------------------------------------------

/// Per-call configuration.
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    /// Use the RFC 2047 "Q" variant: no line wrapping, alphanumeric literals
    /// only, and `_` decodes to SPACE.
    pub q_encoding: bool,
    /// Which implementation performs the work.
    pub binding: BindingChoice,
}

impl CodecOptions {
    /// Options for RFC 2047 header words.
    pub fn q_encoding() -> Self {
        Self {
            q_encoding: true,
            ..Default::default()
        }
    }
}

/// Worst-case encoded size for `source_len` input bytes.
///
/// See [`codec::encode_target_length`].
pub fn encode_target_length(source_len: usize) -> Result<usize, CodecError> {
    codec::encode_target_length(source_len)
}

// ---------------------------------------------------------------------------
// High-level encode
// ---------------------------------------------------------------------------

/// Encode `source` as standard Quoted-Printable.
pub fn encode(source: &[u8]) -> Result<Vec<u8>, CodecError> {
    encode_with_options(source, &CodecOptions::default())
}

/// Encode with custom options.
pub fn encode_with_options(source: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
    let binding = opts.binding.binding();
    let mut target = vec![0u8; encode_target_length(source.len())?];
    let literals: &[u8] = if opts.q_encoding {
        &TABLE_LITERALS_RESTRICTED
    } else {
        &TABLE_LITERALS
    };

    let written = binding.encode(source, &mut target, opts.q_encoding, &TABLE_ENCODING, literals)?;
    if written > target.len() {
        return Err(CodecError::Overflow("target"));
    }
    debug!(
        "encode: binding={} q_encoding={} source={} target={written}/{}",
        binding.name(),
        opts.q_encoding,
        source.len(),
        target.len()
    );
    target.truncate(written);
    Ok(target)
}

// ---------------------------------------------------------------------------
// High-level decode
// ---------------------------------------------------------------------------

/// Decode standard Quoted-Printable.
pub fn decode(source: &[u8]) -> Result<Vec<u8>, CodecError> {
    decode_with_options(source, &CodecOptions::default())
}

/// Decode with custom options.
pub fn decode_with_options(source: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
    let binding = opts.binding.binding();
    let mut target = vec![0u8; source.len()];

    let written = binding.decode(source, &mut target, opts.q_encoding, &TABLE_DECODING, &TABLE_LEGAL)?;
    if written > target.len() {
        return Err(CodecError::Overflow("target"));
    }
    debug!(
        "decode: binding={} q_encoding={} source={} target={written}",
        binding.name(),
        opts.q_encoding,
        source.len()
    );
    target.truncate(written);
    Ok(target)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
