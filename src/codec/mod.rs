// Quoted-Printable engines (RFC 2045, with the RFC 2047 "Q" variant).
//
// # Modules
//
// - `tables` : Compile-time lookup tables shared by both engines
// - `decoder`: Single-pass decoder: escapes, soft breaks, transport padding
// - `encoder`: Single-pass encoder: literals, symbols, line wrapping
// - `error`  : `CodecError`
//
// Both engines write into a caller-allocated target and return the number of
// bytes written. They never grow the target; the dispatch layer in
// `crate::engine` sizes it up front.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod tables;

pub use decoder::decode;
pub use encoder::{encode, encode_target_length};
pub use error::CodecError;
pub use tables::{
    TABLE_DECODING, TABLE_ENCODING, TABLE_LEGAL, TABLE_LITERALS, TABLE_LITERALS_RESTRICTED,
};

pub(crate) const TAB: u8 = b'\t';
pub(crate) const LF: u8 = b'\n';
pub(crate) const CR: u8 = b'\r';
pub(crate) const SPACE: u8 = b' ';
pub(crate) const EQUALS: u8 = b'=';
pub(crate) const UNDERSCORE: u8 = b'_';

/// Maximum encoded line length, excluding the CRLF terminator.
pub const MAX_LINE_LENGTH: usize = 76;

#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    b == TAB || b == SPACE
}

// ---------------------------------------------------------------------------
// Bounded target cursor
// ---------------------------------------------------------------------------

/// Write cursor over a fixed-capacity target.
///
/// Every write is bounds-checked and reports `CodecError::Overflow` instead of
/// panicking, so a sizing defect surfaces as an error.
pub(crate) struct TargetCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> TargetCursor<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    pub(crate) fn push(&mut self, byte: u8) -> Result<(), CodecError> {
        let slot = self
            .buf
            .get_mut(self.pos)
            .ok_or(CodecError::Overflow("target"))?;
        *slot = byte;
        self.pos += 1;
        Ok(())
    }

    #[inline]
    pub(crate) fn extend(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        let end = self.pos + bytes.len();
        let dst = self
            .buf
            .get_mut(self.pos..end)
            .ok_or(CodecError::Overflow("target"))?;
        dst.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    /// Last byte written, if any.
    #[inline]
    pub(crate) fn last(&self) -> Option<u8> {
        self.pos.checked_sub(1).map(|i| self.buf[i])
    }

    /// Drop the last written byte and return it.
    #[inline]
    pub(crate) fn pop(&mut self) -> Option<u8> {
        let byte = self.last()?;
        self.pos -= 1;
        Some(byte)
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }
}

pub(crate) fn check_table(name: &str, table: &[u8], expected: usize) -> Result<(), CodecError> {
    if table.len() != expected {
        return Err(CodecError::invalid(format!(
            "{name} must be {expected} bytes, got {}",
            table.len()
        )));
    }
    Ok(())
}
