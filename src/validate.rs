// Encoded-output validation.
//
// Checks a buffer against the rules a conforming Quoted-Printable (or
// Q-encoded) body must satisfy. The encoder always produces output that
// passes; the check is for inspecting data from elsewhere.

use thiserror::Error;

use crate::codec::{CR, EQUALS, LF, MAX_LINE_LENGTH, is_whitespace};

/// The first rule an encoded buffer breaks, with the byte offset of the
/// offending byte (or of the start of the offending line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("control character {byte:#04x} at offset {offset}")]
    ControlCharacter { offset: usize, byte: u8 },

    #[error("byte {byte:#04x} at offset {offset} is not a Q-encoding literal")]
    IllegalQLiteral { offset: usize, byte: u8 },

    #[error("CR at offset {offset} is not part of CRLF")]
    BareCr { offset: usize },

    #[error("LF at offset {offset} is not part of CRLF")]
    BareLf { offset: usize },

    #[error("\"=\" at offset {offset} is not followed by two hex digits or CR")]
    MalformedEscape { offset: usize },

    #[error("lowercase hex digit in escape at offset {offset}")]
    LowercaseHex { offset: usize },

    #[error("line at offset {offset} is {length} characters long (max 76)")]
    LineTooLong { offset: usize, length: usize },

    #[error("line at offset {offset} ends with whitespace")]
    TrailingWhitespace { offset: usize },

    #[error("\"=\" at offset {offset} is the last or second-to-last byte")]
    DanglingEquals { offset: usize },
}

/// Characters RFC 2047 allows in a Q-encoded "phrase" word, plus "(" and ")"
/// which are legal outside comments (e.g. in `Subject`).
fn is_q_literal(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'(' | b')' | b'*' | b'+' | b'-' | b'/' | b'=' | b'_'
        )
}

fn is_control(b: u8) -> bool {
    matches!(b, 0..=8 | 11 | 12 | 14..=31) || b > 126
}

/// Validate an encoded buffer.
///
/// Checks are run byte by byte, then line by line (standard mode only), then
/// on the buffer's tail; the first failure is returned.
pub fn validate_encoding(buffer: &[u8], q_encoding: bool) -> Result<(), ValidationError> {
    let len = buffer.len();
    for (offset, &byte) in buffer.iter().enumerate() {
        if is_control(byte) {
            return Err(ValidationError::ControlCharacter { offset, byte });
        }
        if q_encoding && !is_q_literal(byte) {
            return Err(ValidationError::IllegalQLiteral { offset, byte });
        }
        if byte == CR && buffer.get(offset + 1) != Some(&LF) {
            return Err(ValidationError::BareCr { offset });
        }
        if byte == LF && (offset == 0 || buffer[offset - 1] != CR) {
            return Err(ValidationError::BareLf { offset });
        }
        if byte == EQUALS {
            check_escape(buffer, offset)?;
        }
    }

    if !q_encoding {
        let mut offset = 0usize;
        for line in split_crlf(buffer) {
            if line.len() > MAX_LINE_LENGTH {
                return Err(ValidationError::LineTooLong {
                    offset,
                    length: line.len(),
                });
            }
            if line.last().is_some_and(|&b| is_whitespace(b)) {
                return Err(ValidationError::TrailingWhitespace { offset });
            }
            offset += line.len() + 2;
        }
    }

    let tail = len.saturating_sub(2);
    if let Some(pos) = buffer[tail..].iter().position(|&b| b == EQUALS) {
        return Err(ValidationError::DanglingEquals { offset: tail + pos });
    }
    Ok(())
}

/// An "=" must introduce a soft break (CR next) or two uppercase hex digits.
/// Digits past the end of the buffer are left to the dangling-"=" check.
fn check_escape(buffer: &[u8], offset: usize) -> Result<(), ValidationError> {
    if buffer.get(offset + 1) == Some(&CR) {
        return Ok(());
    }
    let digits = buffer.iter().skip(offset + 1).take(2);
    if digits.clone().any(|b| !b.is_ascii_hexdigit()) {
        return Err(ValidationError::MalformedEscape { offset });
    }
    if digits.into_iter().any(|b| b.is_ascii_lowercase()) {
        return Err(ValidationError::LowercaseHex { offset });
    }
    Ok(())
}

fn split_crlf(buffer: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut rest = Some(buffer);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.windows(2).position(|w| w == [CR, LF]) {
            Some(pos) => {
                rest = Some(&current[pos + 2..]);
                Some(&current[..pos])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
