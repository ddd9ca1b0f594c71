// Quoted-Printable decoder.
//
// A single left-to-right scan over the source. At each position, in order:
//   1. "=XY" with two hex digits          -> one decoded byte
//   2. CR / LF                            -> soft break (dropped) or hard break (copied)
//   3. "_" in Q-encoding mode             -> SPACE
//   4. byte marked in the legal table     -> copied
//   5. anything else                      -> dropped
//
// Decoding is permissive: a truncated or malformed escape passes through
// literally and illegal bytes are silently dropped.

use log::trace;

use super::error::CodecError;
use super::tables::TABLE_SIZE;
use super::{CR, EQUALS, LF, SPACE, TargetCursor, UNDERSCORE, check_table, is_whitespace};

/// Decode `source` into `target`, returning the number of bytes written.
///
/// `target` must be at least `source.len()` bytes: decoding never grows the
/// data. `table_decoding` is the +1-shifted hex table and `table_legal` marks
/// bytes accepted unescaped (see [`super::tables`]).
pub fn decode(
    source: &[u8],
    target: &mut [u8],
    q_encoding: bool,
    table_decoding: &[u8],
    table_legal: &[u8],
) -> Result<usize, CodecError> {
    if target.len() < source.len() {
        return Err(CodecError::BufferTooSmall {
            required: source.len(),
            actual: target.len(),
        });
    }
    check_table("tableDecoding", table_decoding, TABLE_SIZE)?;
    check_table("tableLegal", table_legal, TABLE_SIZE)?;

    let len = source.len();
    let mut out = TargetCursor::new(target);
    let mut i = 0usize;

    while i < len {
        let b = source[i];
        if b == EQUALS
            && i + 2 < len
            && table_decoding[source[i + 1] as usize] != 0
            && table_decoding[source[i + 2] as usize] != 0
        {
            let hi = table_decoding[source[i + 1] as usize] - 1;
            let lo = table_decoding[source[i + 2] as usize] - 1;
            // Tables are caller-supplied; only the low byte is kept.
            out.push((hi << 4).wrapping_add(lo))?;
            i += 3;
        } else if b == CR || b == LF {
            let terminator = line_break_len(source, i);
            if strip_padding_then_test_soft_break(source, i, &mut out) {
                // Drop the "=" already copied, then skip the terminator.
                out.pop();
                trace!("soft line break at offset {i}");
                i += terminator;
            } else {
                out.extend(&source[i..i + terminator])?;
                i += terminator;
            }
        } else if q_encoding && b == UNDERSCORE {
            out.push(SPACE)?;
            i += 1;
        } else if table_legal[b as usize] != 0 {
            out.push(b)?;
            i += 1;
        } else {
            trace!("dropping illegal byte {b:#04x} at offset {i}");
            i += 1;
        }
    }

    // Trailing transport padding at end of input. A dangling "=" stays.
    strip_padding_then_test_soft_break(source, i, &mut out);

    // Target-side overflow is reported by the cursor on each write.
    if i > len {
        return Err(CodecError::Overflow("source"));
    }
    Ok(out.position())
}

/// Length of the line terminator at `i`: 2 for CRLF, 1 for a lone CR or LF.
///
/// Caller guarantees `source[i]` is CR or LF.
#[inline]
fn line_break_len(source: &[u8], i: usize) -> usize {
    if source[i] == CR && source.get(i + 1) == Some(&LF) {
        2
    } else {
        1
    }
}

/// Rewind the target over transport padding that precedes source offset
/// `index`, then report whether the byte before the padding was "=".
///
/// Only whitespace that was literal in the source is trimmed. Encoded symbols
/// never contain TAB or SPACE, so each whitespace source byte corresponds to
/// exactly one copied target byte.
fn strip_padding_then_test_soft_break(
    source: &[u8],
    index: usize,
    out: &mut TargetCursor<'_>,
) -> bool {
    let mut rewind = index;
    while out.position() > 0 && rewind > 0 && is_whitespace(source[rewind - 1]) {
        out.pop();
        rewind -= 1;
    }
    out.position() > 0 && rewind > 0 && source[rewind - 1] == EQUALS
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::tables::{TABLE_DECODING, TABLE_LEGAL};

    fn dec(input: &[u8], q: bool) -> Vec<u8> {
        let mut target = vec![0u8; input.len()];
        let n = decode(input, &mut target, q, &TABLE_DECODING, &TABLE_LEGAL).unwrap();
        target.truncate(n);
        target
    }

    #[test]
    fn decodes_hex_escapes_in_either_case() {
        assert_eq!(dec(b"=3D=3d=FF=00", false), b"==\xFF\x00");
        assert_eq!(dec(b"caf=C3=A9", false), "café".as_bytes());
    }

    #[test]
    fn removes_soft_line_breaks() {
        assert_eq!(dec(b"abc=\r\ndef", false), b"abcdef");
        assert_eq!(dec(b"abc=\ndef", false), b"abcdef");
        assert_eq!(dec(b"abc=\rdef", false), b"abcdef");
    }

    #[test]
    fn keeps_hard_line_breaks() {
        assert_eq!(dec(b"a\r\nb", false), b"a\r\nb");
        assert_eq!(dec(b"a\nb\rc", false), b"a\nb\rc");
    }

    #[test]
    fn strips_transport_padding() {
        assert_eq!(dec(b"abc= \t \r\ndef", false), b"abcdef");
        assert_eq!(dec(b"abc \t\r\ndef", false), b"abc\r\ndef");
        assert_eq!(dec(b"abc  ", false), b"abc");
    }

    #[test]
    fn underscore_is_space_only_in_q_mode() {
        assert_eq!(dec(b"_", true), b" ");
        assert_eq!(dec(b"_", false), b"_");
        assert_eq!(dec(b"a_b=5F", true), b"a b_");
    }

    #[test]
    fn false_positive_and_truncated_escapes_pass_through() {
        assert_eq!(dec(b"=0Z==", false), b"=0Z==");
        assert_eq!(dec(b"=0Z==", true), b"=0Z==");
        assert_eq!(dec(b"=0", false), b"=0");
        assert_eq!(dec(b"=", false), b"=");
        assert_eq!(dec(b"=4", false), b"=4");
    }

    #[test]
    fn drops_illegal_bytes() {
        assert_eq!(dec(b"a\x00b\x7Fc\xFFd", false), b"abcd");
        assert_eq!(dec(b"\x01\x02\x03", true), b"");
    }

    #[test]
    fn empty_input() {
        assert_eq!(dec(b"", false), b"");
    }

    #[test]
    fn rejects_small_target() {
        let mut target = [0u8; 0];
        let err = decode(b"x", &mut target, false, &TABLE_DECODING, &TABLE_LEGAL).unwrap_err();
        assert_eq!(
            err,
            CodecError::BufferTooSmall {
                required: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn oversized_table_entries_wrap_instead_of_panicking() {
        let table = [0xFFu8; 256];
        let mut target = [0u8; 3];
        let n = decode(b"=AA", &mut target, false, &table, &TABLE_LEGAL).unwrap();
        assert_eq!(n, 1);
        assert_eq!(target[0], 0xDE);
    }

    #[test]
    fn exact_capacity_target_is_enough() {
        let mut target = [0u8; 5];
        let n = decode(b"ab=\r\n", &mut target, false, &TABLE_DECODING, &TABLE_LEGAL).unwrap();
        assert_eq!(&target[..n], b"ab");
        let n = decode(b"a\r\nbc", &mut target, false, &TABLE_DECODING, &TABLE_LEGAL).unwrap();
        assert_eq!(&target[..n], b"a\r\nbc");
    }

    #[test]
    fn rejects_wrong_table_lengths() {
        let mut target = [0u8; 0];
        let err = decode(b"", &mut target, false, &[], &TABLE_LEGAL).unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument(msg) if msg.starts_with("tableDecoding")));
        let err = decode(b"", &mut target, false, &TABLE_DECODING, &[0; 10]).unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument(msg) if msg.starts_with("tableLegal")));
    }
}
