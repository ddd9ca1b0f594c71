// Quoted-Printable encoder.
//
// A single left-to-right scan over the source. At each position, in order:
//   1. byte marked in the literal table  -> copied (soft break first if needed)
//   2. CRLF, standard mode only          -> copied after escaping trailing whitespace
//   3. anything else                     -> "=XY" symbol (soft break first if needed)
//
// Q-encoding never wraps lines and never passes CRLF through. The caller
// selects its restricted literal table.

use super::error::CodecError;
use super::tables::{ENCODING_TABLE_SIZE, TABLE_SIZE};
use super::{CR, EQUALS, LF, MAX_LINE_LENGTH, TargetCursor, check_table, is_whitespace};

/// Size of an "=XY" symbol and of a "=\r\n" soft break.
const SYMBOL_LEN: usize = 3;

/// Worst-case encoded length for `source_len` input bytes.
///
/// Every byte is assumed to need a 3-byte symbol, and lines wrap with one of
/// the 76 columns reserved for the soft break "=":
///
/// ```text
/// lines      = ceil(3n / 75)
/// soft       = max(lines - 1, 0)
/// target_len = 3n + 3 * soft
/// ```
///
/// Returns `InvalidArgument` if the result does not fit in `usize`.
pub fn encode_target_length(source_len: usize) -> Result<usize, CodecError> {
    let symbols = source_len
        .checked_mul(SYMBOL_LEN)
        .ok_or_else(|| CodecError::invalid(format!("source length {source_len} too large")))?;
    let usable = MAX_LINE_LENGTH - 1;
    let lines = symbols.div_ceil(usable);
    let soft_breaks = lines.saturating_sub(1);
    soft_breaks
        .checked_mul(SYMBOL_LEN)
        .and_then(|extra| symbols.checked_add(extra))
        .ok_or_else(|| CodecError::invalid(format!("source length {source_len} too large")))
}

/// Encode `source` into `target`, returning the number of bytes written.
///
/// `target` must hold at least [`encode_target_length`]`(source.len())` bytes.
/// `table_literals` decides which bytes pass through unescaped: pass the
/// restricted table when `q_encoding` is set.
pub fn encode(
    source: &[u8],
    target: &mut [u8],
    q_encoding: bool,
    table_encoding: &[u8],
    table_literals: &[u8],
) -> Result<usize, CodecError> {
    let required = encode_target_length(source.len())?;
    if target.len() < required {
        return Err(CodecError::BufferTooSmall {
            required,
            actual: target.len(),
        });
    }
    check_table("tableEncoding", table_encoding, ENCODING_TABLE_SIZE)?;
    check_table("tableLiterals", table_literals, TABLE_SIZE)?;

    let len = source.len();
    let mut enc = LineEncoder {
        out: TargetCursor::new(target),
        line: 0,
        wrap: !q_encoding,
        table_encoding,
    };
    let mut i = 0usize;

    while i < len {
        let b = source[i];
        if table_literals[b as usize] != 0 {
            enc.soft_line_break(1)?;
            enc.out.push(b)?;
            i += 1;
        } else if !q_encoding && b == CR && source.get(i + 1) == Some(&LF) {
            enc.escape_trailing_whitespace()?;
            enc.out.extend(&[CR, LF])?;
            enc.line = 0;
            i += 2;
        } else {
            enc.symbol(b)?;
            i += 1;
        }
    }
    enc.escape_trailing_whitespace()?;

    // Target-side overflow is reported by the cursor on each write.
    if i > len {
        return Err(CodecError::Overflow("source"));
    }
    Ok(enc.out.position())
}

// ---------------------------------------------------------------------------
// Line-tracking writer
// ---------------------------------------------------------------------------

struct LineEncoder<'a> {
    out: TargetCursor<'a>,
    /// Bytes emitted since the last line start.
    line: usize,
    /// False in Q-encoding mode: lines are never wrapped.
    wrap: bool,
    table_encoding: &'a [u8],
}

impl LineEncoder<'_> {
    /// Account for `size` bytes about to be appended, inserting "=\r\n" first
    /// if they would push the line to 76 columns.
    #[inline]
    fn soft_line_break(&mut self, size: usize) -> Result<(), CodecError> {
        if self.wrap && self.line + size >= MAX_LINE_LENGTH {
            self.out.extend(&[EQUALS, CR, LF])?;
            self.line = 0;
        }
        self.line += size;
        Ok(())
    }

    #[inline]
    fn symbol(&mut self, code: u8) -> Result<(), CodecError> {
        self.soft_line_break(SYMBOL_LEN)?;
        let idx = (code as usize) << 1;
        self.out
            .extend(&[EQUALS, self.table_encoding[idx], self.table_encoding[idx + 1]])
    }

    /// A line must not end in SPACE or TAB: re-emit a trailing one as a symbol.
    fn escape_trailing_whitespace(&mut self) -> Result<(), CodecError> {
        if let Some(last) = self.out.last().filter(|&b| is_whitespace(b)) {
            self.out.pop();
            self.symbol(last)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
