// Lookup tables for the Quoted-Printable engines.
//
// All five tables are evaluated at compile time and live in read-only
// statics, so every call shares them by reference without locking.
//
//   TABLE_DECODING            hex digit -> value + 1 (0 = not a hex digit)
//   TABLE_ENCODING            byte v -> uppercase hex pair at [2v], [2v+1]
//   TABLE_LEGAL               literals plus "=" and "_" (decode acceptance)
//   TABLE_LITERALS            RFC 2045 literals, minus "_"
//   TABLE_LITERALS_RESTRICTED alphanumerics only (Q-encoding literals)

/// Size of every single-byte indexed table.
pub const TABLE_SIZE: usize = 256;

/// Size of the hex-pair encoding table.
pub const ENCODING_TABLE_SIZE: usize = TABLE_SIZE * 2;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

pub static TABLE_DECODING: [u8; TABLE_SIZE] = generate_table_decoding();
pub static TABLE_ENCODING: [u8; ENCODING_TABLE_SIZE] = generate_table_encoding();
pub static TABLE_LEGAL: [u8; TABLE_SIZE] = generate_table_legal();
pub static TABLE_LITERALS: [u8; TABLE_SIZE] = generate_table_literals();
pub static TABLE_LITERALS_RESTRICTED: [u8; TABLE_SIZE] = generate_table_literals_restricted();

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Hex digit lookup with a +1 shift, so a zero entry means "not a hex digit".
///
/// Both cases are accepted: lowercase digits are formally illegal in encoded
/// output but robust decoders recognize them.
pub const fn generate_table_decoding() -> [u8; TABLE_SIZE] {
    let mut table = [0u8; TABLE_SIZE];
    let mut i = 0u8;
    while i < 10 {
        table[(b'0' + i) as usize] = i + 1;
        i += 1;
    }
    let mut i = 0u8;
    while i < 6 {
        table[(b'A' + i) as usize] = 10 + i + 1;
        table[(b'a' + i) as usize] = 10 + i + 1;
        i += 1;
    }
    table
}

/// Uppercase hex pair for every byte value.
pub const fn generate_table_encoding() -> [u8; ENCODING_TABLE_SIZE] {
    let mut table = [0u8; ENCODING_TABLE_SIZE];
    let mut code = 0usize;
    while code < TABLE_SIZE {
        table[code << 1] = HEX_UPPER[code >> 4];
        table[(code << 1) + 1] = HEX_UPPER[code & 0x0F];
        code += 1;
    }
    table
}

/// Bytes a decoder accepts unescaped: every literal, plus "=" and "_".
pub const fn generate_table_legal() -> [u8; TABLE_SIZE] {
    let mut table = generate_table_literals();
    table[b'=' as usize] = 1;
    table[b'_' as usize] = 1;
    table
}

/// TAB, 0x20..=0x3C and 0x3E..=0x7E.
///
/// "_" is excluded even though RFC 2045 allows it, since some decoders treat
/// it as a space. It is emitted as "=5F" instead.
pub const fn generate_table_literals() -> [u8; TABLE_SIZE] {
    let mut table = [0u8; TABLE_SIZE];
    let mut code = 0usize;
    while code < TABLE_SIZE {
        if code == 0x09
            || (code >= 0x20 && code <= 0x3C)
            || (code >= 0x3E && code <= 0x7E && code != 0x5F)
        {
            table[code] = 1;
        }
        code += 1;
    }
    table
}

/// `0-9`, `A-Z`, `a-z` only.
///
/// RFC 2047 also permits `!*+-/` in a "phrase" encoded-word, but those clash
/// with structured header parsers, so Q-encoding escapes them.
pub const fn generate_table_literals_restricted() -> [u8; TABLE_SIZE] {
    let mut table = [0u8; TABLE_SIZE];
    let mut code = 0usize;
    while code < TABLE_SIZE {
        let c = code as u8;
        if c.is_ascii_alphanumeric() {
            table[code] = 1;
        }
        code += 1;
    }
    table
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
