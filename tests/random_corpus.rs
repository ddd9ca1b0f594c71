// Seeded corpus of text-like buffers: tokens drawn from a mixed alphabet,
// joined into lines with one kind of line terminator per buffer.

use qpcodec::engine::{self, CodecOptions};
use qpcodec::validate::validate_encoding;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 0x5150_2045;
const BUFFERS: usize = 1000;
const LINE_BREAKS: [&[u8]; 3] = [b"\r\n", b"\r", b"\n"];

fn alphabet() -> Vec<u8> {
    let mut a = Vec::new();
    a.extend_from_slice(b"abcdefghijklmnopqrstuvwxyz");
    a.extend_from_slice(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    a.extend_from_slice(b"0123456789");
    a.extend_from_slice(b"!@#$%^&*()-_=+[{]};:'\"\\|,<.>/?`~");
    a.extend(std::iter::repeat_n(b' ', 26));
    a.extend(std::iter::repeat_n(b'\t', 13));
    a.extend(std::iter::repeat_n(b'=', 26));
    a.extend(0..=32u8);
    a.extend(127..=255u8);
    a
}

fn generate_token(rng: &mut StdRng, alphabet: &[u8]) -> Vec<u8> {
    let len = rng.random_range(1..=10);
    (0..len)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

fn generate_line(rng: &mut StdRng, alphabet: &[u8]) -> Vec<u8> {
    let tokens = rng.random_range(1..=5);
    let tokens: Vec<Vec<u8>> = (0..tokens).map(|_| generate_token(rng, alphabet)).collect();
    tokens.join(&b' ')
}

fn generate_buffer(rng: &mut StdRng, alphabet: &[u8]) -> Vec<u8> {
    let lines = if rng.random_bool(0.01) {
        0
    } else {
        rng.random_range(1..=100)
    };
    let line_break = LINE_BREAKS[rng.random_range(0..LINE_BREAKS.len())];
    let lines: Vec<Vec<u8>> = (0..lines).map(|_| generate_line(rng, alphabet)).collect();
    lines.join(line_break)
}

/// Codes that must never appear in an encoding: controls other than TAB, CR
/// and LF, plus everything above 126.
fn illegal_codes() -> Vec<u8> {
    (0..32u8)
        .filter(|&c| !matches!(c, b'\t' | b'\n' | b'\r'))
        .chain(127..=255u8)
        .collect()
}

fn inject_illegal(rng: &mut StdRng, encoded: &[u8], illegal: &[u8]) -> Vec<u8> {
    let mut out = encoded.to_vec();
    for _ in 0..rng.random_range(1..=16) {
        let at = rng.random_range(0..=out.len());
        out.insert(at, illegal[rng.random_range(0..illegal.len())]);
    }
    out
}

/// Lowercase some hex escapes and pad the end of every non-blank line with
/// SPACE/TAB, as intermediate transports might.
fn with_transport_padding(rng: &mut StdRng, encoded: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded.len() * 2);
    let mut line_start = 0usize;
    let mut i = 0usize;
    while i <= encoded.len() {
        let at_break = i == encoded.len() || encoded[i] == b'\r' || encoded[i] == b'\n';
        if !at_break {
            i += 1;
            continue;
        }
        let line = &encoded[line_start..i];
        let mut j = 0;
        while j < line.len() {
            let escape = line.get(j..j + 3).filter(|e| {
                e[0] == b'=' && e[1..].iter().all(|&d| matches!(d, b'0'..=b'9' | b'A'..=b'F'))
            });
            if let Some(escape) = escape {
                let lower = rng.random_bool(0.5);
                out.push(b'=');
                for &d in &escape[1..] {
                    out.push(if lower { d.to_ascii_lowercase() } else { d });
                }
                j += 3;
            } else {
                out.push(line[j]);
                j += 1;
            }
        }
        if !line.is_empty() {
            let room = 76usize.saturating_sub(line.len());
            for _ in 0..rng.random_range(0..=room) {
                out.push(if rng.random_bool(0.5) { b' ' } else { b'\t' });
            }
        }
        if i < encoded.len() {
            out.push(encoded[i]);
        }
        i += 1;
        line_start = i;
    }
    out
}

#[test]
fn random_corpus_roundtrips_and_tolerates_damage() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let alphabet = alphabet();
    let illegal = illegal_codes();

    for n in 0..BUFFERS {
        let source = generate_buffer(&mut rng, &alphabet);
        let q_encoding = rng.random_bool(0.2);
        let opts = CodecOptions {
            q_encoding,
            ..Default::default()
        };

        let encoded = engine::encode_with_options(&source, &opts).unwrap();
        if let Err(e) = validate_encoding(&encoded, q_encoding) {
            panic!(
                "buffer {n}: invalid encoding ({e}): {:?}",
                String::from_utf8_lossy(&encoded)
            );
        }

        let decoded = engine::decode_with_options(&encoded, &opts).unwrap();
        assert_eq!(decoded, source, "buffer {n}: roundtrip mismatch");

        let padded = with_transport_padding(&mut rng, &encoded);
        let decoded = engine::decode_with_options(&padded, &opts).unwrap();
        assert_eq!(decoded, source, "buffer {n}: padded decode mismatch");

        let damaged = inject_illegal(&mut rng, &encoded, &illegal);
        assert!(
            engine::decode_with_options(&damaged, &opts).is_ok(),
            "buffer {n}: decode of damaged input failed"
        );
    }
}
