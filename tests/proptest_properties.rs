use qpcodec::engine::{self, CodecOptions};
use qpcodec::validate::validate_encoding;
use proptest::prelude::*;

fn options(q_encoding: bool) -> CodecOptions {
    CodecOptions {
        q_encoding,
        ..Default::default()
    }
}

/// Byte soup biased towards the characters the codec treats specially.
fn qp_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    let special = prop::sample::select(vec![b' ', b'\t', b'\r', b'\n', b'=', b'_', b'a', b'Z']);
    let byte = prop_oneof![3 => special, 1 => any::<u8>()];
    proptest::collection::vec(byte, 0..max_len)
}

/// Append SPACE/TAB runs before every line terminator and at the end.
fn with_transport_padding(encoded: &[u8], pads: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded.len() * 2);
    let mut pad_iter = pads.iter().cycle();
    let mut push_padding = |out: &mut Vec<u8>| {
        let n = *pad_iter.next().unwrap_or(&0) as usize % 8;
        for k in 0..n {
            out.push(if k % 2 == 0 { b' ' } else { b'\t' });
        }
    };
    let mut i = 0;
    while i < encoded.len() {
        let b = encoded[i];
        if b == b'\r' && encoded.get(i + 1) == Some(&b'\n') {
            push_padding(&mut out);
            out.extend_from_slice(b"\r\n");
            i += 2;
            continue;
        }
        out.push(b);
        i += 1;
    }
    if !out.is_empty() {
        push_padding(&mut out);
    }
    out
}

proptest! {
    #[test]
    fn prop_encode_decode_roundtrip(data in qp_bytes(2048), q_encoding in any::<bool>()) {
        let opts = options(q_encoding);
        let encoded = engine::encode_with_options(&data, &opts).unwrap();
        let decoded = engine::decode_with_options(&encoded, &opts).unwrap();
        prop_assert_eq!(decoded, data);
    }

    #[test]
    fn prop_encoding_is_always_valid(data in qp_bytes(2048), q_encoding in any::<bool>()) {
        let encoded = engine::encode_with_options(&data, &options(q_encoding)).unwrap();
        prop_assert_eq!(validate_encoding(&encoded, q_encoding), Ok(()));
    }

    #[test]
    fn prop_encoded_length_within_bound(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let bound = engine::encode_target_length(data.len()).unwrap();
        for q_encoding in [false, true] {
            let encoded = engine::encode_with_options(&data, &options(q_encoding)).unwrap();
            prop_assert!(encoded.len() <= bound, "encoded={} bound={}", encoded.len(), bound);
        }
    }

    #[test]
    fn prop_transport_padding_is_ignored(
        data in qp_bytes(1024),
        pads in proptest::collection::vec(any::<u8>(), 1..32),
    ) {
        let opts = options(false);
        let encoded = engine::encode_with_options(&data, &opts).unwrap();
        let padded = with_transport_padding(&encoded, &pads);
        prop_assert_eq!(engine::decode_with_options(&padded, &opts).unwrap(), data);
    }

    #[test]
    fn prop_illegal_injection_never_errors(
        data in qp_bytes(1024),
        injections in proptest::collection::vec((any::<prop::sample::Index>(), 0u8..=31u8), 1..16),
        q_encoding in any::<bool>(),
    ) {
        let opts = options(q_encoding);
        let mut encoded = engine::encode_with_options(&data, &opts).unwrap();
        for (index, control) in injections {
            let at = index.index(encoded.len() + 1);
            let byte = if control == b'\t' || control == b'\n' || control == b'\r' { 0x7F } else { control };
            encoded.insert(at, byte);
        }
        let decoded = engine::decode_with_options(&encoded, &opts);
        prop_assert!(decoded.is_ok(), "{:?}", decoded);
        prop_assert!(decoded.unwrap().len() <= encoded.len());
    }

    #[test]
    fn prop_decode_output_never_longer_than_input(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        for q_encoding in [false, true] {
            let decoded = engine::decode_with_options(&data, &options(q_encoding)).unwrap();
            prop_assert!(decoded.len() <= data.len());
        }
    }
}
