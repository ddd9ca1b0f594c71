#![no_main]
use libfuzzer_sys::fuzz_target;
use qpcodec::codec::{self, CodecError};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // Drive the low-level engines with undersized and oversized targets.
    // They must either succeed within bounds or report an error, never panic.
    let q_encoding = data[0] & 1 != 0;
    let source = &data[2..];
    let slack = data[1] as usize;

    let mut target = vec![0u8; source.len().saturating_sub(slack % 4)];
    match codec::decode(
        source,
        &mut target,
        q_encoding,
        &codec::TABLE_DECODING,
        &codec::TABLE_LEGAL,
    ) {
        Ok(n) => assert!(n <= target.len()),
        Err(CodecError::BufferTooSmall { .. }) => assert!(target.len() < source.len()),
        Err(e) => panic!("unexpected decode error: {e}"),
    }

    let bound = codec::encode_target_length(source.len()).unwrap();
    let literals: &[u8] = if q_encoding {
        &codec::TABLE_LITERALS_RESTRICTED
    } else {
        &codec::TABLE_LITERALS
    };
    let mut target = vec![0u8; bound.saturating_sub(slack % 8)];
    match codec::encode(
        source,
        &mut target,
        q_encoding,
        &codec::TABLE_ENCODING,
        literals,
    ) {
        Ok(n) => assert!(n <= target.len()),
        Err(CodecError::BufferTooSmall { required, .. }) => assert_eq!(required, bound),
        Err(e) => panic!("unexpected encode error: {e}"),
    }
});
