#![no_main]
use libfuzzer_sys::fuzz_target;
use qpcodec::engine::{self, CodecOptions};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode without error, in both modes, and never
    // produce more bytes than they consumed.
    let decoded = engine::decode(data).unwrap();
    assert!(decoded.len() <= data.len());

    let decoded = engine::decode_with_options(data, &CodecOptions::q_encoding()).unwrap();
    assert!(decoded.len() <= data.len());
});
