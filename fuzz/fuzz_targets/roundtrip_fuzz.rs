#![no_main]
use libfuzzer_sys::fuzz_target;
use qpcodec::engine::{self, CodecOptions};
use qpcodec::validate::validate_encoding;

fuzz_target!(|data: &[u8]| {
    let Some((&flags, payload)) = data.split_first() else {
        return;
    };
    let q_encoding = flags & 1 != 0;
    let opts = CodecOptions {
        q_encoding,
        ..Default::default()
    };

    let encoded = engine::encode_with_options(payload, &opts).unwrap();
    assert!(encoded.len() <= engine::encode_target_length(payload.len()).unwrap());
    assert_eq!(validate_encoding(&encoded, q_encoding), Ok(()));

    let decoded = engine::decode_with_options(&encoded, &opts).unwrap();
    assert_eq!(decoded, payload);
});
