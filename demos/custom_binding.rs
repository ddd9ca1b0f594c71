use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use qpcodec::binding::{Binding, BindingChoice};
use qpcodec::codec::{self, CodecError};
use qpcodec::engine::{self, CodecOptions};

/// Delegates to the built-in engines and counts processed bytes.
#[derive(Default)]
struct CountingBinding {
    decoded: AtomicUsize,
    encoded: AtomicUsize,
}

impl Binding for CountingBinding {
    fn name(&self) -> &str {
        "counting"
    }

    fn decode(
        &self,
        source: &[u8],
        target: &mut [u8],
        q_encoding: bool,
        table_decoding: &[u8],
        table_legal: &[u8],
    ) -> Result<usize, CodecError> {
        self.decoded.fetch_add(source.len(), Ordering::Relaxed);
        codec::decode(source, target, q_encoding, table_decoding, table_legal)
    }

    fn encode(
        &self,
        source: &[u8],
        target: &mut [u8],
        q_encoding: bool,
        table_encoding: &[u8],
        table_literals: &[u8],
    ) -> Result<usize, CodecError> {
        self.encoded.fetch_add(source.len(), Ordering::Relaxed);
        codec::encode(source, target, q_encoding, table_encoding, table_literals)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let counter = Arc::new(CountingBinding::default());
    let shared: Arc<dyn Binding> = counter.clone();
    let opts = CodecOptions {
        binding: BindingChoice::from(shared),
        ..Default::default()
    };

    let message = b"x = 1\tnot the end \r\n";
    let encoded = engine::encode_with_options(message, &opts)?;
    let decoded = engine::decode_with_options(&encoded, &opts)?;
    assert_eq!(decoded, message);

    println!("options: {opts:?}");
    println!(
        "encoded {} bytes, decoded {} bytes through custom binding",
        counter.encoded.load(Ordering::Relaxed),
        counter.decoded.load(Ordering::Relaxed)
    );
    Ok(())
}
