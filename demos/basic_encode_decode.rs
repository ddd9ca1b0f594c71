use qpcodec::engine::{self, CodecOptions};
use qpcodec::validate::validate_encoding;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let body = "Grüße aus Köln!\r\nThe trailing space stays visible: \r\n".as_bytes();

    let encoded = engine::encode(body)?;
    validate_encoding(&encoded, false)?;
    let restored = engine::decode(&encoded)?;
    assert_eq!(restored, body);

    println!("{}", String::from_utf8_lossy(&encoded));
    println!(
        "encoded {} bytes -> {} bytes (bound {}) -> restored {} bytes",
        body.len(),
        encoded.len(),
        engine::encode_target_length(body.len())?,
        restored.len()
    );

    let subject = "Café menu_2";
    let word = engine::encode_with_options(subject.as_bytes(), &CodecOptions::q_encoding())?;
    println!("=?UTF-8?Q?{}?=", String::from_utf8_lossy(&word));

    Ok(())
}
