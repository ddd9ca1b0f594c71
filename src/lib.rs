//! qpcodec: Quoted-Printable (RFC 2045) and Q-encoding (RFC 2047) in Rust.
//!
//! The crate provides:
//! - Buffer-to-buffer encode/decode engines over lookup tables (`codec`)
//! - A pluggable implementation seam (`binding`)
//! - High-level encode/decode APIs that size and trim the output (`engine`)
//! - An encoded-output validator (`validate`)
//! - File-oriented helpers (`io`)
//! - Parallel batch helpers (`batch`, `parallel` feature)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use qpcodec::engine::{self, CodecOptions};
//!
//! let encoded = engine::encode("naïve café".as_bytes()).unwrap();
//! assert_eq!(encoded, b"na=C3=AFve caf=C3=A9");
//! assert_eq!(engine::decode(&encoded).unwrap(), "naïve café".as_bytes());
//!
//! let header = engine::encode_with_options(b"a b", &CodecOptions::q_encoding()).unwrap();
//! assert_eq!(header, b"a=20b");
//! ```

pub mod binding;
pub mod codec;
pub mod engine;
pub mod io;
pub mod validate;

#[cfg(feature = "parallel")]
pub mod batch;

#[cfg(feature = "cli")]
pub mod cli;

pub use codec::CodecError;
pub use engine::{
    CodecOptions, decode, decode_with_options, encode, encode_target_length, encode_with_options,
};
