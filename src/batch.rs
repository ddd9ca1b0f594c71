// Parallel batch helpers (feature `parallel`).
//
// Each buffer is an independent single-shot call. The lookup tables are
// read-only statics and every call owns its target, so buffers are spread
// across the rayon pool with no shared mutable state.

use rayon::prelude::*;

use crate::codec::CodecError;
use crate::engine::{self, CodecOptions};

/// Encode every buffer in `sources`, preserving order.
///
/// Returns the first error encountered, if any.
pub fn encode_batch<S: AsRef<[u8]> + Sync>(
    sources: &[S],
    opts: &CodecOptions,
) -> Result<Vec<Vec<u8>>, CodecError> {
    sources
        .par_iter()
        .map(|source| engine::encode_with_options(source.as_ref(), opts))
        .collect()
}

/// Decode every buffer in `sources`, preserving order.
pub fn decode_batch<S: AsRef<[u8]> + Sync>(
    sources: &[S],
    opts: &CodecOptions,
) -> Result<Vec<Vec<u8>>, CodecError> {
    sources
        .par_iter()
        .map(|source| engine::decode_with_options(source.as_ref(), opts))
        .collect()
}
