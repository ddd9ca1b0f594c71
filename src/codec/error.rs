use thiserror::Error;

/// Errors raised by the Quoted-Printable engines and the dispatch layer.
///
/// Illegal bytes and truncated escapes met while decoding are not errors:
/// the decoder drops or passes them through and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A table has the wrong length, or a size computation overflowed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The target buffer cannot hold the worst-case output.
    #[error("target too small: need {required} bytes, have {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    /// A cursor moved past a buffer bound. Names the side: "source" or "target".
    #[error("{0} overflow")]
    Overflow(&'static str),
}

impl CodecError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
