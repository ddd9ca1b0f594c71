// Pluggable encode/decode implementations.
//
// The dispatch layer in `crate::engine` is generic over the `Binding` trait.
// A binding receives the source, a pre-sized target and the lookup tables,
// and returns the number of bytes written. It must honor the exact contracts
// of `codec::decode` and `codec::encode`; the dispatch layer does not
// special-case any implementation.
//
// Built-ins:
//   - `Portable`: the safe scalar engines in `crate::codec` (default)
//   - `BindingChoice::Custom`: any caller-supplied implementation

use std::fmt;
use std::sync::Arc;

use crate::codec::{self, CodecError};

// ---------------------------------------------------------------------------
// Binding trait
// ---------------------------------------------------------------------------

/// An implementation of the Quoted-Printable engine contract.
///
/// # Implementing a custom binding
///
/// ```no_run
/// use qpcodec::binding::Binding;
/// use qpcodec::codec::{self, CodecError};
///
/// struct Traced;
///
/// impl Binding for Traced {
///     fn name(&self) -> &str { "traced" }
///     fn decode(
///         &self, source: &[u8], target: &mut [u8], q_encoding: bool,
///         table_decoding: &[u8], table_legal: &[u8],
///     ) -> Result<usize, CodecError> {
///         codec::decode(source, target, q_encoding, table_decoding, table_legal)
///     }
///     fn encode(
///         &self, source: &[u8], target: &mut [u8], q_encoding: bool,
///         table_encoding: &[u8], table_literals: &[u8],
///     ) -> Result<usize, CodecError> {
///         codec::encode(source, target, q_encoding, table_encoding, table_literals)
///     }
/// }
/// ```
pub trait Binding: Send + Sync {
    /// Short name used in logs and CLI output.
    fn name(&self) -> &str;

    /// Decode `source` into `target` (capacity >= `source.len()`).
    fn decode(
        &self,
        source: &[u8],
        target: &mut [u8],
        q_encoding: bool,
        table_decoding: &[u8],
        table_legal: &[u8],
    ) -> Result<usize, CodecError>;

    /// Encode `source` into `target` (capacity >= `encode_target_length(source.len())`).
    fn encode(
        &self,
        source: &[u8],
        target: &mut [u8],
        q_encoding: bool,
        table_encoding: &[u8],
        table_literals: &[u8],
    ) -> Result<usize, CodecError>;
}

// ---------------------------------------------------------------------------
// Portable binding
// ---------------------------------------------------------------------------

/// The built-in engines from [`crate::codec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Portable;

static PORTABLE: Portable = Portable;

impl Binding for Portable {
    fn name(&self) -> &str {
        "portable"
    }

    fn decode(
        &self,
        source: &[u8],
        target: &mut [u8],
        q_encoding: bool,
        table_decoding: &[u8],
        table_legal: &[u8],
    ) -> Result<usize, CodecError> {
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
        codec::encode(source, target, q_encoding, table_encoding, table_literals)
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Which binding a call should use.
#[derive(Clone, Default)]
pub enum BindingChoice {
    /// The built-in engines.
    #[default]
    Portable,
    /// A binding provided by the caller.
    Custom(Arc<dyn Binding>),
}

impl fmt::Debug for BindingChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portable => write!(f, "Portable"),
            Self::Custom(b) => write!(f, "Custom(name={})", b.name()),
        }
    }
}

impl BindingChoice {
    /// Return the selected implementation.
    pub fn binding(&self) -> &dyn Binding {
        match self {
            Self::Portable => &PORTABLE,
            Self::Custom(b) => b.as_ref(),
        }
    }
}

impl From<Arc<dyn Binding>> for BindingChoice {
    fn from(binding: Arc<dyn Binding>) -> Self {
        Self::Custom(binding)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
