//! Diagnostic events for the digest pipeline.
//!
//! With the `tracing` feature disabled every hook compiles to nothing.

#[cfg(feature = "tracing")]
use tracing::{trace, warn};

/// A message was padded into `blocks` 64-byte blocks.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_padded(len: u64, blocks: u64) {
    trace!(
        target: "fdkit::md5",
        operation = "pad",
        len = len,
        blocks = blocks,
        "padded {} bytes into {} blocks",
        len,
        blocks
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_padded(_len: u64, _blocks: u64) {}

/// An incremental context produced its digest.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_finalize(len: u64) {
    trace!(
        target: "fdkit::md5",
        operation = "finalize",
        len = len,
        "finalized digest over {} bytes",
        len
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_finalize(_len: u64) {}

/// A length overflow was rejected.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn warn_length_overflow(len: u64) {
    warn!(
        target: "fdkit::md5",
        len = len,
        "message length {} overflows the 64-bit bit-length field",
        len
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn warn_length_overflow(_len: u64) {}
