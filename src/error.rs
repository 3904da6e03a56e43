use thiserror::Error;

/// Errors surfaced by the digest and encoding routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The message bit length does not fit the 64-bit length field.
    #[error("message of {len} bytes exceeds the 2^64-bit length limit")]
    LengthOverflow { len: u64 },

    /// The caller-provided output buffer cannot hold the encoded data.
    #[error("output buffer too small: need {needed} bytes, got {got}")]
    OutputTooSmall { needed: usize, got: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
