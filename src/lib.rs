//! Portable MD5 message digest with lowercase hex output, an incremental
//! context and HMAC-MD5.
//!
//! MD5 is broken for collision resistance; use it for checksums and legacy
//! interoperability only.

pub mod crypto;
pub mod encoding;
pub mod utils;

mod error;
mod trace;

pub use crypto::hash::md5::{self, digest, hex_digest, hex_digest_str, Md5};
pub use crypto::hmac::HmacMd5;
pub use error::{Error, Result};

/// Repeats `$e` for `$i` in `$start..$start + $count`.
#[macro_export]
macro_rules! const_loop {
    ($i:ident, $start:expr, $count:expr, $e:expr) => {{
        let mut $i = $start;
        while $i < $start + $count {
            $e;
            $i += 1;
        }
    }};
}
