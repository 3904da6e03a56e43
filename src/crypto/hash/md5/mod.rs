// The MD5 Message-Digest Algorithm
// https://www.rfc-editor.org/rfc/rfc1321

pub mod padding;
pub mod soft;

pub use soft::{HashState, Md5};

use crate::encoding::hex;
use crate::utils::{slice_to_array_at, Chunks};
use crate::Result;

pub const BLOCK_LEN: usize = 64;
pub const DIGEST_LEN: usize = 16;

const INITIAL_STATE: [u32; 4] = [
    0x67452301,
    0xefcdab89,
    0x98badcfe,
    0x10325476,
];

/// Per-round shift amounts.
const S64: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22,
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20,
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23,
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// floor(abs(sin(i + 1)) * 2^32)
const K64: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee,
    0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be,
    0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa,
    0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed,
    0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c,
    0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05,
    0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039,
    0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1,
    0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Iterates over the 64-byte blocks of a padded buffer, in order.
///
/// # Panics
/// If `padded.len()` is not a multiple of [`BLOCK_LEN`]. Only the padding
/// stage produces input for the compression engine, so a misaligned buffer
/// is a bug, not a recoverable condition.
pub fn blocks(padded: &[u8]) -> impl ExactSizeIterator<Item = &[u8; BLOCK_LEN]> + '_ {
    assert!(
        padded.len() % BLOCK_LEN == 0,
        "buffer of {} bytes is not block aligned",
        padded.len()
    );
    // SAFETY: the buffer is block aligned, so every chunk is BLOCK_LEN long
    Chunks::new(padded, BLOCK_LEN).map(|block| unsafe { slice_to_array_at::<u8, BLOCK_LEN>(block, 0) })
}

/// Computes the MD5 digest of `message`.
///
/// The message is padded in full, split into blocks and folded into a
/// fresh [`HashState`]. Use [`Md5`] to hash data incrementally.
pub fn digest(message: &[u8]) -> Result<[u8; DIGEST_LEN]> {
    let padded = padding::pad(message)?;
    let mut state = HashState::new();
    for block in blocks(&padded) {
        soft::compress(&mut state, block);
    }
    Ok(state.to_bytes())
}

/// Computes the MD5 digest of `message` as 32 lowercase hex characters.
pub fn hex_digest(message: &[u8]) -> Result<String> {
    Ok(hex::encode(&digest(message)?))
}

/// Hashes the UTF-8 encoding of `text`.
pub fn hex_digest_str(text: &str) -> Result<String> {
    hex_digest(text.as_bytes())
}
