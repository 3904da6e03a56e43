use super::BLOCK_LEN;
use crate::error::{Error, Result};
use crate::utils::store_le_u64;

/// Size of the trailing bit-length field.
pub const LEN_FIELD: usize = core::mem::size_of::<u64>();
/// Longest possible padding suffix: the marker, 63 zeros and the length.
pub const MAX_TAIL_LEN: usize = BLOCK_LEN + LEN_FIELD;

const MARKER: u8 = 0x80;

/// Bit length of a message of `len` bytes, as stored in the length field.
///
/// Fails with [`Error::LengthOverflow`] when `8 * len` needs more than 64
/// bits, i.e. for messages of 2^61 bytes or more.
#[inline]
pub fn bit_length(len: u64) -> Result<u64> {
    len.checked_mul(8).ok_or_else(|| {
        crate::trace::warn_length_overflow(len);
        Error::LengthOverflow { len }
    })
}

/// Number of zero bytes between the marker and the length field.
#[inline(always)]
const fn zero_len(len: u64) -> usize {
    let used = (len % BLOCK_LEN as u64) as usize + 1;
    (BLOCK_LEN - LEN_FIELD + BLOCK_LEN - used) % BLOCK_LEN
}

/// Length of the padding suffix for a message of `len` bytes.
#[inline(always)]
const fn tail_len(len: u64) -> usize {
    1 + zero_len(len) + LEN_FIELD
}

/// Length of the padded buffer for a message of `len` bytes; always a
/// multiple of [`BLOCK_LEN`].
pub fn padded_len(len: u64) -> Result<u64> {
    bit_length(len)?;
    // len < 2^61, so adding at most 72 cannot wrap
    Ok(len + tail_len(len) as u64)
}

/// Writes the padding suffix for a message of `len` bytes into `out` and
/// returns how many bytes of `out` it occupies.
pub fn tail(len: u64, out: &mut [u8; MAX_TAIL_LEN]) -> Result<usize> {
    let bits = bit_length(len)?;
    Ok(write_tail(len, bits, out))
}

/// `bits` must equal `8 * len`.
#[inline]
pub(crate) fn write_tail(len: u64, bits: u64, out: &mut [u8; MAX_TAIL_LEN]) -> usize {
    debug_assert_eq!(Some(bits), len.checked_mul(8));

    let zeros = zero_len(len);
    out[0] = MARKER;
    out[1..1 + zeros].fill(0);

    let mut field = [0u8; LEN_FIELD];
    store_le_u64(&mut field, bits);
    out[1 + zeros..1 + zeros + LEN_FIELD].copy_from_slice(&field);

    tail_len(len)
}

/// Builds the padded buffer for `message`: the message, a `0x80` marker,
/// zeros up to 56 mod 64, and the message bit length little-endian.
pub fn pad(message: &[u8]) -> Result<Vec<u8>> {
    let len = message.len() as u64;

    let mut suffix = [0u8; MAX_TAIL_LEN];
    let n = tail(len, &mut suffix)?;

    let mut padded = Vec::with_capacity(message.len() + n);
    padded.extend_from_slice(message);
    padded.extend_from_slice(&suffix[..n]);

    debug_assert_eq!(padded.len() % BLOCK_LEN, 0);
    crate::trace::trace_padded(len, (padded.len() / BLOCK_LEN) as u64);
    Ok(padded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_boundaries() {
        for (len, expected) in [(0, 64), (1, 64), (55, 64), (56, 128), (57, 128), (63, 128), (64, 128), (119, 128), (120, 192)] {
            assert_eq!(padded_len(len).unwrap(), expected, "len: {}", len);
            assert_eq!(pad(&vec![0xffu8; len as usize]).unwrap().len() as u64, expected, "len: {}", len);
        }
    }

    #[test]
    fn test_empty_message() {
        let padded = pad(b"").unwrap();
        let mut expected = [0u8; 64];
        expected[0] = 0x80;
        assert_eq!(padded, expected);
    }

    #[test]
    fn test_layout() {
        let message = b"abc";
        let padded = pad(message).unwrap();
        assert_eq!(padded.len(), 64);
        assert_eq!(&padded[..3], message);
        assert_eq!(padded[3], 0x80);
        assert!(padded[4..56].iter().all(|&b| b == 0));
        assert_eq!(&padded[56..], &[24, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_length_recoverable() {
        for len in [0usize, 7, 55, 56, 300, 1000] {
            let padded = pad(&vec![0u8; len]).unwrap();
            let field: [u8; 8] = padded[padded.len() - 8..].try_into().unwrap();
            assert_eq!(u64::from_le_bytes(field), len as u64 * 8);
        }
    }

    #[test]
    fn test_tail() {
        let mut out = [0xeeu8; MAX_TAIL_LEN];
        assert_eq!(tail(55, &mut out).unwrap(), 9);
        assert_eq!(out[..9], [0x80, 0xb8, 0x01, 0, 0, 0, 0, 0, 0]);

        assert_eq!(tail(56, &mut out).unwrap(), 72);
        assert_eq!(out[0], 0x80);
        assert!(out[1..64].iter().all(|&b| b == 0));
        assert_eq!(out[64..], [0xc0, 0x01, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_length_overflow() {
        let limit = u64::MAX / 8;
        assert_eq!(bit_length(limit).unwrap(), limit * 8);
        assert!(padded_len(limit).unwrap() % BLOCK_LEN as u64 == 0);

        assert_eq!(bit_length(limit + 1), Err(Error::LengthOverflow { len: limit + 1 }));
        assert_eq!(padded_len(1 << 61), Err(Error::LengthOverflow { len: 1 << 61 }));
        assert_eq!(padded_len(u64::MAX), Err(Error::LengthOverflow { len: u64::MAX }));

        let mut out = [0u8; MAX_TAIL_LEN];
        assert!(tail(u64::MAX, &mut out).is_err());
    }
}
