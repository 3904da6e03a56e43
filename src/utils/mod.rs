mod chunks;

pub use chunks::Chunks;

cfg_if::cfg_if! {
    if #[cfg(feature = "variable_time_eq")] {
        #[inline(always)]
        pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
            a == b
        }
    } else {
        #[inline(always)]
        pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
            if a.len() != b.len() {
                return false;
            }

            let mut x = 0u8;

            for i in 0..a.len() {
                x |= a[i] ^ b[i];
            }

            x == 0
        }
    }
}

/// Reinterprets `N` elements of `slice` starting at `index` as an array.
///
/// # Safety
/// `index + N` must not exceed `slice.len()`.
#[inline(always)]
pub(crate) const unsafe fn slice_to_array_at<T, const N: usize>(slice: &[T], index: usize) -> &[T; N] {
    &*(slice.as_ptr().add(index) as *const [T; N])
}

/// Reads a little-endian `u32` from the first four bytes of `src`.
/// Byte order is fixed by the shifts, not by the host CPU.
#[inline(always)]
pub const fn load_le_u32(src: &[u8; 4]) -> u32 {
    (src[0] as u32)
        | ((src[1] as u32) << 8)
        | ((src[2] as u32) << 16)
        | ((src[3] as u32) << 24)
}

/// Writes `value` into `dst` low byte first.
#[inline(always)]
pub fn store_le_u32(dst: &mut [u8; 4], value: u32) {
    dst[0] = value as u8;
    dst[1] = (value >> 8) as u8;
    dst[2] = (value >> 16) as u8;
    dst[3] = (value >> 24) as u8;
}

/// Writes `value` into `dst` low byte first.
#[inline(always)]
pub fn store_le_u64(dst: &mut [u8; 8], value: u64) {
    let mut i = 0;
    while i < 8 {
        dst[i] = (value >> (8 * i)) as u8;
        i += 1;
    }
}

/// Bitwise merge two values using a mask. If the mask bit is set, the
/// corresponding bit in 'b' is used, otherwise the corresponding bit in 'a'
/// is used.
#[inline(always)]
pub const fn merge_bits(a: u32, b: u32, mask: u32) -> u32 {
    // (a & !mask) | (b & mask), the two halves never share a bit
    (a & !mask).wrapping_add(b & mask)
}

/// Converts a size in bytes to a human-readable string.
pub fn human_readable_size(size: u64) -> String {
    let mut cal_size = size;
    let mut unit = 0;
    while cal_size >= 1024 {
        cal_size >>= 10;
        unit += 1;
    }
    let unit = match unit {
        0 => "B",
        1 => "KiB",
        2 => "MiB",
        3 => "GiB",
        4 => "TiB",
        5 => "PiB",
        _ => "EiB",
    };
    format!("{} {}", cal_size, unit)
}
