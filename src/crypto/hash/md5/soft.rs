use super::padding::{self, MAX_TAIL_LEN};
use super::{BLOCK_LEN, DIGEST_LEN, INITIAL_STATE, K64, S64};
use crate::error::{Error, Result};
use crate::utils::{load_le_u32, merge_bits, slice_to_array_at, store_le_u32};

/// The four 32-bit accumulators carried from block to block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashState([u32; 4]);

impl HashState {
    #[inline(always)]
    pub const fn new() -> Self {
        Self(INITIAL_STATE)
    }

    #[inline(always)]
    pub const fn words(&self) -> [u32; 4] {
        self.0
    }

    /// Serializes A, B, C, D in that order, each little-endian.
    #[inline]
    pub fn to_bytes(&self) -> [u8; DIGEST_LEN] {
        let mut output = [0u8; DIGEST_LEN];
        let mut bytes = [0u8; 4];
        for (i, word) in self.0.iter().enumerate() {
            store_le_u32(&mut bytes, *word);
            output[4 * i..4 * i + 4].copy_from_slice(&bytes);
        }
        output
    }
}

impl Default for HashState {
    fn default() -> Self {
        Self::new()
    }
}

/// The four 16-round phases of the compression function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    F,
    G,
    H,
    I,
}

impl Phase {
    const ALL: [Phase; 4] = [Phase::F, Phase::G, Phase::H, Phase::I];

    #[inline(always)]
    fn mix(self, b: u32, c: u32, d: u32) -> u32 {
        match self {
            // (b & c) | (!b & d)
            Phase::F => merge_bits(d, c, b),
            // (d & b) | (!d & c)
            Phase::G => merge_bits(c, b, d),
            Phase::H => b ^ c ^ d,
            Phase::I => c ^ (b | !d),
        }
    }

    /// Message word consumed by global round `i`.
    #[inline(always)]
    fn word_index(self, i: usize) -> usize {
        match self {
            Phase::F => i,
            Phase::G => (5 * i + 1) % 16,
            Phase::H => (3 * i + 5) % 16,
            Phase::I => (7 * i) % 16,
        }
    }
}

/// Runs the 64 rounds over one block and adds the result into `state`.
#[inline]
pub fn compress(state: &mut HashState, block: &[u8; BLOCK_LEN]) {
    let mut w = [0u32; 16];
    crate::const_loop!(j, 0, 16, {
        // SAFETY: 4 * j + 4 <= BLOCK_LEN for j < 16
        w[j] = load_le_u32(unsafe { slice_to_array_at(block, 4 * j) });
    });

    let [mut a, mut b, mut c, mut d] = state.0;

    for (p, phase) in Phase::ALL.into_iter().enumerate() {
        for r in 0..16 {
            let i = 16 * p + r;
            let f = phase.mix(b, c, d);
            let temp = d;
            d = c;
            c = b;
            b = b.wrapping_add(
                a.wrapping_add(f)
                    .wrapping_add(K64[i])
                    .wrapping_add(w[phase.word_index(i)])
                    .rotate_left(S64[i]),
            );
            a = temp;
        }
    }

    state.0[0] = state.0[0].wrapping_add(a);
    state.0[1] = state.0[1].wrapping_add(b);
    state.0[2] = state.0[2].wrapping_add(c);
    state.0[3] = state.0[3].wrapping_add(d);
}

/// Compresses every block of `data` in order.
///
/// # Panics
/// If `data.len()` is not a multiple of [`BLOCK_LEN`].
#[inline]
pub fn compress_blocks(state: &mut HashState, data: &[u8]) {
    for block in super::blocks(data) {
        compress(state, block);
    }
}

/// Incremental MD5 context.
///
/// Input is absorbed a block at a time; only the trailing partial block is
/// buffered, so the padded message is never materialized.
#[derive(Clone, Copy, Debug)]
pub struct Md5 {
    state: HashState,
    buffer: [u8; BLOCK_LEN],
    /// Bytes already folded into `state`.
    len: u64,
    /// Bytes pending in `buffer`.
    offset: usize,
}

impl Md5 {
    pub const BLOCK_LEN: usize = BLOCK_LEN;
    pub const DIGEST_LEN: usize = DIGEST_LEN;

    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            state: HashState::new(),
            buffer: [0; BLOCK_LEN],
            len: 0,
            offset: 0,
        }
    }

    /// Total number of bytes absorbed so far.
    #[inline(always)]
    pub const fn len(&self) -> u64 {
        self.len + self.offset as u64
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absorbs `data`.
    ///
    /// Fails with [`Error::LengthOverflow`] if the total message would no
    /// longer fit the 64-bit length field; the context is left untouched.
    #[inline]
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        let total = self
            .len()
            .checked_add(data.len() as u64)
            .ok_or(Error::LengthOverflow { len: u64::MAX })?;
        padding::bit_length(total)?;

        self.absorb(data);
        Ok(())
    }

    /// Absorbs `data` without checking the running length.
    #[inline]
    pub(crate) fn absorb(&mut self, mut data: &[u8]) {
        if self.offset > 0 {
            let take = core::cmp::min(BLOCK_LEN - self.offset, data.len());
            self.buffer[self.offset..self.offset + take].copy_from_slice(&data[..take]);
            self.offset += take;
            data = &data[take..];

            if self.offset == BLOCK_LEN {
                compress(&mut self.state, &self.buffer);
                self.len += BLOCK_LEN as u64;
                self.offset = 0;
            }
        }

        let full = data.len() - data.len() % BLOCK_LEN;
        compress_blocks(&mut self.state, &data[..full]);
        self.len += full as u64;

        let rest = &data[full..];
        if !rest.is_empty() {
            self.buffer[..rest.len()].copy_from_slice(rest);
            self.offset = rest.len();
        }
    }

    /// Pads the absorbed message and returns its digest.
    #[inline]
    pub fn finalize(self) -> [u8; DIGEST_LEN] {
        let mlen = self.len();
        // update() keeps mlen below 2^61
        let mlen_bits = mlen.wrapping_mul(8);

        let mut suffix = [0u8; MAX_TAIL_LEN];
        let n = padding::write_tail(mlen, mlen_bits, &mut suffix);

        let mut last = [0u8; 2 * BLOCK_LEN];
        last[..self.offset].copy_from_slice(&self.buffer[..self.offset]);
        last[self.offset..self.offset + n].copy_from_slice(&suffix[..n]);

        let mut state = self.state;
        compress_blocks(&mut state, &last[..self.offset + n]);

        crate::trace::trace_finalize(mlen);
        state.to_bytes()
    }

    #[inline(always)]
    pub fn oneshot<T: AsRef<[u8]>>(data: T) -> Result<[u8; DIGEST_LEN]> {
        let mut md5 = Self::new();
        md5.update(data.as_ref())?;
        Ok(md5.finalize())
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5() {
        assert_eq!(
            Md5::oneshot(b"").unwrap(),
            [
                0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04,
                0xe9, 0x80, 0x09, 0x98, 0xec, 0xf8, 0x42, 0x7e
            ],
        );
        assert_eq!(
            Md5::oneshot(b"hello world").unwrap(),
            [
                0x5e, 0xb6, 0x3b, 0xbb, 0xe0, 0x1e, 0xee, 0xd0,
                0x93, 0xcb, 0x22, 0xbb, 0x8f, 0x5a, 0xcd, 0xc3,
            ],
        );
        assert_eq!(
            Md5::oneshot(b"1234567890123456789012345678901234567890").unwrap(),
            [
                0xf5, 0xbf, 0x3e, 0x98, 0x44, 0x32, 0xae, 0x6f,
                0x9f, 0x98, 0x84, 0x09, 0x51, 0xe5, 0xce, 0xf3,
            ],
        );
        let random_data = (0..1000).map(|_| rand::random::<u8>()).collect::<Vec<u8>>();
        for _ in 0..100 {
            let length = (rand::random::<u32>() % 1000) as usize;
            let data = &random_data[..length];
            assert_eq!(
                Md5::oneshot(data).unwrap(),
                md5::compute(data).0,
                "Failed for data length: {}",
                length
            );
        }
    }

    #[test]
    fn test_split_updates() {
        let data = (0..200).map(|_| rand::random::<u8>()).collect::<Vec<u8>>();
        let expected = md5::compute(&data).0;
        for split in 0..data.len() {
            let mut md5 = Md5::new();
            md5.update(&data[..split]).unwrap();
            md5.update(&data[split..]).unwrap();
            assert_eq!(md5.len(), data.len() as u64);
            assert_eq!(md5.finalize(), expected, "split at {}", split);
        }

        let mut md5 = Md5::new();
        for byte in &data {
            md5.update(core::slice::from_ref(byte)).unwrap();
        }
        assert_eq!(md5.finalize(), expected);
    }

    #[test]
    fn test_fork_shared_prefix() {
        let mut prefix = Md5::new();
        prefix.update(b"message ").unwrap();
        let mut a = prefix;
        a.update(b"digest").unwrap();
        let mut b = prefix;
        b.update(b"digest!").unwrap();
        assert_eq!(a.finalize(), md5::compute(b"message digest").0);
        assert_eq!(b.finalize(), md5::compute(b"message digest!").0);
    }

    #[test]
    fn test_compress_single_block() {
        // "abc" padded by hand
        let mut block = [0u8; BLOCK_LEN];
        block[..3].copy_from_slice(b"abc");
        block[3] = 0x80;
        block[56] = 24;

        let mut state = HashState::new();
        compress(&mut state, &block);
        assert_eq!(state.to_bytes(), md5::compute(b"abc").0);
        assert_eq!(state.words()[0], u32::from_le_bytes([0x90, 0x01, 0x50, 0x98]));
    }

    #[test]
    #[should_panic(expected = "not block aligned")]
    fn test_compress_blocks_misaligned() {
        let mut state = HashState::new();
        compress_blocks(&mut state, &[0u8; 100]);
    }

    #[test]
    fn test_phase_functions() {
        for _ in 0..1000 {
            let (b, c, d) = (rand::random::<u32>(), rand::random::<u32>(), rand::random::<u32>());
            assert_eq!(Phase::F.mix(b, c, d), (b & c) | (!b & d));
            assert_eq!(Phase::G.mix(b, c, d), (d & b) | (!d & c));
            assert_eq!(Phase::H.mix(b, c, d), b ^ c ^ d);
            assert_eq!(Phase::I.mix(b, c, d), c ^ (b | !d));
        }
        assert_eq!(Phase::G.word_index(16), 1);
        assert_eq!(Phase::H.word_index(32), 5);
        assert_eq!(Phase::I.word_index(48), 0);
    }

    #[test]
    fn test_length_overflow() {
        let limit = u64::MAX / 8;

        let mut md5 = Md5::new();
        md5.len = limit - 63;
        md5.update(&[0u8; 63]).unwrap();
        assert_eq!(md5.len(), limit);

        let before = md5;
        assert_eq!(md5.update(&[0u8]), Err(Error::LengthOverflow { len: limit + 1 }));
        assert_eq!(md5.len(), limit);
        assert_eq!(md5.finalize(), before.finalize());

        let mut md5 = Md5::new();
        md5.len = u64::MAX - 10;
        assert_eq!(md5.update(&[0u8; 16]), Err(Error::LengthOverflow { len: u64::MAX }));
    }
}
