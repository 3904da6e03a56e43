// HMAC: Keyed-Hashing for Message Authentication
// https://tools.ietf.org/html/rfc2104

use super::hash::md5::Md5;
use crate::Result;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5C;

#[derive(Clone, Copy)]
pub struct HmacMd5 {
    okey: [u8; Self::BLOCK_LEN],
    hasher: Md5,
}

impl HmacMd5 {
    pub const BLOCK_LEN: usize = Md5::BLOCK_LEN;
    pub const TAG_LEN: usize = Md5::DIGEST_LEN;

    /// Keys longer than one block are replaced by their digest.
    pub fn new(key: &[u8]) -> Result<Self> {
        // H(K XOR opad, H(K XOR ipad, text))
        let mut ikey = [0u8; Self::BLOCK_LEN];
        let mut okey = [0u8; Self::BLOCK_LEN];

        if key.len() > Self::BLOCK_LEN {
            let hkey = Md5::oneshot(key)?;

            ikey[..Self::TAG_LEN].copy_from_slice(&hkey);
            okey[..Self::TAG_LEN].copy_from_slice(&hkey);
        } else {
            ikey[..key.len()].copy_from_slice(key);
            okey[..key.len()].copy_from_slice(key);
        }

        for idx in 0..Self::BLOCK_LEN {
            ikey[idx] ^= IPAD;
            okey[idx] ^= OPAD;
        }

        let mut hasher = Md5::new();
        hasher.absorb(&ikey);

        Ok(Self { okey, hasher })
    }

    #[inline(always)]
    pub fn update(&mut self, m: &[u8]) -> Result<()> {
        self.hasher.update(m)
    }

    #[inline(always)]
    pub fn finalize(self) -> [u8; Self::TAG_LEN] {
        let h1 = self.hasher.finalize();

        let mut hasher = Md5::new();
        hasher.absorb(&self.okey);
        hasher.absorb(&h1);

        hasher.finalize()
    }

    /// Compares the computed tag against `tag` without early exit.
    pub fn verify(self, tag: &[u8]) -> bool {
        crate::utils::constant_time_eq(&self.finalize(), tag)
    }

    #[inline(always)]
    pub fn oneshot(key: &[u8], m: &[u8]) -> Result<[u8; Self::TAG_LEN]> {
        let mut mac = Self::new(key)?;
        mac.update(m)?;
        Ok(mac.finalize())
    }
}
