/// Splits a byte sequence into consecutive windows of `size` bytes.
///
/// Every window except possibly the last is exactly `size` bytes long;
/// windows never overlap and together cover the input once. An empty
/// input yields nothing.
#[derive(Clone, Debug)]
pub struct Chunks<'a> {
    data: &'a [u8],
    size: usize,
    offset: usize,
}

impl<'a> Chunks<'a> {
    /// # Panics
    /// If `size` is zero.
    pub fn new(data: &'a [u8], size: usize) -> Self {
        assert!(size != 0, "chunk size must be non-zero");
        Self { data, size, offset: 0 }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<&'a [u8]> {
        if self.offset >= self.data.len() {
            return None;
        }
        let end = core::cmp::min(self.offset + self.size, self.data.len());
        let chunk = &self.data[self.offset..end];
        self.offset = end;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remain = self.data.len() - self.offset;
        let n = remain.div_ceil(self.size);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Chunks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks() {
        let data: Vec<u8> = (0..10).collect();
        let chunks: Vec<&[u8]> = Chunks::new(&data, 4).collect();
        assert_eq!(chunks, vec![&[0, 1, 2, 3][..], &[4, 5, 6, 7][..], &[8, 9][..]]);

        assert_eq!(Chunks::new(&[], 64).count(), 0);
        assert_eq!(Chunks::new(&[0u8; 128], 64).len(), 2);
        assert_eq!(Chunks::new(&[0u8; 129], 64).len(), 3);
    }

    #[test]
    fn test_chunks_cover_input() {
        for _ in 0..100 {
            let len = (rand::random::<u32>() % 300) as usize;
            let size = (rand::random::<u32>() % 70) as usize + 1;
            let data: Vec<u8> = (0..len).map(|_| rand::random::<u8>()).collect();
            let joined: Vec<u8> = Chunks::new(&data, size).flatten().copied().collect();
            assert_eq!(joined, data);
            assert!(Chunks::new(&data, size).all(|c| c.len() <= size && !c.is_empty()));
        }
    }
}
