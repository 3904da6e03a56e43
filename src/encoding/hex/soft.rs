use super::LUT_DATA;

#[inline(always)]
pub(crate) fn encode_byte(input: u8, output: &mut [u8; 2]) {
    output[0] = LUT_DATA[(input >> 4) as usize];
    output[1] = LUT_DATA[(input & 0x0F) as usize];
}

/// `output` must be exactly twice as long as `input`.
pub(crate) fn encode(input: &[u8], output: &mut [u8]) {
    debug_assert_eq!(output.len(), input.len() * 2);

    for (byte, out) in input.iter().zip(output.chunks_exact_mut(2)) {
        // SAFETY: chunks_exact_mut yields 2-byte chunks
        let out_block = unsafe { &mut *(out.as_mut_ptr() as *mut [u8; 2]) };
        encode_byte(*byte, out_block);
    }
}
