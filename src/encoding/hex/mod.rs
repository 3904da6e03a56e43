mod soft;

use crate::error::{Error, Result};

static LUT_DATA: [u8; 16] = *b"0123456789abcdef";

/// Encode input bytes into lowercase hex and write to output slice.
/// Returns the number of bytes written, always `2 * input.len()`.
pub fn encode_slice(input: &[u8], output: &mut [u8]) -> Result<usize> {
    let needed = input.len() * 2;
    if output.len() < needed {
        return Err(Error::OutputTooSmall { needed, got: output.len() });
    }
    soft::encode(input, &mut output[..needed]);
    Ok(needed)
}

pub fn encode(input: &[u8]) -> String {
    let mut output = vec![0u8; input.len() * 2];
    soft::encode(input, &mut output);
    // SAFETY: every byte written comes from LUT_DATA, which is ASCII
    unsafe { String::from_utf8_unchecked(output) }
}
