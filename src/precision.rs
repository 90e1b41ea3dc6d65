use rgb::RGB8;

/// Mask keeping the `keep_bits` most significant bits of a channel.
///
/// `keep_bits` must already be validated to 1..=8.
pub fn channel_mask(keep_bits: u32) -> u8 {
    ((0xFFu32 << (8 - keep_bits)) & 0xFF) as u8
}

/// Zero the low `8 - keep_bits` bits of every channel.
pub fn mask_pixels(pixels: &[RGB8], keep_bits: u32) -> Vec<RGB8> {
    let mask = channel_mask(keep_bits);
    pixels
        .iter()
        .map(|p| RGB8::new(p.r & mask, p.g & mask, p.b & mask))
        .collect()
}
