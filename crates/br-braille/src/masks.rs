//! Mask ↔ glyph bit tables for the Unicode Braille block (U+2800).
//!
//! Two bit layouts meet here. The dot mask is row-major within the cell
//! (see `br_core::cell`); the Unicode code point numbers dots column-first
//! with the bottom row appended last:
//!
//! ```text
//!   mask        glyph
//!  +---+---+   +---+---+
//!  | 0 | 1 |   | 0 | 3 |
//!  | 2 | 3 |   | 1 | 4 |
//!  | 4 | 5 |   | 2 | 5 |
//!  | 6 | 7 |   | 6 | 7 |
//!  +---+---+   +---+---+
//! ```

/// Braille base codepoint (U+2800).
pub const BRAILLE_BASE: u32 = 0x2800;

/// Blank cell, no dot raised.
pub const BRAILLE_BLANK: char = '\u{2800}';

/// Mask bit → glyph bit.
pub const MASK_TO_GLYPH_BIT: [u8; 8] = [0, 3, 1, 4, 2, 5, 6, 7];

/// Glyph bit → mask bit, inverse of [`MASK_TO_GLYPH_BIT`].
pub const GLYPH_TO_MASK_BIT: [u8; 8] = [0, 2, 4, 1, 3, 5, 6, 7];

const fn remap(bits: u8, table: &[u8; 8]) -> u8 {
    let mut out = 0u8;
    let mut i = 0;
    while i < 8 {
        if bits & (1 << i) != 0 {
            out |= 1 << table[i];
        }
        i += 1;
    }
    out
}

const fn build_lut(table: &[u8; 8]) -> [u8; 256] {
    let mut lut = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        lut[i] = remap(i as u8, table);
        i += 1;
    }
    lut
}

static MASK_TO_GLYPH: [u8; 256] = build_lut(&MASK_TO_GLYPH_BIT);
static GLYPH_TO_MASK: [u8; 256] = build_lut(&GLYPH_TO_MASK_BIT);

/// Dot mask → glyph bits.
///
/// # Example
/// ```
/// use br_braille::masks::encode_glyph_bits;
/// // left column lit: mask bits 0,2,4,6 → glyph bits 0,1,2,6
/// assert_eq!(encode_glyph_bits(0b0101_0101), 0b0100_0111);
/// ```
#[inline(always)]
#[must_use]
pub fn encode_glyph_bits(mask: u8) -> u8 {
    MASK_TO_GLYPH[mask as usize]
}

/// Glyph bits → dot mask.
///
/// # Example
/// ```
/// use br_braille::masks::decode_glyph_bits;
/// assert_eq!(decode_glyph_bits(0b0000_1000), 0b0000_0010);
/// ```
#[inline(always)]
#[must_use]
pub fn decode_glyph_bits(glyph: u8) -> u8 {
    GLYPH_TO_MASK[glyph as usize]
}

/// Map des bits glyphe vers le caractère Braille `U+2800 + bits`.
#[must_use]
#[inline(always)]
pub const fn get_braille_char(glyph_bits: u8) -> char {
    match char::from_u32(BRAILLE_BASE | glyph_bits as u32) {
        Some(c) => c,
        None => BRAILLE_BLANK,
    }
}

/// Dot mask → Braille character.
///
/// # Example
/// ```
/// use br_braille::masks::mask_to_char;
/// assert_eq!(mask_to_char(0), '\u{2800}');
/// assert_eq!(mask_to_char(0xFF), '\u{28FF}');
/// assert_eq!(mask_to_char(0b10), '\u{2808}');
/// ```
#[inline(always)]
#[must_use]
pub fn mask_to_char(mask: u8) -> char {
    get_braille_char(encode_glyph_bits(mask))
}

/// Low byte of the code point, read as glyph bits.
///
/// Any character is accepted; outside the Braille block the result is
/// whatever its low byte happens to be.
#[inline(always)]
#[must_use]
pub fn glyph_bits(ch: char) -> u8 {
    (u32::from(ch) & 0xFF) as u8
}

/// Braille character → dot mask, lenient on non-Braille input.
#[inline(always)]
#[must_use]
pub fn char_to_mask(ch: char) -> u8 {
    decode_glyph_bits(glyph_bits(ch))
}

/// `true` for U+2800..=U+28FF.
#[inline]
#[must_use]
pub fn is_braille(ch: char) -> bool {
    (BRAILLE_BASE..=BRAILLE_BASE | 0xFF).contains(&u32::from(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_inverse_permutations() {
        for (mask_bit, &glyph_bit) in MASK_TO_GLYPH_BIT.iter().enumerate() {
            assert_eq!(GLYPH_TO_MASK_BIT[glyph_bit as usize] as usize, mask_bit);
        }
        let mut seen = MASK_TO_GLYPH_BIT;
        seen.sort_unstable();
        assert_eq!(seen, [0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn glyph_remap_is_a_bijection() {
        for m in 0..=255u8 {
            assert_eq!(decode_glyph_bits(encode_glyph_bits(m)), m);
            assert_eq!(encode_glyph_bits(decode_glyph_bits(m)), m);
        }
    }

    #[test]
    fn single_dots_follow_unicode_numbering() {
        // (x, y) → Unicode dot number 1..=8
        let expected = [
            ((0, 0), '⠁'),
            ((0, 1), '⠂'),
            ((0, 2), '⠄'),
            ((1, 0), '⠈'),
            ((1, 1), '⠐'),
            ((1, 2), '⠠'),
            ((0, 3), '⡀'),
            ((1, 3), '⢀'),
        ];
        for ((x, y), ch) in expected {
            assert_eq!(mask_to_char(br_core::cell::mask_bit(x, y)), ch, "dot ({x},{y})");
        }
    }

    #[test]
    fn columns() {
        assert_eq!(mask_to_char(0b0101_0101), '⡇');
        assert_eq!(mask_to_char(0b1010_1010), '⢸');
    }

    #[test]
    fn chars_decode_back_to_masks() {
        for m in 0..=255u8 {
            let ch = mask_to_char(m);
            assert!(is_braille(ch));
            assert_eq!(char_to_mask(ch), m);
        }
    }

    #[test]
    fn lenient_low_byte() {
        // 'A' = U+0041: low byte 0x41 read as glyph bits 0 and 6
        assert!(!is_braille('A'));
        assert_eq!(glyph_bits('A'), 0x41);
        assert_eq!(char_to_mask('A'), 0b0100_0001);
        assert_eq!(glyph_bits('\u{1F600}'), 0x00);
    }
}
