//! Braille text → two-tone raster.
//!
//! Only the glyph step is inverted: every dot becomes an opaque white pixel,
//! every blank dot an opaque black one. Photometric decisions are lossy and
//! cannot be undone.

use br_core::cell::{
    DOTS_PER_CELL, DOTS_PER_CELL_X, DOTS_PER_CELL_Y, grid_pixel_size, mask_bit_position,
};
use br_core::config::ParseMode;
use br_core::error::CoreError;
use br_core::frame::{FrameBuffer, OPAQUE_BLACK, OPAQUE_WHITE};

use crate::masks;

/// Raster size implied by a text block: `(max chars × 2, (lines - 1) × 4)`.
///
/// The line after the final newline counts toward `lines`, so a block
/// ending in `\n` maps exactly onto its rows.
///
/// # Example
/// ```
/// use br_braille::decoder::text_pixel_size;
/// assert_eq!(text_pixel_size("⣿⣿\n⣿\n"), (4, 8));
/// assert_eq!(text_pixel_size(""), (0, 0));
/// ```
#[must_use]
pub fn text_pixel_size(text: &str) -> (u32, u32) {
    let mut lines = 0u32;
    let mut cols = 0usize;
    for line in text.split('\n') {
        lines = lines.saturating_add(1);
        cols = cols.max(line.chars().count());
    }
    let cols = u32::try_from(cols).unwrap_or(u32::MAX);
    grid_pixel_size(cols, lines.saturating_sub(1))
}

/// Paint one cell's mask at cell `(col, row)`. Pixels outside `frame` are
/// dropped.
fn paint_cell(frame: &mut FrameBuffer, col: u32, row: u32, mask: u8) {
    let x0 = col.saturating_mul(DOTS_PER_CELL_X);
    let y0 = row.saturating_mul(DOTS_PER_CELL_Y);
    for bit in 0..DOTS_PER_CELL as u8 {
        let (dx, dy) = mask_bit_position(bit);
        let rgba = if mask & (1 << bit) != 0 {
            OPAQUE_WHITE
        } else {
            OPAQUE_BLACK
        };
        frame.set_pixel(x0.saturating_add(dx), y0.saturating_add(dy), rgba);
    }
}

/// Rebuild a raster from a Braille text block.
///
/// Lines split on `\n`; width is the longest line in code points. Short
/// lines leave black pixels. Glyphs after the last newline fall outside
/// the raster and are dropped.
///
/// In [`ParseMode::Lenient`] every character contributes the low byte of
/// its code point as glyph bits. In [`ParseMode::Strict`] anything outside
/// U+2800..=U+28FF is rejected.
///
/// # Errors
/// [`CoreError::InvalidGlyph`] in strict mode only.
///
/// # Example
/// ```
/// use br_braille::decoder::decode_text;
/// use br_core::config::ParseMode;
/// let img = decode_text("⣿\n", ParseMode::Lenient).unwrap();
/// assert_eq!((img.width, img.height), (2, 4));
/// assert_eq!(img.pixel(1, 3), (255, 255, 255, 255));
/// ```
pub fn decode_text(text: &str, mode: ParseMode) -> Result<FrameBuffer, CoreError> {
    let (width, height) = text_pixel_size(text);
    let mut frame = FrameBuffer::filled(width, height, OPAQUE_BLACK);

    for (row, line) in text.split('\n').enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if mode == ParseMode::Strict && !masks::is_braille(ch) {
                return Err(CoreError::InvalidGlyph {
                    line: row,
                    column: col,
                    ch,
                });
            }
            let (Ok(col), Ok(row)) = (u32::try_from(col), u32::try_from(row)) else {
                continue;
            };
            paint_cell(&mut frame, col, row, masks::char_to_mask(ch));
        }
    }

    log::debug!("parsed {width}×{height} px from text ({mode:?})");
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{DotParams, render};

    fn all_pixels(frame: &FrameBuffer) -> impl Iterator<Item = (u8, u8, u8, u8)> + '_ {
        frame
            .data
            .chunks_exact(4)
            .map(|p| (p[0], p[1], p[2], p[3]))
    }

    #[test]
    fn full_cell_is_all_white() {
        let img = decode_text("⣿\n", ParseMode::Lenient).unwrap();
        assert_eq!((img.width, img.height), (2, 4));
        assert!(all_pixels(&img).all(|p| p == OPAQUE_WHITE));
    }

    #[test]
    fn blank_cell_is_all_black() {
        let img = decode_text("⠀\n", ParseMode::Lenient).unwrap();
        assert_eq!((img.width, img.height), (2, 4));
        assert!(all_pixels(&img).all(|p| p == OPAQUE_BLACK));
    }

    #[test]
    fn each_dot_lands_on_its_pixel() {
        // U+2808 is dot 4: top right
        let img = decode_text("⠈\n", ParseMode::Lenient).unwrap();
        for y in 0..4 {
            for x in 0..2 {
                let expected = if (x, y) == (1, 0) {
                    OPAQUE_WHITE
                } else {
                    OPAQUE_BLACK
                };
                assert_eq!(img.pixel(x, y), expected, "pixel ({x},{y})");
            }
        }
        // U+2840 is dot 7: bottom left
        let img = decode_text("⡀\n", ParseMode::Lenient).unwrap();
        assert_eq!(img.pixel(0, 3), OPAQUE_WHITE);
        assert_eq!(img.pixel(1, 3), OPAQUE_BLACK);
    }

    #[test]
    fn ragged_lines_are_padded_black() {
        let img = decode_text("⣿⣿⣿\n⣿\n", ParseMode::Lenient).unwrap();
        assert_eq!((img.width, img.height), (6, 8));
        assert_eq!(img.pixel(5, 0), OPAQUE_WHITE);
        assert_eq!(img.pixel(1, 7), OPAQUE_WHITE);
        assert_eq!(img.pixel(2, 4), OPAQUE_BLACK);
        assert_eq!(img.pixel(5, 7), OPAQUE_BLACK);
    }

    #[test]
    fn unterminated_last_line_is_dropped() {
        let img = decode_text("⣿\n⣿", ParseMode::Lenient).unwrap();
        assert_eq!((img.width, img.height), (2, 4));
        let img = decode_text("⣿", ParseMode::Lenient).unwrap();
        assert_eq!((img.width, img.height), (2, 0));
        assert!(img.data.is_empty());
    }

    #[test]
    fn empty_text_is_empty_image() {
        let img = decode_text("", ParseMode::Strict).unwrap();
        assert!(img.is_empty());
    }

    #[test]
    fn lenient_reads_low_byte() {
        // 'A' = 0x41: glyph bits 0 and 6, pixels (0,0) and (0,3)
        let img = decode_text("A\n", ParseMode::Lenient).unwrap();
        assert_eq!(img.pixel(0, 0), OPAQUE_WHITE);
        assert_eq!(img.pixel(0, 3), OPAQUE_WHITE);
        assert_eq!(img.pixel(1, 0), OPAQUE_BLACK);
        assert_eq!(img.pixel(0, 1), OPAQUE_BLACK);
    }

    #[test]
    fn strict_rejects_foreign_glyphs() {
        let err = decode_text("⣿⣿\n⣿x\n", ParseMode::Strict).unwrap_err();
        match err {
            CoreError::InvalidGlyph { line, column, ch } => {
                assert_eq!((line, column, ch), (1, 1, 'x'));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(decode_text("⣿\r\n", ParseMode::Strict).is_err());
        assert!(decode_text("⣿\r\n", ParseMode::Lenient).is_ok());
    }

    #[test]
    fn pixel_size_matches_grid_geometry() {
        let text = "⣿⣿⣿\n⣿\n⣿⣿\n";
        assert_eq!(text_pixel_size(text), grid_pixel_size(3, 3));
    }

    #[test]
    fn width_counts_code_points_not_bytes() {
        assert_eq!(text_pixel_size("⣿⣿\n"), (4, 4));
        assert_eq!(text_pixel_size("\n\n"), (0, 8));
    }

    #[test]
    fn encode_decode_encode_is_stable_on_two_tone_input() {
        let mut fb = FrameBuffer::filled(6, 8, OPAQUE_BLACK);
        for (x, y) in [(0, 0), (1, 1), (2, 5), (5, 7), (3, 3), (4, 0)] {
            fb.set_pixel(x, y, OPAQUE_WHITE);
        }
        let params = DotParams {
            threshold: 128,
            invert: false,
            contrast: 0,
        };
        let text = render(fb.clone(), 3, 2, &params, None);
        let decoded = decode_text(&text, ParseMode::Strict).unwrap();
        assert_eq!(decoded, fb);
        assert_eq!(render(decoded, 3, 2, &params, None), text);
    }
}
