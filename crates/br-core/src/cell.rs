//! Geometry of a Braille cell.
//!
//! A cell covers 2×4 pixels. Inside the dot mask, bit `b` stands for the
//! pixel at `(b % 2, b / 2)`, so the mask is row-major within the cell:
//!
//! ```text
//!  0 1
//!  2 3
//!  4 5
//!  6 7
//! ```
//!
//! This is NOT the Unicode dot numbering; the remap to glyph bits lives in
//! `br_braille::masks`.

/// Pixels per cell, horizontally.
pub const DOTS_PER_CELL_X: u32 = 2;

/// Pixels per cell, vertically.
pub const DOTS_PER_CELL_Y: u32 = 4;

/// Dots in one cell.
pub const DOTS_PER_CELL: usize = (DOTS_PER_CELL_X * DOTS_PER_CELL_Y) as usize;

/// Pixel offset inside the cell → dot mask bit, indexed `[dy][dx]`.
pub const PIXEL_TO_MASK_BIT: [[u8; 2]; 4] = [[0, 1], [2, 3], [4, 5], [6, 7]];

/// Mask bit for the pixel at `(x, y)`, absolute coordinates.
///
/// # Example
/// ```
/// use br_core::cell::mask_bit;
/// assert_eq!(mask_bit(0, 0), 0b0000_0001);
/// assert_eq!(mask_bit(1, 0), 0b0000_0010);
/// assert_eq!(mask_bit(3, 7), 0b1000_0000);
/// ```
#[inline(always)]
#[must_use]
pub const fn mask_bit(x: u32, y: u32) -> u8 {
    let dx = (x % DOTS_PER_CELL_X) as usize;
    let dy = (y % DOTS_PER_CELL_Y) as usize;
    1 << PIXEL_TO_MASK_BIT[dy][dx]
}

/// Pixel offset `(dx, dy)` inside the cell for mask bit `bit` (0..8).
///
/// # Example
/// ```
/// use br_core::cell::mask_bit_position;
/// assert_eq!(mask_bit_position(5), (1, 2));
/// ```
#[inline(always)]
#[must_use]
pub const fn mask_bit_position(bit: u8) -> (u32, u32) {
    let b = bit as u32;
    (b % DOTS_PER_CELL_X, b / DOTS_PER_CELL_X)
}

/// Pixel dimensions covered by a `cols × rows` cell grid, saturating at
/// `u32::MAX`.
///
/// # Example
/// ```
/// use br_core::cell::grid_pixel_size;
/// assert_eq!(grid_pixel_size(80, 20), (160, 80));
/// assert_eq!(grid_pixel_size(u32::MAX, 0), (u32::MAX, 0));
/// ```
#[inline]
#[must_use]
pub const fn grid_pixel_size(cols: u32, rows: u32) -> (u32, u32) {
    (
        cols.saturating_mul(DOTS_PER_CELL_X),
        rows.saturating_mul(DOTS_PER_CELL_Y),
    )
}

/// Exact pixel dimensions of a `cols × rows` grid, `None` if either side
/// does not fit in a `u32`.
///
/// # Example
/// ```
/// use br_core::cell::checked_grid_pixel_size;
/// assert_eq!(checked_grid_pixel_size(3, 2), Some((6, 8)));
/// assert_eq!(checked_grid_pixel_size(1, u32::MAX), None);
/// ```
#[inline]
#[must_use]
pub const fn checked_grid_pixel_size(cols: u32, rows: u32) -> Option<(u32, u32)> {
    match (
        cols.checked_mul(DOTS_PER_CELL_X),
        rows.checked_mul(DOTS_PER_CELL_Y),
    ) {
        (Some(w), Some(h)) => Some((w, h)),
        _ => None,
    }
}
