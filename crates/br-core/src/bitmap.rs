//! Bitmap container: cell grid, dot masks and the pixel buffer behind them.

use crate::cell::{self, DOTS_PER_CELL_X, DOTS_PER_CELL_Y};
use crate::frame::FrameBuffer;

/// Owns one render's cell grid and the pixels it samples.
///
/// `dots[row * cols + col]` is the mask of cell `(col, row)`, bit layout as
/// in [`cell`]. Masks start at zero and are only ever OR-ed into.
///
/// # Example
/// ```
/// use br_core::bitmap::BrailleBitmap;
/// use br_core::frame::FrameBuffer;
/// let mut bitmap = BrailleBitmap::new(2, 1, FrameBuffer::new(4, 4));
/// bitmap.set_dot(3, 3);
/// assert_eq!(bitmap.mask(1, 0), Some(0b1000_0000));
/// ```
#[derive(Clone, Debug)]
pub struct BrailleBitmap {
    cols: u32,
    rows: u32,
    pixels: FrameBuffer,
    dots: Vec<u8>,
}

impl BrailleBitmap {
    /// Build an empty-mask grid of `cols × rows` cells over `pixels`.
    ///
    /// `pixels` need not match the grid; uncovered cells stay blank and
    /// pixels past the grid are never read.
    #[must_use]
    pub fn new(cols: u32, rows: u32, pixels: FrameBuffer) -> Self {
        Self {
            cols,
            rows,
            pixels,
            dots: vec![0u8; cols as usize * rows as usize],
        }
    }

    /// Cells per line.
    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Lines of cells.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Source pixels.
    #[must_use]
    pub fn pixels(&self) -> &FrameBuffer {
        &self.pixels
    }

    /// Source pixels, mutable (contrast is applied in place).
    pub fn pixels_mut(&mut self) -> &mut FrameBuffer {
        &mut self.pixels
    }

    /// All masks, row-major.
    #[must_use]
    pub fn dots(&self) -> &[u8] {
        &self.dots
    }

    /// Masks of one line of cells, empty slice past the last row.
    #[must_use]
    pub fn row_masks(&self, row: u32) -> &[u8] {
        if row >= self.rows {
            return &[];
        }
        let start = row as usize * self.cols as usize;
        &self.dots[start..start + self.cols as usize]
    }

    /// Pixel area actually sampled: the source clipped to the grid.
    ///
    /// # Example
    /// ```
    /// use br_core::bitmap::BrailleBitmap;
    /// use br_core::frame::FrameBuffer;
    /// let bitmap = BrailleBitmap::new(3, 1, FrameBuffer::new(10, 2));
    /// assert_eq!(bitmap.covered_size(), (6, 2));
    /// ```
    #[must_use]
    pub fn covered_size(&self) -> (u32, u32) {
        let (grid_w, grid_h) = cell::grid_pixel_size(self.cols, self.rows);
        (self.pixels.width.min(grid_w), self.pixels.height.min(grid_h))
    }

    /// Luminance at `(x, y)`, `None` outside the source buffer.
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> Option<u8> {
        self.pixels
            .get(x, y)
            .map(|(r, g, b, _)| crate::photometric::luminance(r, g, b))
    }

    #[inline(always)]
    fn cell_index(&self, col: u32, row: u32) -> Option<usize> {
        (col < self.cols && row < self.rows)
            .then(|| row as usize * self.cols as usize + col as usize)
    }

    /// Mask of cell `(col, row)`.
    #[must_use]
    pub fn mask(&self, col: u32, row: u32) -> Option<u8> {
        self.cell_index(col, row).map(|i| self.dots[i])
    }

    /// Light the dot for pixel `(x, y)`. Returns `false` outside the grid.
    #[inline(always)]
    pub fn set_dot(&mut self, x: u32, y: u32) -> bool {
        match self.cell_index(x / DOTS_PER_CELL_X, y / DOTS_PER_CELL_Y) {
            Some(i) => {
                self.dots[i] |= cell::mask_bit(x, y);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_blank() {
        let bitmap = BrailleBitmap::new(4, 3, FrameBuffer::new(8, 12));
        assert_eq!(bitmap.dots().len(), 12);
        assert!(bitmap.dots().iter().all(|&m| m == 0));
    }

    #[test]
    fn degenerate_grid_is_legal() {
        let mut bitmap = BrailleBitmap::new(0, 0, FrameBuffer::new(5, 5));
        assert!(bitmap.dots().is_empty());
        assert_eq!(bitmap.covered_size(), (0, 0));
        assert!(!bitmap.set_dot(0, 0));
        assert!(bitmap.row_masks(0).is_empty());
    }

    #[test]
    fn dots_land_in_their_cell() {
        let mut bitmap = BrailleBitmap::new(2, 2, FrameBuffer::new(4, 8));
        assert!(bitmap.set_dot(2, 4));
        assert!(bitmap.set_dot(3, 5));
        assert_eq!(bitmap.mask(1, 1), Some(0b0000_1001));
        assert_eq!(bitmap.mask(0, 0), Some(0));
        assert_eq!(bitmap.row_masks(1), &[0u8, 0b0000_1001]);
        assert!(!bitmap.set_dot(4, 0));
        assert!(!bitmap.set_dot(0, 8));
    }

    #[test]
    fn luminance_is_bounds_checked() {
        let bitmap = BrailleBitmap::new(1, 1, FrameBuffer::filled(2, 4, (255, 255, 255, 255)));
        assert_eq!(bitmap.luminance(1, 3), Some(255));
        assert_eq!(bitmap.luminance(2, 0), None);
    }

    #[test]
    fn huge_grid_covers_only_the_source() {
        let bitmap = BrailleBitmap::new(u32::MAX, 0, FrameBuffer::new(7, 3));
        assert!(bitmap.dots().is_empty());
        assert_eq!(bitmap.covered_size(), (7, 0));
        assert_eq!(bitmap.mask(5, 5), None);
    }
}
