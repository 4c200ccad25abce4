use br_core::bitmap::BrailleBitmap;
use br_core::config::RenderConfig;
use br_core::frame::FrameBuffer;
use br_core::photometric;
use br_core::traits::{DebugSink, DebugStage};

use crate::masks::mask_to_char;

/// Paramètres de décision des points pour un rendu.
///
/// # Example
/// ```
/// use br_braille::encoder::DotParams;
/// let params = DotParams::default();
/// assert_eq!(params.threshold, 85);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DotParams {
    /// Luminance cutoff, dot lit if `lum >= threshold`.
    pub threshold: u8,
    /// Mirror both luminance and threshold before comparing.
    pub invert: bool,
    /// Contrast amount, 0 skips the curve.
    pub contrast: i32,
}

impl Default for DotParams {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for DotParams {
    fn from(config: &RenderConfig) -> Self {
        Self {
            threshold: config.threshold,
            invert: config.invert,
            contrast: config.contrast,
        }
    }
}

/// Decide every covered pixel and light its dot.
///
/// Scans the source row-major, clipped to the grid. With a sink, a
/// greyscale luminance image the size of the source is captured.
/// Returns the number of lit dots.
pub fn fill_dots(
    bitmap: &mut BrailleBitmap,
    threshold: u8,
    invert: bool,
    sink: Option<&mut dyn DebugSink>,
) -> usize {
    let (w, h) = bitmap.covered_size();
    let mut lum_image = sink
        .is_some()
        .then(|| FrameBuffer::new(bitmap.pixels().width, bitmap.pixels().height));
    let mut lit = 0usize;

    for y in 0..h {
        for x in 0..w {
            let Some(lum) = bitmap.luminance(x, y) else {
                continue;
            };
            if let Some(img) = lum_image.as_mut() {
                img.set_pixel(x, y, (lum, lum, lum, 255));
            }
            if photometric::decide_dot(lum, threshold, invert) && bitmap.set_dot(x, y) {
                lit += 1;
            }
        }
    }

    if let (Some(sink), Some(img)) = (sink, lum_image.as_ref()) {
        sink.capture(DebugStage::Luminance, img);
    }
    lit
}

/// Emit the grid as text: one line per cell row, each ended by `\n`.
///
/// # Example
/// ```
/// use br_core::bitmap::BrailleBitmap;
/// use br_core::frame::FrameBuffer;
/// use br_braille::encoder::to_text;
/// let bitmap = BrailleBitmap::new(3, 2, FrameBuffer::new(0, 0));
/// assert_eq!(to_text(&bitmap), "⠀⠀⠀\n⠀⠀⠀\n");
/// ```
#[must_use]
pub fn to_text(bitmap: &BrailleBitmap) -> String {
    // 3 bytes per Braille char in UTF-8, plus the newline
    let line_len = (bitmap.cols() as usize).saturating_mul(3).saturating_add(1);
    let mut out = String::with_capacity(line_len.saturating_mul(bitmap.rows() as usize));
    for row in 0..bitmap.rows() {
        out.extend(bitmap.row_masks(row).iter().map(|&m| mask_to_char(m)));
        out.push('\n');
    }
    out
}

/// Render `pixels` onto a `cols × rows` cell grid.
///
/// Contrast (if non-zero) is applied to the whole buffer first, then dots
/// are decided and the text block emitted. The output always has `rows`
/// lines of `cols` characters, whatever the buffer size.
///
/// # Example
/// ```
/// use br_core::frame::FrameBuffer;
/// use br_braille::encoder::{render, DotParams};
/// let white = FrameBuffer::filled(2, 4, (255, 255, 255, 255));
/// let params = DotParams { threshold: 0, invert: false, contrast: 0 };
/// assert_eq!(render(white, 1, 1, &params, None), "⣿\n");
/// ```
#[must_use]
pub fn render(
    pixels: FrameBuffer,
    cols: u32,
    rows: u32,
    params: &DotParams,
    mut sink: Option<&mut dyn DebugSink>,
) -> String {
    let mut bitmap = BrailleBitmap::new(cols, rows, pixels);

    if params.contrast != 0 {
        photometric::apply_contrast_frame(bitmap.pixels_mut(), params.contrast);
        if let Some(sink) = sink.as_mut() {
            sink.capture(DebugStage::Contrast, bitmap.pixels());
        }
    }

    let lit = fill_dots(&mut bitmap, params.threshold, params.invert, sink);
    log::debug!(
        "{lit} dots lit over {cols}×{rows} cells from a {}×{} source",
        bitmap.pixels().width,
        bitmap.pixels().height
    );
    to_text(&bitmap)
}
