//! Transformations photométriques : luminance, courbe de contraste, seuil.
//!
//! Pure functions over RGBA8 samples. Nothing here allocates except
//! [`apply_contrast_frame`], which rewrites a buffer in place.

use crate::frame::FrameBuffer;

/// Rec. 601 weights, scaled by 1000.
const WEIGHT_R: u32 = 299;
const WEIGHT_G: u32 = 587;
const WEIGHT_B: u32 = 114;

/// Perceptual luminance `(R*299 + G*587 + B*114) / 1000`, truncated.
///
/// # Example
/// ```
/// use br_core::photometric::luminance;
/// assert_eq!(luminance(255, 255, 255), 255);
/// assert_eq!(luminance(255, 0, 0), 76);
/// ```
#[inline(always)]
#[must_use]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let weighted = u32::from(r) * WEIGHT_R + u32::from(g) * WEIGHT_G + u32::from(b) * WEIGHT_B;
    (weighted / 1000).clamp(0, 255) as u8
}

/// Contrast gain for `amount`: `259(amount+255) / (255(259-amount))`.
///
/// `amount = 0` yields exactly `1.0`. The result grows without bound as
/// `amount` nears 259; callers bound `amount` themselves.
///
/// # Example
/// ```
/// use br_core::photometric::contrast_factor;
/// assert_eq!(contrast_factor(0), 1.0);
/// assert!(contrast_factor(100) > 1.0);
/// assert!(contrast_factor(-100) < 1.0);
/// ```
#[inline]
#[must_use]
pub fn contrast_factor(amount: i32) -> f64 {
    let a = f64::from(amount);
    (259.0 * (a + 255.0)) / (255.0 * (259.0 - a))
}

/// Apply the contrast gain `factor` to one channel around mid-grey.
///
/// Truncates toward zero before clamping, never rounds to nearest.
#[inline(always)]
#[must_use]
pub fn contrast_channel(channel: u8, factor: f64) -> u8 {
    let v = factor * (f64::from(channel) - 128.0) + 128.0;
    // `as` truncates toward zero, saturates, and maps NaN to 0
    (v as i64).clamp(0, 255) as u8
}

/// Contrast curve on one RGBA pixel. Alpha passes through.
///
/// # Example
/// ```
/// use br_core::photometric::apply_contrast;
/// let p = (10, 128, 250, 7);
/// assert_eq!(apply_contrast(p, 0), p);
/// let (r, g, b, a) = apply_contrast(p, 200);
/// assert_eq!((r, g, b, a), (0, 128, 255, 7));
/// ```
#[must_use]
pub fn apply_contrast(pixel: (u8, u8, u8, u8), amount: i32) -> (u8, u8, u8, u8) {
    let f = contrast_factor(amount);
    let (r, g, b, a) = pixel;
    (
        contrast_channel(r, f),
        contrast_channel(g, f),
        contrast_channel(b, f),
        a,
    )
}

/// Apply the contrast curve to every pixel of `frame`, in place.
///
/// The gain is computed once for the whole buffer.
pub fn apply_contrast_frame(frame: &mut FrameBuffer, amount: i32) {
    let f = contrast_factor(amount);
    for px in frame.data.chunks_exact_mut(4) {
        px[0] = contrast_channel(px[0], f);
        px[1] = contrast_channel(px[1], f);
        px[2] = contrast_channel(px[2], f);
    }
    log::debug!(
        "contrast {amount} (gain {f:.3}) applied to {}×{}",
        frame.width,
        frame.height
    );
}

/// Is the dot lit?
///
/// With `invert`, both the threshold and the luminance are mirrored
/// (`255 - v`) before comparing. The comparison is always `lum >= threshold`.
///
/// # Example
/// ```
/// use br_core::photometric::decide_dot;
/// assert!(decide_dot(200, 128, false));
/// assert!(!decide_dot(200, 128, true));
/// assert!(decide_dot(0, 0, false));
/// ```
#[inline(always)]
#[must_use]
pub fn decide_dot(luminance: u8, threshold: u8, invert: bool) -> bool {
    if invert {
        (255 - luminance) >= (255 - threshold)
    } else {
        luminance >= threshold
    }
}
