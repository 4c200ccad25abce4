use anyhow::{Context, Result};
use br_core::config::ScalingMode;
use br_core::frame::FrameBuffer;
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};

/// fast_image_resize algorithm for a scaling mode.
#[must_use]
pub fn resize_alg(mode: ScalingMode) -> ResizeAlg {
    match mode {
        ScalingMode::Bicubic => ResizeAlg::Convolution(FilterType::CatmullRom),
        ScalingMode::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        ScalingMode::NearestNeighbor => ResizeAlg::Nearest,
    }
}

/// Resizer réutilisable wrappant fast_image_resize.
///
/// # Example
/// ```
/// use br_source::resize::Resizer;
/// use br_core::config::ScalingMode;
/// let r = Resizer::new(ScalingMode::Bilinear);
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch image for source (owned buffer to avoid the mut borrow issue).
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a resizer using `mode`.
    #[must_use]
    pub fn new(mode: ScalingMode) -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(resize_alg(mode)),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// An empty source leaves `dst` transparent.
    ///
    /// # Errors
    /// Returns an error if the resize operation fails.
    ///
    /// # Example
    /// ```
    /// use br_source::resize::Resizer;
    /// use br_core::config::ScalingMode;
    /// use br_core::frame::FrameBuffer;
    /// let mut r = Resizer::new(ScalingMode::Bicubic);
    /// let src = FrameBuffer::new(100, 100);
    /// let mut dst = FrameBuffer::new(50, 50);
    /// r.resize_into(&src, &mut dst).unwrap();
    /// ```
    pub fn resize_into(&mut self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<()> {
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }
        if dst.is_empty() {
            return Ok(());
        }
        if src.is_empty() {
            log::warn!("empty source, nothing to resample");
            dst.data.fill(0);
            return Ok(());
        }

        // forced copy: fast_image_resize wants &mut on the source
        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x4)
                .context("Invalid source dimensions")?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x4)
                .context("Invalid destination dimensions")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Resize failed")?;

        Ok(())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new(ScalingMode::default())
    }
}

/// Resample `src` to exactly `width × height`.
///
/// # Errors
/// Returns an error if the resize operation fails.
///
/// # Example
/// ```
/// use br_source::resize::resize_frame;
/// use br_core::config::ScalingMode;
/// use br_core::frame::FrameBuffer;
/// let src = FrameBuffer::new(100, 100);
/// let dst = resize_frame(&src, 50, 20, ScalingMode::NearestNeighbor).unwrap();
/// assert_eq!((dst.width, dst.height), (50, 20));
/// ```
pub fn resize_frame(
    src: &FrameBuffer,
    width: u32,
    height: u32,
    mode: ScalingMode,
) -> Result<FrameBuffer> {
    let mut dst = FrameBuffer::new(width, height);
    Resizer::new(mode).resize_into(src, &mut dst)?;
    log::debug!(
        "resampled {}×{} -> {width}×{height} ({mode})",
        src.width,
        src.height
    );
    Ok(dst)
}
