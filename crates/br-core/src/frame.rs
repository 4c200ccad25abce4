use crate::error::CoreError;

/// Opaque black, the decoder's background.
pub const OPAQUE_BLACK: (u8, u8, u8, u8) = (0, 0, 0, 255);

/// Opaque white, a lit dot once decoded.
pub const OPAQUE_WHITE: (u8, u8, u8, u8) = (255, 255, 255, 255);

/// Buffer de pixels RGBA8, row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use br_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use br_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Buffer where every pixel is `rgba`.
    ///
    /// # Example
    /// ```
    /// use br_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(2, 4, (255, 255, 255, 255));
    /// assert_eq!(fb.pixel(1, 3), (255, 255, 255, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: (u8, u8, u8, u8)) -> Self {
        let (r, g, b, a) = rgba;
        Self {
            data: [r, g, b, a].repeat(width as usize * height as usize),
            width,
            height,
        }
    }

    /// Wrap raw RGBA8 bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `data` is not exactly
    /// `width * height * 4` bytes long.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    #[inline(always)]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    /// Accès au pixel (x, y) → (r, g, b, a). Hors limites → transparent.
    ///
    /// # Example
    /// ```
    /// use br_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(10, 10);
    /// assert_eq!(fb.pixel(0, 0), (0, 0, 0, 0));
    /// assert_eq!(fb.pixel(99, 0), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        self.get(x, y).unwrap_or((0, 0, 0, 0))
    }

    /// Bounds-checked pixel read.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        let idx = self.index(x, y)?;
        Some((
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ))
    }

    /// Write one pixel. Returns `false` and does nothing when out of bounds.
    ///
    /// # Example
    /// ```
    /// use br_core::frame::FrameBuffer;
    /// let mut fb = FrameBuffer::new(2, 2);
    /// assert!(fb.set_pixel(1, 1, (1, 2, 3, 4)));
    /// assert!(!fb.set_pixel(2, 0, (1, 2, 3, 4)));
    /// assert_eq!(fb.pixel(1, 1), (1, 2, 3, 4));
    /// ```
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: (u8, u8, u8, u8)) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        let (r, g, b, a) = rgba;
        self.data[idx..idx + 4].copy_from_slice(&[r, g, b, a]);
        true
    }

    /// `true` if the buffer holds no pixel at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
