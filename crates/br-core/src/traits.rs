use crate::frame::FrameBuffer;

/// Intermediate images a render can hand to a [`DebugSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebugStage {
    /// Greyscale luminance of the sampled pixels.
    Luminance,
    /// Source after the contrast curve.
    Contrast,
    /// Raster rebuilt from Braille text.
    Parsed,
}

impl DebugStage {
    /// Short stable name, used for file names.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Luminance => "lum",
            Self::Contrast => "contrast",
            Self::Parsed => "parsed",
        }
    }
}

/// Reçoit les images intermédiaires d'un rendu.
///
/// Passed explicitly into the render call; a render without a sink does no
/// extra work.
///
/// # Example
/// ```
/// use br_core::traits::{DebugSink, DebugStage};
/// use br_core::frame::FrameBuffer;
///
/// struct CountingSink(usize);
/// impl DebugSink for CountingSink {
///     fn capture(&mut self, _stage: DebugStage, _frame: &FrameBuffer) { self.0 += 1; }
/// }
/// ```
pub trait DebugSink {
    /// Record `frame` for `stage`. Must not fail the render.
    fn capture(&mut self, stage: DebugStage, frame: &FrameBuffer);
}
