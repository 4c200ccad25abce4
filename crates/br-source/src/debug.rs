//! Debug sink that dumps intermediate images as PNG files.

use std::path::{Path, PathBuf};

use br_core::frame::FrameBuffer;
use br_core::traits::{DebugSink, DebugStage};
use image::ExtendedColorType;

/// Writes `lum.png`, `contrast.png` and `parsed.png` into a directory.
///
/// Write failures are logged and swallowed; a debug dump never fails a
/// render.
///
/// # Example
/// ```no_run
/// use br_source::debug::PngDebugSink;
/// let sink = PngDebugSink::new(".");
/// ```
pub struct PngDebugSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngDebugSink {
    /// Sink writing into `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            written: Vec::new(),
        }
    }

    /// Files written so far.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Path a stage is written to.
    #[must_use]
    pub fn path_for(&self, stage: DebugStage) -> PathBuf {
        self.dir.join(format!("{}.png", stage.name()))
    }
}

impl DebugSink for PngDebugSink {
    fn capture(&mut self, stage: DebugStage, frame: &FrameBuffer) {
        if frame.is_empty() {
            log::debug!("{} image is empty, not written", stage.name());
            return;
        }
        let path = self.path_for(stage);
        match image::save_buffer(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            ExtendedColorType::Rgba8,
        ) {
            Ok(()) => {
                log::info!("debug image written: {}", path.display());
                self.written.push(path);
            }
            Err(e) => log::warn!("Failed to write {}: {e}", path.display()),
        }
    }
}
