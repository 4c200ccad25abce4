use std::io::Read;

use anyhow::{Context, Result};
use br_core::error::CoreError;
use br_core::frame::FrameBuffer;
use image::ImageFormat;

/// Argument value meaning "read from stdin".
pub const STDIN_ARG: &str = "-";

/// Read the whole input named by `arg`: a file path, or `-` for stdin.
///
/// # Errors
/// Returns an error if the file cannot be opened or the stream fails.
pub fn read_input(arg: &str) -> Result<Vec<u8>> {
    if arg == STDIN_ARG {
        let mut data = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut data)
            .context("Failed to read from stdin")?;
        log::debug!("{} bytes read from stdin", data.len());
        Ok(data)
    } else {
        std::fs::read(arg).with_context(|| format!("Failed to open image file {arg}"))
    }
}

/// Decode PNG, JPEG or BMP bytes into an RGBA8 frame.
///
/// The container format is sniffed from the leading bytes.
///
/// # Errors
/// [`CoreError::UnsupportedFormat`] for any other format, or a decode error.
///
/// # Example
/// ```
/// use br_source::image::decode_image;
/// assert!(decode_image(b"not an image").is_err());
/// ```
pub fn decode_image(bytes: &[u8]) -> Result<FrameBuffer> {
    let format = image::guess_format(bytes).context("Failed to decode image")?;
    if !matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp
    ) {
        return Err(CoreError::UnsupportedFormat {
            format: format!("{format:?}"),
        }
        .into());
    }

    let img = image::load_from_memory_with_format(bytes, format)
        .with_context(|| format!("Failed to decode {format:?} image"))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("decoded {format:?} image, {width}×{height}");
    Ok(FrameBuffer::from_raw(width, height, rgba.into_raw())?)
}
