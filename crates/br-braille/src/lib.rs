//! Braille dot-matrix codec for braillify.
//!
//! Encodes pixel buffers to text blocks of U+2800..U+28FF characters and
//! decodes such text back to a two-tone raster.
pub mod decoder;
pub mod encoder;
pub mod masks;

pub use decoder::decode_text;
pub use encoder::{DotParams, render};
