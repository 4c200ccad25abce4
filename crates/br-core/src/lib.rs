//! Shared types, photometric math and configuration for braillify.
//!
//! This crate owns everything the encoder and decoder agree on: the
//! Braille cell geometry, the pixel buffer, the dot-mask container and
//! the luminance/contrast transforms that decide which dots are lit.

pub mod bitmap;
pub mod cell;
pub mod config;
pub mod error;
pub mod frame;
pub mod photometric;
pub mod traits;

pub use bitmap::BrailleBitmap;
pub use config::{ParseMode, RenderConfig, ScalingMode};
pub use error::CoreError;
pub use frame::FrameBuffer;
pub use traits::{DebugSink, DebugStage};
