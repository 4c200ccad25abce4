//! Boundary collaborators for braillify: image input, resampling, debug output.

pub mod debug;
pub mod image;
pub mod resize;
