use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Unsupported file or data format.
    #[error("unsupported image format: {format}")]
    UnsupportedFormat {
        /// The format string that is unsupported.
        format: String,
    },

    /// Invalid width/height dimensions.
    #[error("invalid dimensions: {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A character outside the Braille block was met while parsing strictly.
    #[error("line {line}, column {column}: {ch:?} is not a Braille pattern")]
    InvalidGlyph {
        /// Zero-based line index.
        line: usize,
        /// Zero-based column, counted in code points.
        column: usize,
        /// The offending character.
        ch: char,
    },

    /// Scaling algorithm name not recognised.
    #[error("unknown scaling mode: '{0}'")]
    UnknownScalingMode(String),
}
