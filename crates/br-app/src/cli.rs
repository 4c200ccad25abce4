use std::path::PathBuf;

use br_core::config::{ParseMode, RenderConfig, ScalingMode};
use clap::Parser;

/// Environment variable that turns debug mode on when set to `1`.
pub const DEBUG_ENV: &str = "DEBUG";

/// braillify — render images as Unicode Braille art.
///
/// If either one of width or height is set, the other is calculated from
/// the aspect ratio of the image. If no dimension is given, a default
/// width of 80 applies. If both are given, the aspect ratio is not kept.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, disable_help_flag = true)]
pub struct Cli {
    /// Image file (PNG, JPEG, BMP), or `-` to read from stdin.
    #[arg(value_name = "IMAGE_FILE")]
    pub input: String,

    /// Width in number of characters.
    #[arg(short = 'w', long)]
    pub width: Option<u32>,

    /// Height in number of characters.
    #[arg(short = 'h', long)]
    pub height: Option<u32>,

    /// Luminance threshold [0, 255]. Default 85.
    #[arg(short = 't', long)]
    pub threshold: Option<u8>,

    /// Contrast, a positive or negative integer.
    #[arg(short = 'c', long, allow_negative_numbers = true)]
    pub contrast: Option<i32>,

    /// Invert the output.
    #[arg(short = 'i', long, default_value_t = false)]
    pub invert: bool,

    /// Treat and parse IMAGE_FILE as a Braille text file.
    #[arg(short = 's', long = "from-text", default_value_t = false)]
    pub from_text: bool,

    /// Image scaling algorithm: bicubic, bilinear, nearest-neighbor.
    #[arg(short = 'r', long)]
    pub scaling: Option<ScalingMode>,

    /// Reject non-Braille characters when parsing text.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Fichier de configuration TOML.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dump intermediate images (lum.png, contrast.png, parsed.png).
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Directory for debug images.
    #[arg(long, default_value = ".")]
    pub debug_dir: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Print help.
    #[arg(long, action = clap::ArgAction::Help)]
    pub help: Option<bool>,
}

impl Cli {
    /// Debug mode from `--debug` or `DEBUG=1`.
    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.debug || std::env::var(DEBUG_ENV).is_ok_and(|v| v == "1")
    }

    /// Apply command-line values over `config`.
    ///
    /// Giving either dimension replaces both configured dimensions, so a
    /// lone `-h` still derives the width from the image.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if self.width.is_some() || self.height.is_some() {
            config.width = self.width;
            config.height = self.height;
        }
        if let Some(t) = self.threshold {
            config.threshold = t;
        }
        if let Some(c) = self.contrast {
            config.contrast = c;
        }
        if self.invert {
            config.invert = true;
        }
        if let Some(mode) = self.scaling {
            config.scaling = mode;
        }
        if self.strict {
            config.parse_mode = ParseMode::Strict;
        }
    }
}
