use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default grid width when neither dimension is given.
pub const DEFAULT_WIDTH: u32 = 80;

/// Default luminance threshold.
pub const DEFAULT_THRESHOLD: u8 = 85;

/// Contrast range accepted by the config layer.
pub const CONTRAST_RANGE: (i32, i32) = (-255, 255);

/// Configuration complète d'un rendu.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use br_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.threshold, 85);
/// assert_eq!(config.contrast, 0);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RenderConfig {
    // === Décision des points ===
    /// Seuil de luminance : un point est allumé si `lum >= threshold`.
    pub threshold: u8,
    /// Inverser seuil et luminance avant comparaison.
    pub invert: bool,
    /// Contraste signé, 0 = neutre.
    pub contrast: i32,

    // === Géométrie ===
    /// Largeur en caractères. `None` = dérivée du ratio de l'image.
    pub width: Option<u32>,
    /// Hauteur en caractères. `None` = dérivée du ratio de l'image.
    pub height: Option<u32>,
    /// Width used when neither `width` nor `height` is set.
    pub default_width: u32,
    /// Resampling algorithm used to fit the source to the grid.
    pub scaling: ScalingMode,

    // === Parsing ===
    /// How the text decoder treats non-Braille characters.
    pub parse_mode: ParseMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            invert: false,
            contrast: 0,
            width: None,
            height: None,
            default_width: DEFAULT_WIDTH,
            scaling: ScalingMode::Bicubic,
            parse_mode: ParseMode::Lenient,
        }
    }
}

impl RenderConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    ///
    /// # Example
    /// ```
    /// use br_core::config::RenderConfig;
    /// let mut config = RenderConfig { contrast: 400, ..RenderConfig::default() };
    /// config.clamp_all();
    /// assert_eq!(config.contrast, 255);
    /// ```
    pub fn clamp_all(&mut self) {
        let (lo, hi) = CONTRAST_RANGE;
        if !(lo..=hi).contains(&self.contrast) {
            log::warn!("contrast {} out of range, clamped", self.contrast);
        }
        self.contrast = self.contrast.clamp(lo, hi);
        self.default_width = self.default_width.max(1);
    }
}

/// Resampling algorithm.
///
/// # Example
/// ```
/// use br_core::config::ScalingMode;
/// let mode: ScalingMode = "nearest-neighbor".parse().unwrap();
/// assert_eq!(mode, ScalingMode::NearestNeighbor);
/// assert!("lanczos".parse::<ScalingMode>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ScalingMode {
    /// Bicubic (Catmull-Rom) convolution.
    #[default]
    Bicubic,
    /// Bilinear convolution.
    Bilinear,
    /// Nearest neighbour, no filtering.
    NearestNeighbor,
}

impl ScalingMode {
    /// Name as accepted on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bicubic => "bicubic",
            Self::Bilinear => "bilinear",
            Self::NearestNeighbor => "nearest-neighbor",
        }
    }
}

impl FromStr for ScalingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bicubic" => Ok(Self::Bicubic),
            "bilinear" => Ok(Self::Bilinear),
            "nearest-neighbor" => Ok(Self::NearestNeighbor),
            other => Err(CoreError::UnknownScalingMode(other.to_string())),
        }
    }
}

impl fmt::Display for ScalingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treatment of characters outside U+2800..=U+28FF when parsing text.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ParseMode {
    /// Keep the low byte of any code point as its glyph bits.
    #[default]
    Lenient,
    /// Reject with [`CoreError::InvalidGlyph`].
    Strict,
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    threshold: Option<u8>,
    invert: Option<bool>,
    contrast: Option<i32>,
    width: Option<u32>,
    height: Option<u32>,
    default_width: Option<u32>,
    scaling: Option<ScalingMode>,
    parse_mode: Option<ParseMode>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use br_core::config::{parse_config, ScalingMode};
/// let config = parse_config("[render]\nthreshold = 128\nscaling = \"bilinear\"\n").unwrap();
/// assert_eq!(config.threshold, 128);
/// assert_eq!(config.scaling, ScalingMode::Bilinear);
/// assert!(!config.invert);
/// ```
pub fn parse_config(content: &str) -> Result<RenderConfig> {
    let file: ConfigFile =
        toml::from_str(content).map_err(|e| CoreError::Config(e.message().to_string()))?;

    let mut config = RenderConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.threshold {
            config.threshold = v;
        }
        if let Some(v) = r.invert {
            config.invert = v;
        }
        if let Some(v) = r.contrast {
            config.contrast = v;
        }
        if r.width.is_some() {
            config.width = r.width;
        }
        if r.height.is_some() {
            config.height = r.height;
        }
        if let Some(v) = r.default_width {
            config.default_width = v;
        }
        if let Some(v) = r.scaling {
            config.scaling = v;
        }
        if let Some(v) = r.parse_mode {
            config.parse_mode = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use br_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("braillify.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("dans {}", path.display()))
}
