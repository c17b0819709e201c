//! Cover configuration module.
//!
//! Handles loading, validating, and merging the optional `library-cover.toml`
//! file. Every value has a stock default matching the Jellyfin library cover
//! styling, so a config file is only needed to deviate from it.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [canvas]
//! width = 960               # Output width in pixels
//! height = 540              # Output height in pixels
//!
//! [text]
//! font_file = "Prima Sans Bold.otf"
//! font_directory = "fonts"
//! font_size = 112.0         # Pixels per em
//! color = [252, 252, 252, 0]
//! features = ["-kern"]      # OpenType feature switches
//! height_offset = 64        # Positive values move the title upward
//!
//! [overlay]
//! foreground_weight = 0.5   # Weight of the black layer (clamped to 0-1)
//! background_weight = 0.5   # Weight of the photo (clamped to 0-1)
//! bias = 1.0                # Constant added to every blended sample
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [overlay]
//! foreground_weight = 0.7
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{BlendWeights, FeatureSwitch, TextStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "library-cover.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Cover configuration loaded from `library-cover.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverConfig {
    /// Output canvas dimensions.
    pub canvas: CanvasConfig,
    /// Title font and placement.
    pub text: TextConfig,
    /// Darkening overlay weights.
    pub overlay: OverlayConfig,
}

impl CoverConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Validation(
                "canvas.width and canvas.height must be non-zero".into(),
            ));
        }
        if !(self.text.font_size.is_finite() && self.text.font_size > 0.0) {
            return Err(ConfigError::Validation(
                "text.font_size must be a positive number".into(),
            ));
        }
        if self.text.font_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "text.font_file must not be empty".into(),
            ));
        }
        for feature in &self.text.features {
            FeatureSwitch::parse(feature)
                .map_err(|e| ConfigError::Validation(format!("text.features: {e}")))?;
        }
        let overlay = &self.overlay;
        if ![overlay.foreground_weight, overlay.background_weight, overlay.bias]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ConfigError::Validation(
                "overlay weights and bias must be finite numbers".into(),
            ));
        }
        Ok(())
    }

    /// Build the text style the renderer consumes.
    ///
    /// Assumes [`validate`](Self::validate) has passed; invalid feature
    /// strings are skipped here rather than reported twice.
    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font_size: self.text.font_size,
            color: self.text.color,
            features: self
                .text
                .features
                .iter()
                .filter_map(|f| FeatureSwitch::parse(f).ok())
                .collect(),
            height_offset: self.text.height_offset,
        }
    }

    /// Blend weights from the config, clamped to `[0, 1]`.
    pub fn blend_weights(&self) -> BlendWeights {
        BlendWeights::new(
            self.overlay.foreground_weight,
            self.overlay.background_weight,
        )
        .with_bias(self.overlay.bias)
    }
}

/// Output canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
        }
    }
}

/// Title text settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// Font file name, or an absolute path to a font file.
    pub font_file: PathBuf,
    /// Directory holding `font_file`, relative to the search roots.
    pub font_directory: PathBuf,
    /// Font size in pixels per em.
    pub font_size: f32,
    /// RGBA fill colour.
    pub color: [u8; 4],
    /// OpenType feature switches such as `"-kern"` or `"+liga"`.
    pub features: Vec<String>,
    /// Upward shift of the title from the vertical center, in pixels.
    pub height_offset: i32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_file: PathBuf::from("Prima Sans Bold.otf"),
            font_directory: PathBuf::from("fonts"),
            font_size: 112.0,
            color: [252, 252, 252, 0],
            features: vec!["-kern".to_string()],
            height_offset: 64,
        }
    }
}

/// Overlay blend settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Weight of the black layer. Higher values darken the photo more.
    pub foreground_weight: f32,
    /// Weight of the resized photo.
    pub background_weight: f32,
    /// Constant added to each blended sample before rounding.
    pub bias: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            foreground_weight: 0.5,
            background_weight: 0.5,
            bias: 1.0,
        }
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CoverConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<CoverConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CoverConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the cover config.
///
/// An explicit `path` must exist. Without one, [`CONFIG_FILE_NAME`] in
/// `working_dir` is used when present, and stock defaults otherwise.
pub fn load_config(path: Option<&Path>, working_dir: &Path) -> Result<CoverConfig, ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let candidate = working_dir.join(CONFIG_FILE_NAME);
            if !candidate.exists() {
                return resolve_config(None);
            }
            candidate
        }
    };
    tracing::debug!(path = %config_path.display(), "loading config");
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock config file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Library Cover Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults and match Jellyfin's library covers.
#
# Save as library-cover.toml in the working directory, or pass
# --config <path>. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Output canvas
# ---------------------------------------------------------------------------
[canvas]
# Every cover is stretched to exactly this size; aspect ratio is not kept.
width = 960
height = 540

# ---------------------------------------------------------------------------
# Title text
# ---------------------------------------------------------------------------
[text]
# Font file name, searched under font_directory next to the working
# directory, the executable, and the source checkout. May be an absolute path.
font_file = "Prima Sans Bold.otf"
font_directory = "fonts"

# Font size in pixels per em.
font_size = 112.0

# RGBA fill colour. Covers are opaque RGB, so alpha does not fade the title.
color = [252, 252, 252, 0]

# OpenType feature switches: "-tag" disables, "+tag" (or "tag") enables.
features = ["-kern"]

# Shift the title upward from the vertical center by this many pixels.
height_offset = 64

# ---------------------------------------------------------------------------
# Darkening overlay
# ---------------------------------------------------------------------------
[overlay]
# Each output sample is photo * background_weight + black * foreground_weight + bias.
# Weights are clamped to 0-1. --shadow on the command line overrides both,
# setting background_weight = 1 - foreground_weight.
foreground_weight = 0.5
background_weight = 0.5

# Constant added to every blended sample. 1.0 reproduces the reference
# covers; set 0.0 for an exact linear blend.
bias = 1.0
"##
}
