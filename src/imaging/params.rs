//! Parameter types for cover operations.
//!
//! These structs describe *what* to draw, not *how*. They sit between the
//! configuration layer and the pixel operations/renderers.
//!
//! ## Types
//!
//! - [`BlendWeights`] — Foreground/background weights (each clamped to 0–1) plus the additive bias.
//! - [`FeatureSwitch`] — One OpenType feature toggle parsed from `"-kern"` / `"+liga"` notation.
//! - [`TextStyle`] — Font size, fill colour, feature switches and vertical offset for the title.

use std::fmt;

/// Clamp to `[0, 1]`, mapping NaN to 0.
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Weights for the overlay blend.
///
/// Each output sample is `background * background_weight +
/// foreground * foreground_weight + bias`. Weights are clamped on
/// construction; they are not required to sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    foreground: f32,
    background: f32,
    bias: f32,
}

impl BlendWeights {
    /// Additive constant applied by the reference covers.
    pub const DEFAULT_BIAS: f32 = 1.0;

    /// Independent weights, each clamped to `[0, 1]`.
    pub fn new(foreground: f32, background: f32) -> Self {
        Self {
            foreground: clamp_unit(foreground),
            background: clamp_unit(background),
            bias: Self::DEFAULT_BIAS,
        }
    }

    /// Derive both weights from a single foreground ("shadow") weight:
    /// the background gets whatever the foreground leaves.
    pub fn from_foreground(foreground: f32) -> Self {
        let foreground = clamp_unit(foreground);
        Self::new(foreground, 1.0 - foreground)
    }

    pub fn with_bias(self, bias: f32) -> Self {
        Self { bias, ..self }
    }

    pub fn foreground(self) -> f32 {
        self.foreground
    }

    pub fn background(self) -> f32 {
        self.background
    }

    pub fn bias(self) -> f32 {
        self.bias
    }
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

/// An OpenType feature toggle, e.g. `-kern` to switch kerning off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSwitch {
    pub tag: [u8; 4],
    pub enabled: bool,
}

impl FeatureSwitch {
    /// Parse `"-tag"`, `"+tag"` or `"tag"`. Tags are exactly four ASCII bytes.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let (enabled, tag) = match spec.strip_prefix('-') {
            Some(rest) => (false, rest),
            None => (true, spec.strip_prefix('+').unwrap_or(spec)),
        };
        let bytes: [u8; 4] = tag
            .as_bytes()
            .try_into()
            .map_err(|_| format!("'{spec}' is not a four-character feature tag"))?;
        if !bytes.iter().all(|b| b.is_ascii_graphic()) {
            return Err(format!("'{spec}' contains non-ASCII tag characters"));
        }
        Ok(Self {
            tag: bytes,
            enabled,
        })
    }

    /// Feature value as passed to the shaper (0 = off, 1 = on).
    pub fn value(self) -> u32 {
        u32::from(self.enabled)
    }
}

impl fmt::Display for FeatureSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.enabled { '+' } else { '-' };
        write!(f, "{sign}{}", String::from_utf8_lossy(&self.tag))
    }
}

/// How the title is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Pixels per em.
    pub font_size: f32,
    /// RGBA fill colour. Only RGB reaches the canvas; covers are opaque.
    pub color: [u8; 4],
    pub features: Vec<FeatureSwitch>,
    /// Upward shift from the vertical center, in pixels.
    pub height_offset: i32,
}
