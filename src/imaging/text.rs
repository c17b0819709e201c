//! Title rendering.
//!
//! [`TextRenderer`] is the font capability the compositor depends on: it can
//! measure the ink box of a shaped string and composite it onto an RGB
//! buffer. [`render_centered_text`] uses both to place the title.
//!
//! The production renderer is [`CosmicTextRenderer`], which shapes with
//! `cosmic-text` (`Shaping::Advanced`: bidirectional runs, ligatures,
//! OpenType feature switches) and rasterizes glyphs through its swash cache.

use super::calculations::{InkBounds, TextBox, centered_origin};
use super::params::TextStyle;
use cosmic_text::{
    Attrs, Buffer, Color, Family, FeatureTag, FontFeatures, FontSystem, Metrics, Shaping,
    SwashCache,
};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextError {
    #[error("Font resource error for {path}: {message}")]
    FontResource { path: PathBuf, message: String },
}

/// A font-backed text renderer.
pub trait TextRenderer {
    /// Ink box of `message` laid out with its pen origin at `(0, 0)`.
    fn measure(&mut self, message: &str, style: &TextStyle) -> TextBox;

    /// Composite `message` onto `image` with its pen origin at `origin`.
    /// Pixels falling outside the image are clipped.
    fn draw(&mut self, image: &mut RgbImage, origin: (i32, i32), message: &str, style: &TextStyle);
}

/// Draw `message` onto a copy of `image`, centered horizontally and shifted
/// up from the vertical center by `style.height_offset`.
pub fn render_centered_text(
    renderer: &mut impl TextRenderer,
    image: &RgbImage,
    canvas_size: (u32, u32),
    message: &str,
    style: &TextStyle,
) -> RgbImage {
    let text_box = renderer.measure(message, style);
    let origin = centered_origin(canvas_size, text_box, style.height_offset);
    tracing::debug!(
        text_width = text_box.width,
        text_height = text_box.height,
        x = origin.0,
        y = origin.1,
        "placing title"
    );

    let mut out = image.clone();
    renderer.draw(&mut out, origin, message, style);
    out
}

/// Source-over composite of `color` at `coverage` (0–255) onto one pixel.
pub fn composite_pixel(pixel: &mut Rgb<u8>, color: [u8; 3], coverage: u8) {
    let alpha = u32::from(coverage);
    for (dst, src) in pixel.0.iter_mut().zip(color) {
        let blended = (u32::from(src) * alpha + u32::from(*dst) * (255 - alpha) + 127) / 255;
        *dst = blended as u8;
    }
}

/// Renderer backed by a single font file.
///
/// Lines are laid out with a line height of exactly ascent + descent, so the
/// first baseline sits on the ascender line and measured heights count from
/// the top of the font's ascent.
pub struct CosmicTextRenderer {
    font_system: FontSystem,
    cache: SwashCache,
    family: String,
    /// Ascent and descent as fractions of the em.
    ascent: f32,
    descent: f32,
}

impl CosmicTextRenderer {
    /// Load the font at `path`. Only this font is available for layout.
    pub fn from_file(path: &Path) -> Result<Self, TextError> {
        let data = std::fs::read(path).map_err(|e| TextError::FontResource {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_bytes(data, path)
    }

    /// Load a font from memory; `origin` is only used in error messages.
    pub fn from_bytes(data: Vec<u8>, origin: &Path) -> Result<Self, TextError> {
        let mut db = cosmic_text::fontdb::Database::new();
        db.load_font_data(data);
        let no_face = || TextError::FontResource {
            path: origin.to_path_buf(),
            message: "no usable font face found".to_string(),
        };
        let (face_id, family) = db
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| (face.id, name.clone())))
            .ok_or_else(no_face)?;

        let mut font_system = FontSystem::new_with_locale_and_db("en-US".to_string(), db);
        let font = font_system.get_font(face_id).ok_or_else(no_face)?;
        // Same face metrics the shaper uses for glyph ascent and descent.
        let face = font.rustybuzz();
        if face.units_per_em() == 0 {
            return Err(TextError::FontResource {
                path: origin.to_path_buf(),
                message: "font reports no units per em".to_string(),
            });
        }
        let units_per_em = face.units_per_em() as f32;
        let ascent = f32::from(face.ascender()) / units_per_em;
        let descent = -f32::from(face.descender()) / units_per_em;
        tracing::debug!(path = %origin.display(), %family, ascent, descent, "loaded font");

        Ok(Self {
            font_system,
            cache: SwashCache::new(),
            family,
            ascent,
            descent,
        })
    }

    /// Family name of the loaded face.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Ascender height in pixels at `font_size`.
    pub fn ascender(&self, font_size: f32) -> f32 {
        self.ascent * font_size
    }

    fn layout(&mut self, message: &str, style: &TextStyle) -> Buffer {
        let mut features = FontFeatures::new();
        for switch in &style.features {
            features.set(FeatureTag::new(&switch.tag), switch.value());
        }
        let attrs = Attrs::new()
            .family(Family::Name(&self.family))
            .font_features(features);

        let line_height = (self.ascent + self.descent) * style.font_size;
        let metrics = Metrics::new(style.font_size, line_height);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, message, &attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    /// Visit every inked pixel of `message`, relative to the pen origin.
    fn for_each_pixel(
        &mut self,
        message: &str,
        style: &TextStyle,
        mut visit: impl FnMut(i32, i32, u8),
    ) {
        let buffer = self.layout(message, style);
        let [r, g, b, _] = style.color;
        buffer.draw(
            &mut self.font_system,
            &mut self.cache,
            Color::rgb(r, g, b),
            |x, y, w, h, color| {
                let coverage = color.a();
                if coverage == 0 {
                    return;
                }
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        visit(x + dx, y + dy, coverage);
                    }
                }
            },
        );
    }
}

impl TextRenderer for CosmicTextRenderer {
    fn measure(&mut self, message: &str, style: &TextStyle) -> TextBox {
        let mut ink = InkBounds::default();
        self.for_each_pixel(message, style, |x, y, _| ink.add(x, y));
        ink.text_box()
    }

    fn draw(&mut self, image: &mut RgbImage, origin: (i32, i32), message: &str, style: &TextStyle) {
        let (width, height) = image.dimensions();
        let [r, g, b, _] = style.color;
        self.for_each_pixel(message, style, |x, y, coverage| {
            let (px, py) = (origin.0 + x, origin.1 + y);
            if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                return;
            }
            composite_pixel(image.get_pixel_mut(px as u32, py as u32), [r, g, b], coverage);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoverConfig;
    use crate::imaging::FeatureSwitch;
    use crate::test_helpers::{StubRenderer, find_test_font};

    fn style() -> TextStyle {
        CoverConfig::default().text_style()
    }

    #[test]
    fn composite_pixel_full_and_zero_coverage() {
        let mut px = Rgb([10, 20, 30]);
        composite_pixel(&mut px, [252, 252, 252], 0);
        assert_eq!(px, Rgb([10, 20, 30]));
        composite_pixel(&mut px, [252, 252, 252], 255);
        assert_eq!(px, Rgb([252, 252, 252]));
    }

    #[test]
    fn composite_pixel_half_coverage() {
        let mut px = Rgb([0, 0, 0]);
        composite_pixel(&mut px, [255, 100, 0], 128);
        assert_eq!(px, Rgb([128, 50, 0]));
    }

    #[test]
    fn render_centered_text_places_box_at_offset_center() {
        let mut renderer = StubRenderer::new(TextBox {
            width: 40,
            height: 10,
        });
        let image = RgbImage::new(100, 60);
        let out = render_centered_text(&mut renderer, &image, (100, 60), "Movies", &style());

        // x = (100 - 40) / 2 = 30, y = (60 - 64 - 10) / 2 = -7
        assert_eq!(renderer.last_origin, Some((30, -7)));
        assert_eq!(out.get_pixel(30, 0), &Rgb([252, 252, 252]));
        assert_eq!(out.get_pixel(29, 0), &Rgb([0, 0, 0]));
        // Input untouched
        assert!(image.as_raw().iter().all(|&s| s == 0));
    }

    #[test]
    fn missing_font_is_font_resource_error() {
        let result = CosmicTextRenderer::from_file(Path::new("/nonexistent/font.otf"));
        assert!(matches!(result, Err(TextError::FontResource { .. })));
    }

    #[test]
    fn unparseable_font_is_font_resource_error() {
        let result = CosmicTextRenderer::from_bytes(b"not a font".to_vec(), Path::new("x.otf"));
        assert!(matches!(result, Err(TextError::FontResource { .. })));
    }

    #[test]
    fn real_font_measures_and_draws() {
        let Some(font) = find_test_font() else {
            eprintln!("skipping: no system font available");
            return;
        };
        let mut renderer = CosmicTextRenderer::from_file(&font).unwrap();
        assert!(!renderer.family().is_empty());

        let style = style();
        let text_box = renderer.measure("Movies", &style);
        assert!(text_box.width > 100, "unexpected width {}", text_box.width);
        assert!(text_box.height > 40, "unexpected height {}", text_box.height);

        let image = RgbImage::new(960, 540);
        let out = render_centered_text(&mut renderer, &image, (960, 540), "Movies", &style);
        let lit = out.pixels().filter(|p| p.0 != [0, 0, 0]).count();
        assert!(lit > 500, "expected inked pixels, got {lit}");
    }

    #[test]
    fn real_font_baseline_sits_on_ascender() {
        let Some(font) = find_test_font() else {
            eprintln!("skipping: no system font available");
            return;
        };
        let mut renderer = CosmicTextRenderer::from_file(&font).unwrap();
        let style = style();
        let buffer = renderer.layout("Movies", &style);
        let run = buffer.layout_runs().next().unwrap();
        let ascender = renderer.ascender(style.font_size);
        assert!(
            (run.line_y - ascender).abs() < 0.5,
            "baseline {} vs ascender {ascender}",
            run.line_y
        );
    }

    #[test]
    fn real_font_height_counts_from_ascender_line() {
        let Some(font) = find_test_font() else {
            eprintln!("skipping: no system font available");
            return;
        };
        let mut renderer = CosmicTextRenderer::from_file(&font).unwrap();
        let style = style();
        // "M" has a flat baseline, so its ink bottom is the baseline itself.
        let text_box = renderer.measure("M", &style);
        let ascender = renderer.ascender(style.font_size);
        assert!(
            (text_box.height as f32 - ascender).abs() <= 2.0,
            "height {} vs ascender {ascender}",
            text_box.height
        );
    }

    #[test]
    fn real_font_empty_message_draws_nothing() {
        let Some(font) = find_test_font() else {
            eprintln!("skipping: no system font available");
            return;
        };
        let mut renderer = CosmicTextRenderer::from_file(&font).unwrap();
        assert_eq!(renderer.measure("", &style()), TextBox::default());
    }

    #[test]
    fn real_font_shapes_right_to_left_text() {
        let Some(font) = find_test_font() else {
            eprintln!("skipping: no system font available");
            return;
        };
        let mut renderer = CosmicTextRenderer::from_file(&font).unwrap();
        let mut style = style();
        style.features.push(FeatureSwitch::parse("+liga").unwrap());
        // Mixed-direction input must lay out without panicking; glyph
        // coverage depends on the font, so only the Latin part is required.
        let text_box = renderer.measure("Films אבג", &style);
        assert!(text_box.width > 0);
    }
}
