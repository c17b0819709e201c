//! Shared test utilities for the library-cover test suite.
//!
//! - [`create_test_jpeg`] writes a synthetic gradient photo of any size.
//! - [`StubRenderer`] is a font-free [`TextRenderer`] that inks a fixed box,
//!   so pipeline tests never depend on fonts installed on the machine.
//! - [`find_test_font`] locates a real system font for the few tests that
//!   exercise shaping; those tests skip when none is installed.

use crate::imaging::{TextBox, TextRenderer, TextStyle};
use image::{ImageEncoder, RgbImage};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// =========================================================================
// Fixtures
// =========================================================================

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

// =========================================================================
// Renderers
// =========================================================================

/// Renderer that inks a solid `text_box` in the style colour at the origin.
pub struct StubRenderer {
    pub text_box: TextBox,
    pub last_origin: Option<(i32, i32)>,
}

impl StubRenderer {
    pub fn new(text_box: TextBox) -> Self {
        Self {
            text_box,
            last_origin: None,
        }
    }
}

impl TextRenderer for StubRenderer {
    fn measure(&mut self, _message: &str, _style: &TextStyle) -> TextBox {
        self.text_box
    }

    fn draw(&mut self, image: &mut RgbImage, origin: (i32, i32), _message: &str, style: &TextStyle) {
        self.last_origin = Some(origin);
        let [r, g, b, _] = style.color;
        for dy in 0..self.text_box.height as i32 {
            for dx in 0..self.text_box.width as i32 {
                let (x, y) = (origin.0 + dx, origin.1 + dy);
                if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
                    image.put_pixel(x as u32, y as u32, image::Rgb([r, g, b]));
                }
            }
        }
    }
}

// =========================================================================
// System fonts
// =========================================================================

const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
    "C:\\Windows\\Fonts",
];

/// Preferred faces, tried before any other font found.
const PREFERRED: &[&str] = &["DejaVuSans.ttf", "LiberationSans-Regular.ttf", "Arial.ttf"];

/// Find a TrueType/OpenType font installed on this machine.
pub fn find_test_font() -> Option<PathBuf> {
    let fonts: Vec<PathBuf> = FONT_DIRS
        .iter()
        .map(Path::new)
        .filter(|dir| dir.is_dir())
        .flat_map(|dir| WalkDir::new(dir).max_depth(4).into_iter().filter_map(Result::ok))
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
        })
        .collect();

    PREFERRED
        .iter()
        .find_map(|name| {
            fonts
                .iter()
                .find(|p| p.file_name().is_some_and(|f| f == *name))
                .cloned()
        })
        // Any Latin sans face will do; symbol or CJK-only fonts would ink nothing.
        .or_else(|| {
            fonts.into_iter().find(|p| {
                p.file_name()
                    .is_some_and(|f| f.to_string_lossy().contains("Sans"))
            })
        })
}
