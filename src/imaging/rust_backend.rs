//! Pure Rust image I/O backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, BMP) | `image::ImageReader` with format sniffing |
//! | EXIF orientation | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Colour normalisation | `DynamicImage::into_rgb8` (alpha dropped, 16-bit scaled down) |
//! | Encode JPEG | `JpegEncoder::new_with_quality` at [`JPEG_QUALITY`] |
//! | Encode other formats | `RgbImage::save`, format from the output extension |

use super::backend::{BackendError, ImageBackend};
use image::codecs::jpeg::JpegEncoder;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, RgbImage};
use std::io::ErrorKind;
use std::path::Path;

/// Quality for JPEG covers (0-100).
pub const JPEG_QUALITY: u8 = 95;

/// Pure Rust backend using the `image` crate codecs.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether covers can be written to `path`, judged by its extension.
pub fn can_encode(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|fmt| fmt.writing_enabled())
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<RgbImage, BackendError> {
        let reader = ImageReader::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BackendError::InputNotFound(path.to_path_buf()),
            _ => BackendError::Io(e),
        })?;
        // Content sniffing first, so a mislabelled extension still decodes.
        let reader = reader.with_guessed_format().map_err(BackendError::Io)?;
        let decode_error = |e: image::ImageError| BackendError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        let mut decoder = reader.into_decoder().map_err(decode_error)?;
        // Unreadable EXIF is treated as absent rather than failing the decode.
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
        let mut image = DynamicImage::from_decoder(decoder).map_err(decode_error)?;
        image.apply_orientation(orientation);
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            ?orientation,
            "decoded input"
        );
        Ok(image.into_rgb8())
    }

    fn encode(&self, image: &RgbImage, path: &Path) -> Result<(), BackendError> {
        let encode_error = |message: String| BackendError::EncodeWrite {
            path: path.to_path_buf(),
            message,
        };
        match ImageFormat::from_path(path) {
            Ok(ImageFormat::Jpeg) => {
                let file = std::fs::File::create(path).map_err(|e| encode_error(e.to_string()))?;
                let writer = std::io::BufWriter::new(file);
                image
                    .write_with_encoder(JpegEncoder::new_with_quality(writer, JPEG_QUALITY))
                    .map_err(|e| encode_error(e.to_string()))
            }
            _ => image.save(path).map_err(|e| encode_error(e.to_string())),
        }
    }
}
