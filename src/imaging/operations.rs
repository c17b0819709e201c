//! Pixel operations on in-memory image buffers.
//!
//! These are the resize → overlay → blend stages of the cover pipeline.
//! They work on any 8-bit [`ImageBuffer`]; the channel count is carried by
//! the pixel type.

use super::params::BlendWeights;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Pixel};
use thiserror::Error;

/// An 8-bit-per-channel image buffer.
pub type Buffer<P> = ImageBuffer<P, Vec<u8>>;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("cannot blend {foreground:?} layer onto {background:?} image: dimensions differ")]
pub struct DimensionMismatch {
    pub foreground: (u32, u32),
    pub background: (u32, u32),
}

/// Resample `image` to exactly `width` × `height` with linear interpolation.
///
/// Aspect ratio is not preserved; the image is stretched or squashed to fit.
/// An image already at the target size is returned unchanged.
pub fn resize<P>(image: &Buffer<P>, width: u32, height: u32) -> Buffer<P>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    // Triangle widens its support when downscaling, so large reductions
    // average more source pixels than a fixed two-tap bilinear would.
    imageops::resize(image, width, height, FilterType::Triangle)
}

/// A fully black layer of `width` × `height` pixels.
pub fn generate_overlay<P>(width: u32, height: u32) -> Buffer<P>
where
    P: Pixel<Subpixel = u8>,
{
    ImageBuffer::new(width, height)
}

/// Per-sample weighted sum of two equally sized images.
///
/// `out = background * bg_weight + foreground * fg_weight + bias`, rounded
/// half-to-even and saturated to `[0, 255]`.
pub fn blend<P>(
    foreground: &Buffer<P>,
    background: &Buffer<P>,
    weights: BlendWeights,
) -> Result<Buffer<P>, DimensionMismatch>
where
    P: Pixel<Subpixel = u8>,
{
    if foreground.dimensions() != background.dimensions() {
        return Err(DimensionMismatch {
            foreground: foreground.dimensions(),
            background: background.dimensions(),
        });
    }

    let (fg_w, bg_w, bias) = (weights.foreground(), weights.background(), weights.bias());
    let samples: Vec<u8> = foreground
        .as_raw()
        .iter()
        .zip(background.as_raw())
        .map(|(&f, &b)| {
            let v = f32::from(b) * bg_w + f32::from(f) * fg_w + bias;
            v.round_ties_even().clamp(0.0, 255.0) as u8
        })
        .collect();

    let (width, height) = background.dimensions();
    // Same length as both inputs, so construction cannot fail.
    Ok(ImageBuffer::from_raw(width, height, samples).expect("blend output matches input size"))
}
