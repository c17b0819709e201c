//! Image I/O backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the two file operations the cover
//! pipeline needs: decode an input into an RGB buffer and encode a finished
//! cover to disk. Everything between those two steps is in-memory.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate's pure-Rust codecs.

use image::RgbImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Input image not found: {0}")]
    InputNotFound(PathBuf),
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("Failed to write {path}: {message}")]
    EncodeWrite { path: PathBuf, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for image I/O backends.
pub trait ImageBackend {
    /// Decode an image file into an 8-bit RGB buffer. Alpha is discarded.
    fn decode(&self, path: &Path) -> Result<RgbImage, BackendError>;

    /// Encode `image` to `path`, choosing the format from the extension.
    fn encode(&self, image: &RgbImage, path: &Path) -> Result<(), BackendError>;
}
