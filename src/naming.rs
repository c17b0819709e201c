//! Output file naming for generated covers.
//!
//! A cover is written next to its source image (or into a destination
//! directory) under the source's stem with a fixed suffix:
//!
//! - `folder/poster.png` → `folder/poster (Cover).png`
//! - `Movies.backdrop.jpg` → `Movies.backdrop (Cover).jpg` (only the last extension counts)
//! - with destination `out/`: `folder/poster.png` → `out/poster (Cover).png`
//!
//! The extension picks the encoder, so a source without one has no valid
//! cover name.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix inserted between the stem and the extension.
pub const COVER_SUFFIX: &str = " (Cover)";

/// Derive the cover path for `source`.
///
/// Returns `None` when `source` has no file stem or no extension.
pub fn cover_output_path(source: &Path, destination: Option<&Path>) -> Option<PathBuf> {
    let stem = source.file_stem()?;
    let extension = source.extension()?;

    let mut file_name = OsString::from(stem);
    file_name.push(COVER_SUFFIX);
    file_name.push(".");
    file_name.push(extension);

    let dir = match destination {
        Some(dir) => dir,
        None => source.parent().unwrap_or(Path::new("")),
    };
    Some(dir.join(file_name))
}
