//! # Library Cover
//!
//! Generates library cover images in the style Jellyfin and Emby use for
//! their library tiles: a photo stretched to 960×540, darkened by blending
//! it with a black layer, and the library title drawn across the middle in
//! a fixed font.
//!
//! # Pipeline
//!
//! Every cover goes through the same straight-line pipeline. Any stage
//! failing aborts the cover; there are no retries.
//!
//! ```text
//! decode → resize → blend with black → draw title → encode "<stem> (Cover).<ext>"
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`cover`] | Orchestration: single covers and fail-fast batches |
//! | [`imaging`] | Pixel operations, image I/O backend, text rendering |
//! | [`config`] | `library-cover.toml` loading, validation, stock defaults |
//! | [`naming`] | Output file naming (`poster.png` → `poster (Cover).png`) |
//! | [`fonts`] | Font file resolution and the startup capability probe |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Explicit Configuration
//!
//! All styling constants live in one [`config::CoverConfig`] value that is
//! passed down explicitly. There is no global state; a config file only
//! overrides what it names.
//!
//! ## Capabilities as Traits
//!
//! The pipeline needs two outside capabilities: reading/writing image files
//! ([`imaging::ImageBackend`]) and rendering text with a font
//! ([`imaging::TextRenderer`]). Both are traits so the composition logic can
//! be tested with a mock backend and a font-free stub renderer.
//!
//! ## Shaping Is Built In
//!
//! Text is shaped with `cosmic-text`, which statically links its shaper and
//! bidi support. There is no native library to probe for or install; the
//! startup check in [`fonts::probe`] only has to find and load the font.

pub mod config;
pub mod cover;
pub mod fonts;
pub mod imaging;
pub mod logging;
pub mod naming;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
