//! Image processing — pure Rust, statically linked.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode** | `image` codecs, format by content / extension |
//! | **Resize** | `image::imageops::resize` with `Triangle` (linear) filter |
//! | **Overlay + blend** | zeroed `ImageBuffer` + saturating weighted sum |
//! | **Title** | `cosmic-text` shaping + swash rasterization |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for placement math (unit testable)
//! - **Parameters**: Blend weights, feature switches, text style
//! - **Operations**: In-memory pixel stages (resize, overlay, blend)
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`] for file I/O
//! - **Text**: [`TextRenderer`] trait + [`CosmicTextRenderer`]

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;
pub mod text;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{InkBounds, TextBox, centered_origin};
pub use operations::{DimensionMismatch, blend, generate_overlay, resize};
pub use params::{BlendWeights, FeatureSwitch, TextStyle};
pub use rust_backend::RustBackend;
pub use text::{CosmicTextRenderer, TextError, TextRenderer, render_centered_text};
