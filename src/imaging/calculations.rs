//! Pure layout math for cover composition.
//!
//! All functions here are pure and testable without any I/O or images.

/// Ink extents of rendered text, measured from the pen origin.
///
/// `width` is the rightmost inked column + 1 and `height` the lowest inked
/// row + 1, both relative to the top-left of the text layout. Leading
/// side bearings are therefore part of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBox {
    pub width: u32,
    pub height: u32,
}

/// Compute the pen origin that centers `text` on `canvas`, shifted upward.
///
/// ```text
/// x = (canvas_width - text_width) / 2
/// y = (canvas_height - height_offset - text_height) / 2
/// ```
///
/// Division floors, so text larger than the canvas yields a negative origin
/// and overhangs evenly on both sides.
///
/// # Examples
/// ```
/// # use library_cover::imaging::{TextBox, centered_origin};
/// let origin = centered_origin((960, 540), TextBox { width: 400, height: 100 }, 64);
/// assert_eq!(origin, (280, 188));
/// ```
pub fn centered_origin(canvas: (u32, u32), text: TextBox, height_offset: i32) -> (i32, i32) {
    let (canvas_w, canvas_h) = (i64::from(canvas.0), i64::from(canvas.1));
    let x = (canvas_w - i64::from(text.width)).div_euclid(2);
    let y = (canvas_h - i64::from(height_offset) - i64::from(text.height)).div_euclid(2);
    (saturate_i32(x), saturate_i32(y))
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Accumulates the ink box of pixels as a renderer reports them.
#[derive(Debug, Clone, Copy, Default)]
pub struct InkBounds {
    right: Option<i32>,
    bottom: Option<i32>,
}

impl InkBounds {
    /// Record one inked pixel at `(x, y)` relative to the pen origin.
    pub fn add(&mut self, x: i32, y: i32) {
        self.right = Some(self.right.map_or(x, |r| r.max(x)));
        self.bottom = Some(self.bottom.map_or(y, |b| b.max(y)));
    }

    /// The accumulated box; empty when nothing was inked.
    pub fn text_box(self) -> TextBox {
        let extent = |edge: Option<i32>| edge.map_or(0, |e| (e + 1).max(0) as u32);
        TextBox {
            width: extent(self.right),
            height: extent(self.bottom),
        }
    }
}
