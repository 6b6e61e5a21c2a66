//! Geometric transforms on [`Bitmap`](crate::image::Bitmap).
//!
//! Each transform computes a complete replacement grid from the current one
//! and swaps it in at the end; validation failures return before anything
//! is touched.
//!
//! - `rotate_quarter`: lossless quarter turns (counter-clockwise on screen).
//! - `rotate`: arbitrary angle by forward mapping with neighbour back-fill.
//! - `resize`: nearest-neighbour upscale, block-mean downscale.
//! - `crop`, `add_border`, `border_length`, `remove_border`.
pub mod border;
pub mod crop;
pub mod resize;
pub mod rotate;

use serde::Deserialize;

use crate::image::Pixel;

pub use self::resize::resize_grid;
pub use self::rotate::{quarter_turn, rotate_grid};

/// Options for [`Bitmap::rotate`](crate::image::Bitmap::rotate).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RotateOptions {
    /// Upscale factor applied before rotating and undone afterwards (>= 1).
    /// Larger values leave fewer unwritten cells at the cost of memory.
    pub resize_factor: f64,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self { resize_factor: 1.0 }
    }
}

impl RotateOptions {
    pub fn with_resize_factor(mut self, resize_factor: f64) -> Self {
        self.resize_factor = resize_factor;
        self
    }
}

/// Options for [`Bitmap::remove_border`](crate::image::Bitmap::remove_border).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RemoveBorderOptions {
    /// Border colour to strip (black by default).
    pub color: Pixel,
    /// Upper bound on the number of rings removed per side.
    pub max_length: Option<u32>,
}

impl RemoveBorderOptions {
    pub fn with_color(mut self, color: Pixel) -> Self {
        self.color = color;
        self
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

/// Tolerance used when flooring/ceiling products of pixel counts and
/// floating-point factors, so that e.g. `3 * (1/3)` still yields 1.
pub(crate) const SIZE_EPS: f64 = 1e-9;

#[inline]
pub(crate) fn scaled_len(len: usize, factor: f64) -> usize {
    (len as f64 * factor + SIZE_EPS).floor() as usize
}
