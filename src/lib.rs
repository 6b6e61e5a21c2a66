#![doc = include_str!("../README.md")]

// Core data model and codec.
pub mod bmp;
pub mod error;
pub mod image;

// Operations on a `Bitmap`; each module adds methods through `impl Bitmap`.
pub mod diff;
pub mod filter;
pub mod stego;
pub mod transform;

// Outer surface used by the binaries.
pub mod config;
pub mod diagnostics;

// --- High-level re-exports -------------------------------------------------

pub use crate::bmp::DecodeLimits;
pub use crate::diff::DiffSummary;
pub use crate::error::{BitmapError, Result};
pub use crate::filter::{EdgeDetectionOptions, Kernel};
pub use crate::image::{Bitmap, Pixel, PixelGrid};
pub use crate::transform::{RemoveBorderOptions, RotateOptions};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use bitmap_lab::prelude::*;
///
/// # fn main() -> bitmap_lab::Result<()> {
/// let mut img = Bitmap::from_dimensions(64, 48, 24, |x, y| {
///     Pixel::new((x * 4) as u8, (y * 5) as u8, 128)
/// })?;
/// img.add_border(2, Pixel::WHITE)?;
/// img.rotate(30.0, RotateOptions::default().with_resize_factor(2.0))?;
/// img.gaussian_blur_3()?;
///
/// let bytes = img.to_bytes()?;
/// let back = Bitmap::from_bytes(&bytes)?;
/// assert_eq!(back, img);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageView, ImageViewMut};
    pub use crate::{
        Bitmap, BitmapError, DecodeLimits, EdgeDetectionOptions, Pixel, RemoveBorderOptions,
        RotateOptions,
    };
}
