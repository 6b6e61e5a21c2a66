//! The owned 24-bit image every operation in the crate works on.
//!
//! A `Bitmap` owns exactly one [`PixelGrid`]; its width and height are read
//! from that grid so they cannot drift apart. Operations that change the
//! geometry compute a complete replacement grid first and swap it in with
//! [`Bitmap::replace_grid`], so a failing operation leaves the bitmap intact.
use log::debug;

use super::{ImageView, ImageViewMut, Pixel, PixelGrid};
use crate::bmp::{self, DecodeLimits};
use crate::error::{BitmapError, Result};

/// The only pixel depth the codec reads and writes.
pub const BITS_PER_PIXEL: u16 = 24;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    grid: PixelGrid,
}

impl Bitmap {
    /// Parse a BMP buffer with the default [`DecodeLimits`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bmp::decode(bytes, &DecodeLimits::default())
    }

    /// Parse a BMP buffer, rejecting images larger than `limits`.
    pub fn from_bytes_with_limits(bytes: &[u8], limits: &DecodeLimits) -> Result<Self> {
        bmp::decode(bytes, limits)
    }

    /// Serialize to an uncompressed 24-bit BMP.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bmp::encode(&self.grid)
    }

    /// Build a bitmap of `width × height` by asking `source(x, y)` for each
    /// pixel, row by row starting at row 0 (the first row stored in the file).
    ///
    /// `bits_per_pixel` must be 24.
    pub fn from_dimensions(
        width: u32,
        height: u32,
        bits_per_pixel: u16,
        mut source: impl FnMut(u32, u32) -> Pixel,
    ) -> Result<Self> {
        if bits_per_pixel != BITS_PER_PIXEL {
            return Err(BitmapError::range(
                "bits_per_pixel",
                format!("only {BITS_PER_PIXEL} is supported, got {bits_per_pixel}"),
            ));
        }
        let grid = PixelGrid::from_fn(width as usize, height as usize, |x, y| {
            source(x as u32, y as u32)
        })?;
        Ok(Self { grid })
    }

    /// Canvas of `width × height` filled with `color`.
    pub fn blank(width: u32, height: u32, color: Pixel) -> Result<Self> {
        let grid = PixelGrid::filled(width as usize, height as usize, color)?;
        Ok(Self { grid })
    }

    /// Take ownership of an existing grid.
    pub fn from_grid(grid: PixelGrid) -> Self {
        Self { grid }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.grid.width() as u32
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.grid.height() as u32
    }

    #[inline]
    pub fn bits_per_pixel(&self) -> u16 {
        BITS_PER_PIXEL
    }

    #[inline]
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Pixel at column `x`, row `y` (row 0 is the bottom of the picture).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        self.grid.try_get(x as isize, y as isize)
    }

    /// Overwrite one pixel. Out-of-range coordinates are a dimension error.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: Pixel) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(BitmapError::dimension(format!(
                "pixel ({x}, {y}) outside {}x{}",
                self.width(),
                self.height()
            )));
        }
        self.grid.set(x as usize, y as usize, value);
        Ok(())
    }

    pub(crate) fn grid_mut(&mut self) -> &mut PixelGrid {
        &mut self.grid
    }

    /// Swap in a new grid, returning the previous one.
    pub(crate) fn replace_grid(&mut self, grid: PixelGrid) -> PixelGrid {
        if grid.width() != self.grid.width() || grid.height() != self.grid.height() {
            debug!(
                "Bitmap: {}x{} -> {}x{}",
                self.grid.width(),
                self.grid.height(),
                grid.width(),
                grid.height()
            );
        }
        std::mem::replace(&mut self.grid, grid)
    }

    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }

    /// Short human-readable description, e.g. `700x700 @ 24bpp`.
    pub fn describe(&self) -> String {
        format!("{}x{} @ {}bpp", self.width(), self.height(), BITS_PER_PIXEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_dimensions_queries_every_cell() {
        let img =
            Bitmap::from_dimensions(4, 3, 24, |x, y| Pixel::new(x as u8, y as u8, 0)).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
        assert_eq!(img.pixel(3, 2), Some(Pixel::new(3, 2, 0)));
        assert_eq!(img.pixel(4, 0), None);
    }

    #[test]
    fn from_dimensions_rejects_other_depths() {
        let err = Bitmap::from_dimensions(1, 1, 32, |_, _| Pixel::BLACK).unwrap_err();
        assert!(matches!(err, BitmapError::Range { name: "bits_per_pixel", .. }));
    }

    #[test]
    fn clone_is_deep() {
        let original = Bitmap::blank(2, 2, Pixel::WHITE).unwrap();
        let mut copy = original.clone();
        copy.set_pixel(0, 0, Pixel::BLACK).unwrap();
        assert_eq!(original.pixel(0, 0), Some(Pixel::WHITE));
        assert_eq!(copy.pixel(0, 0), Some(Pixel::BLACK));
    }

    #[test]
    fn set_pixel_out_of_range_leaves_image_alone() {
        let mut img = Bitmap::blank(2, 2, Pixel::WHITE).unwrap();
        let before = img.clone();
        assert!(img.set_pixel(2, 0, Pixel::BLACK).is_err());
        assert_eq!(img, before);
        assert_eq!(img.describe(), "2x2 @ 24bpp");
    }
}
