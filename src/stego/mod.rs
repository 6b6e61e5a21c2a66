//! Least-significant-bit steganography.
//!
//! - [`Bitmap::hide_image`]: the top `bits` bits of each payload channel
//!   replace the low `bits` bits of the carrier channel at the same offset.
//! - [`Bitmap::extract_image`]: shifts the low `bits` bits of a region back
//!   to the top. Nothing is recorded in the carrier, so the caller supplies
//!   position, size and bit count.
//! - [`Bitmap::hide_text`] / [`Bitmap::extract_text`]: see [`text`].
pub mod text;

use log::debug;

use crate::error::{BitmapError, Result};
use crate::image::{Bitmap, ImageView, ImageViewMut};

/// Default number of low bits used per channel for image embedding.
pub const DEFAULT_BITS: u8 = 4;

fn check_bits(bits: u8) -> Result<()> {
    if !(1..=8).contains(&bits) {
        return Err(BitmapError::range("bits", format!("must be in 1..=8, got {bits}")));
    }
    Ok(())
}

fn check_region(bitmap: &Bitmap, x: u32, y: u32, dx: u32, dy: u32, what: &str) -> Result<()> {
    let fits_x = x.checked_add(dx).is_some_and(|end| end <= bitmap.width());
    let fits_y = y.checked_add(dy).is_some_and(|end| end <= bitmap.height());
    if !fits_x || !fits_y {
        return Err(BitmapError::dimension(format!(
            "{what} region ({x}, {y}) {dx}x{dy} does not fit in {}x{}",
            bitmap.width(),
            bitmap.height()
        )));
    }
    Ok(())
}

impl Bitmap {
    /// Embed `payload` with its row 0, column 0 at column `x`, row `y`,
    /// using the low `bits` bits (1..=8) of each carrier channel.
    pub fn hide_image(&mut self, payload: &Bitmap, x: u32, y: u32, bits: u8) -> Result<()> {
        check_bits(bits)?;
        check_region(self, x, y, payload.width(), payload.height(), "payload")?;
        debug!(
            "Bitmap::hide_image {} at ({x}, {y}) bits={bits} into {}",
            payload.describe(),
            self.describe()
        );
        let (x, y) = (x as usize, y as usize);
        let carrier = self.grid_mut();
        for (py, src) in payload.grid().rows().enumerate() {
            let dst = &mut carrier.row_mut(y + py)[x..x + src.len()];
            for (c, &p) in dst.iter_mut().zip(src) {
                c.insert_lsb(p, bits);
            }
        }
        Ok(())
    }

    /// Reveal an image previously hidden with [`hide_image`](Self::hide_image)
    /// in the `dx × dy` region at `(x, y)`. Pixels outside the region are
    /// left unchanged; only `bits` bits of precision come back.
    pub fn extract_image(&mut self, x: u32, y: u32, dx: u32, dy: u32, bits: u8) -> Result<()> {
        check_bits(bits)?;
        check_region(self, x, y, dx, dy, "extract")?;
        debug!("Bitmap::extract_image ({x}, {y}) {dx}x{dy} bits={bits}");
        let (x, y, dx, dy) = (x as usize, y as usize, dx as usize, dy as usize);
        let grid = self.grid_mut();
        for row in y..y + dy {
            for px in &mut grid.row_mut(row)[x..x + dx] {
                px.extract_lsb(bits);
            }
        }
        Ok(())
    }
}
