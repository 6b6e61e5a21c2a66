//! Uniform borders: add one, measure one, strip one.
//!
//! `border_length` counts complete rings: ring `l` is row `l`, row
//! `h-1-l`, column `l` and column `w-1-l`, restricted to the part not yet
//! covered by rings `0..l`.
use log::debug;

use super::RemoveBorderOptions;
use crate::error::{BitmapError, Result};
use crate::image::{Bitmap, ImageView, ImageViewMut, Pixel, PixelGrid};

fn ring_is(grid: &PixelGrid, l: usize, color: Pixel) -> bool {
    let (w, h) = (grid.width(), grid.height());
    let (right, bottom) = (w - 1 - l, h - 1 - l);
    let rows_ok = [l, bottom]
        .iter()
        .all(|&y| grid.row(y)[l..=right].iter().all(|&p| p == color));
    rows_ok && (l..=bottom).all(|y| grid.get(l, y) == color && grid.get(right, y) == color)
}

impl Bitmap {
    /// Grow by `size` pixels on every side, filling the new area with `color`.
    pub fn add_border(&mut self, size: u32, color: Pixel) -> Result<()> {
        if size == 0 {
            return Ok(());
        }
        let grow = |len: u32| {
            size.checked_mul(2)
                .and_then(|s| len.checked_add(s))
                .ok_or_else(|| BitmapError::dimension(format!("border {size} overflows {len}")))
        };
        let (nw, nh) = (grow(self.width())?, grow(self.height())?);
        let mut grid = PixelGrid::filled(nw as usize, nh as usize, color)?;
        let s = size as usize;
        for (y, row) in self.grid().rows().enumerate() {
            grid.row_mut(y + s)[s..s + row.len()].copy_from_slice(row);
        }
        self.replace_grid(grid);
        Ok(())
    }

    /// Number of complete outer rings made only of `color`.
    pub fn border_length(&self, color: Pixel) -> u32 {
        let grid = self.grid();
        let max = grid.width().min(grid.height()).div_ceil(2);
        let mut l = 0;
        while l < max && ring_is(grid, l, color) {
            l += 1;
        }
        l as u32
    }

    /// Crop away the uniform border and return how many rings were removed
    /// per side. At least one row and column always remain.
    pub fn remove_border(&mut self, options: RemoveBorderOptions) -> Result<u32> {
        let found = self.border_length(options.color);
        let keep_one = (self.width().min(self.height()).saturating_sub(1)) / 2;
        let l = found
            .min(options.max_length.unwrap_or(u32::MAX))
            .min(keep_one);
        debug!("Bitmap::remove_border found={found} removing={l}");
        if l > 0 {
            self.crop(l, l, self.width() - 2 * l, self.height() - 2 * l)?;
        }
        Ok(l)
    }
}
