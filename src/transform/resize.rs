//! Integer-friendly rescaling.
//!
//! - factor > 1: nearest neighbour, `dst(x, y) = src(floor(x/f), floor(y/f))`.
//! - factor < 1: each destination pixel is the truncated mean of a
//!   `b × b` source block with `b = floor(1/f)`.
//!
//! The output is `floor(w·f) × floor(h·f)`. Rows are produced in parallel.
use log::debug;

use super::{scaled_len, SIZE_EPS};
use crate::error::{BitmapError, Result};
use crate::image::{Bitmap, ImageView, Pixel, PixelGrid};

/// Rescale `src` by `factor` into a new grid.
pub fn resize_grid(src: &PixelGrid, factor: f64) -> Result<PixelGrid> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(BitmapError::range(
            "factor",
            format!("must be a finite value > 0, got {factor}"),
        ));
    }
    if factor == 1.0 {
        return Ok(src.clone());
    }
    let (w, h) = (src.width(), src.height());
    if factor > 1.0 {
        let (nw, nh) = (scaled_len(w, factor), scaled_len(h, factor));
        debug!("resize_grid upscale {w}x{h} -> {nw}x{nh}");
        check_not_empty(nw, nh, factor)?;
        PixelGrid::par_from_fn(nw, nh, |x, y| {
            let sx = ((x as f64 / factor) as usize).min(w - 1);
            let sy = ((y as f64 / factor) as usize).min(h - 1);
            src.get(sx, sy)
        })
    } else {
        let block = ((1.0 / factor + SIZE_EPS).floor() as usize).max(1);
        let nw = scaled_len(w, factor).min(w / block);
        let nh = scaled_len(h, factor).min(h / block);
        debug!("resize_grid downscale {w}x{h} -> {nw}x{nh} block={block}");
        check_not_empty(nw, nh, factor)?;
        // 255 * block² overflows u32 once block > 4104
        let count = (block * block) as u64;
        PixelGrid::par_from_fn(nw, nh, |x, y| {
            let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
            for sy in y * block..(y + 1) * block {
                for px in &src.row(sy)[x * block..(x + 1) * block] {
                    r += px.red as u64;
                    g += px.green as u64;
                    b += px.blue as u64;
                }
            }
            Pixel::new((r / count) as u8, (g / count) as u8, (b / count) as u8)
        })
    }
}

fn check_not_empty(nw: usize, nh: usize, factor: f64) -> Result<()> {
    if nw == 0 || nh == 0 {
        return Err(BitmapError::dimension(format!(
            "resizing by {factor} would produce an empty {nw}x{nh} image"
        )));
    }
    Ok(())
}

impl Bitmap {
    /// Rescale by `factor`. `1.0` is a no-op; values `<= 0` are rejected.
    pub fn resize(&mut self, factor: f64) -> Result<()> {
        if factor == 1.0 {
            return Ok(());
        }
        let grid = resize_grid(self.grid(), factor)?;
        self.replace_grid(grid);
        Ok(())
    }
}
