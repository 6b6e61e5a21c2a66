//! Generic integer convolution.
//!
//! For every output pixel the kernel is centred at `(rows/2, cols/2)`;
//! source samples that fall outside the image are skipped (no clamping,
//! no wrapping). The weighted sum is divided by the kernel divisor with
//! truncation toward zero, then clamped to `[0, 255]`.
//!
//! Output rows are independent and computed in parallel.
use log::debug;

use super::kernel::ConvolutionKernel;
use crate::error::Result;
use crate::image::{ImageView, Pixel, PixelGrid};

#[inline]
fn clamp_channel(v: i64) -> u8 {
    v.clamp(0, 255) as u8
}

/// Convolve `src` with `kernel` into a new grid of the same size.
pub fn convolve_grid<K: ConvolutionKernel + Sync + ?Sized>(
    src: &PixelGrid,
    kernel: &K,
) -> Result<PixelGrid> {
    let (w, h) = (src.width() as isize, src.height() as isize);
    let (rows, cols) = (kernel.rows(), kernel.cols());
    let (cy, cx) = ((rows / 2) as isize, (cols / 2) as isize);
    let div = kernel.divisor() as i64;
    debug!(
        "convolve_grid {}x{} kernel={rows}x{cols} divisor={div}",
        src.width(),
        src.height()
    );

    PixelGrid::par_from_fn(src.width(), src.height(), |x, y| {
        let (mut r, mut g, mut b) = (0i64, 0i64, 0i64);
        for k in 0..rows {
            let sy = y as isize + k as isize - cy;
            if sy < 0 || sy >= h {
                continue;
            }
            let row = src.row(sy as usize);
            for l in 0..cols {
                let sx = x as isize + l as isize - cx;
                if sx < 0 || sx >= w {
                    continue;
                }
                let weight = kernel.weight(k, l) as i64;
                let px = row[sx as usize];
                r += px.red as i64 * weight;
                g += px.green as i64 * weight;
                b += px.blue as i64 * weight;
            }
        }
        Pixel::new(
            clamp_channel(r / div),
            clamp_channel(g / div),
            clamp_channel(b / div),
        )
    })
}
