//! Per-pixel tone filters and kernel-based convolution filters.
//!
//! Every convolution writes into a fresh grid, so results never feed back
//! into the samples of neighbouring pixels.
pub mod convolve;
pub mod kernel;

use serde::Deserialize;

pub use self::convolve::convolve_grid;
pub use self::kernel::{
    ConvolutionKernel, Kernel, StaticKernel, BOX_BLUR, EDGE_DETECTION, GAUSSIAN_BLUR_3,
    GAUSSIAN_BLUR_5, SHARPEN, UNSHARP_MASK_5,
};

use crate::error::Result;
use crate::image::{Bitmap, ImageView, ImageViewMut, Pixel};

/// Options for [`Bitmap::edge_detection`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EdgeDetectionOptions {
    /// Convert to grayscale before convolving.
    pub gray: bool,
    /// Zero the outermost ring afterwards, where half the kernel was skipped.
    pub discard_border: bool,
}

impl Default for EdgeDetectionOptions {
    fn default() -> Self {
        Self {
            gray: true,
            discard_border: false,
        }
    }
}

impl EdgeDetectionOptions {
    pub fn with_gray(mut self, gray: bool) -> Self {
        self.gray = gray;
        self
    }

    pub fn with_discard_border(mut self, discard_border: bool) -> Self {
        self.discard_border = discard_border;
        self
    }
}

impl Bitmap {
    /// Apply an arbitrary kernel.
    pub fn convolve<K: ConvolutionKernel + Sync + ?Sized>(&mut self, kernel: &K) -> Result<()> {
        let grid = convolve_grid(self.grid(), kernel)?;
        self.replace_grid(grid);
        Ok(())
    }

    pub fn edge_detection(&mut self, options: EdgeDetectionOptions) -> Result<()> {
        let mut grid = if options.gray {
            let mut gray = self.grid().clone();
            gray.par_for_each(Pixel::grayscale);
            convolve_grid(&gray, &EDGE_DETECTION)?
        } else {
            convolve_grid(self.grid(), &EDGE_DETECTION)?
        };
        if options.discard_border && !grid.is_empty() {
            let (w, h) = (grid.width(), grid.height());
            grid.row_mut(0).fill(Pixel::BLACK);
            grid.row_mut(h - 1).fill(Pixel::BLACK);
            for y in 0..h {
                grid.set(0, y, Pixel::BLACK);
                grid.set(w - 1, y, Pixel::BLACK);
            }
        }
        self.replace_grid(grid);
        Ok(())
    }

    pub fn sharpen(&mut self) -> Result<()> {
        self.convolve(&SHARPEN)
    }

    pub fn gaussian_blur_3(&mut self) -> Result<()> {
        self.convolve(&GAUSSIAN_BLUR_3)
    }

    pub fn gaussian_blur_5(&mut self) -> Result<()> {
        self.convolve(&GAUSSIAN_BLUR_5)
    }

    pub fn unsharp_mask_5(&mut self) -> Result<()> {
        self.convolve(&UNSHARP_MASK_5)
    }

    pub fn box_blur(&mut self) -> Result<()> {
        self.convolve(&BOX_BLUR)
    }

    /// Replace each pixel by the truncated mean of its channels.
    pub fn grayscale(&mut self) {
        self.grid_mut().par_for_each(Pixel::grayscale);
    }

    pub fn invert(&mut self) {
        self.grid_mut().par_for_each(Pixel::invert);
    }
}
