//! Owned RGB pixel matrix in row-major layout, rows in BMP storage order.
//!
//! Every geometry-changing operation builds a fresh `PixelGrid` and moves it
//! into the owning [`Bitmap`](super::Bitmap); a grid is never resized in place.
use rayon::prelude::*;

use super::{ImageView, ImageViewMut, Pixel};
use crate::error::{BitmapError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    /// Grid width in pixels
    w: usize,
    /// Grid height in pixels
    h: usize,
    /// Backing storage, `w * h` pixels
    data: Vec<Pixel>,
}

impl PixelGrid {
    /// Grid of `w × h` pixels all set to `fill`.
    ///
    /// Fails when `w * h` overflows `usize`.
    pub fn filled(w: usize, h: usize, fill: Pixel) -> Result<Self> {
        let len = checked_area(w, h)?;
        Ok(Self {
            w,
            h,
            data: vec![fill; len],
        })
    }

    /// Black grid of `w × h` pixels.
    pub fn new(w: usize, h: usize) -> Result<Self> {
        Self::filled(w, h, Pixel::BLACK)
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(w: usize, h: usize, data: Vec<Pixel>) -> Result<Self> {
        let len = checked_area(w, h)?;
        if data.len() != len {
            return Err(BitmapError::dimension(format!(
                "buffer holds {} pixels, {w}x{h} needs {len}",
                data.len()
            )));
        }
        Ok(Self { w, h, data })
    }

    /// Wrap a buffer whose length the caller has already checked.
    pub(crate) fn from_raw(w: usize, h: usize, data: Vec<Pixel>) -> Self {
        debug_assert_eq!(data.len(), w * h);
        Self { w, h, data }
    }

    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> Pixel) -> Result<Self> {
        let len = checked_area(w, h)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Ok(Self { w, h, data })
    }

    /// Parallel variant of [`from_fn`](Self::from_fn); rows are filled
    /// independently so `f` must be pure.
    pub fn par_from_fn<F>(w: usize, h: usize, f: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> Pixel + Sync,
    {
        let mut grid = Self::new(w, h)?;
        if w > 0 {
            grid.data
                .par_chunks_mut(w)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, px) in row.iter_mut().enumerate() {
                        *px = f(x, y);
                    }
                });
        }
        Ok(grid)
    }

    #[inline]
    /// Convert (x, y) to a linear index into the backing buffer.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    /// Pixel at (x, y) or `None` when outside the grid.
    #[inline]
    pub fn try_get(&self, x: isize, y: isize) -> Option<Pixel> {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return None;
        }
        Some(self.data[self.idx(x as usize, y as usize)])
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Pixel {
        let i = self.idx(x, y);
        &mut self.data[i]
    }

    pub fn pixels(&self) -> impl Iterator<Item = &Pixel> {
        self.data.iter()
    }

    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut Pixel> {
        self.data.iter_mut()
    }

    /// Apply `f` to every pixel, row-parallel.
    pub fn par_for_each(&mut self, f: impl Fn(&mut Pixel) + Sync + Send) {
        self.data.par_iter_mut().for_each(f);
    }

    /// Copy of the rectangle starting at `(x, y)` with size `dx × dy`.
    /// The caller guarantees the rectangle lies inside the grid.
    pub(crate) fn sub_grid(&self, x: usize, y: usize, dx: usize, dy: usize) -> PixelGrid {
        let mut data = Vec::with_capacity(dx * dy);
        for row in y..y + dy {
            data.extend_from_slice(&self.row(row)[x..x + dx]);
        }
        PixelGrid { w: dx, h: dy, data }
    }

    pub fn into_vec(self) -> Vec<Pixel> {
        self.data
    }
}

fn checked_area(w: usize, h: usize) -> Result<usize> {
    w.checked_mul(h)
        .ok_or_else(|| BitmapError::dimension(format!("{w}x{h} overflows the address space")))
}

impl ImageView for PixelGrid {
    type Pixel = Pixel;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[Pixel] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> &[Pixel] {
        &self.data
    }
}

impl ImageViewMut for PixelGrid {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Pixel] {
        let start = y * self.w;
        let end = start + self.w;
        &mut self.data[start..end]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [Pixel] {
        &mut self.data
    }
}
