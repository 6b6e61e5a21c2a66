//! Quarter-turn and arbitrary-angle rotation.
//!
//! Arbitrary angles use forward mapping: every source pixel is pushed
//! through the rotation about the image centre and rounded to the nearest
//! destination cell. Forward mapping leaves holes, so each written pixel
//! also fills its four orthogonal neighbours if they are still black.
//! Genuinely black pixels are indistinguishable from holes and may be
//! overwritten; the output depends on this exact rule.
use log::debug;
use nalgebra::{Rotation2, Vector2};

use super::{resize_grid, RotateOptions, SIZE_EPS};
use crate::error::{BitmapError, Result};
use crate::image::{Bitmap, ImageView, ImageViewMut, PixelGrid};

const NEIGHBOURS: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// One quarter turn: `new[x][h-1-y] = old[y][x]`.
///
/// Rows are stored bottom-up, so this turns the picture counter-clockwise.
pub fn quarter_turn(src: &PixelGrid) -> PixelGrid {
    let (w, h) = (src.width(), src.height());
    let mut data = Vec::with_capacity(w * h);
    for ny in 0..w {
        for nx in 0..h {
            data.push(src.get(ny, h - 1 - nx));
        }
    }
    PixelGrid::from_raw(h, w, data)
}

/// Size of the axis-aligned box containing a `w × h` image rotated by `theta`.
pub fn rotated_bounds(w: usize, h: usize, theta: f64) -> (usize, usize) {
    let (sin, cos) = theta.sin_cos();
    let (w, h) = (w as f64, h as f64);
    let nw = ((w * cos).abs() + (h * sin).abs() - SIZE_EPS).ceil();
    let nh = ((w * sin).abs() + (h * cos).abs() - SIZE_EPS).ceil();
    (nw.max(1.0) as usize, nh.max(1.0) as usize)
}

/// Forward-map `src` through a rotation by `theta` radians (counter-clockwise
/// on screen, matching [`quarter_turn`]) into a black canvas sized by [`rotated_bounds`].
pub fn rotate_grid(src: &PixelGrid, theta: f64) -> Result<PixelGrid> {
    let (w, h) = (src.width(), src.height());
    let (nw, nh) = rotated_bounds(w, h, theta);
    let mut dst = PixelGrid::new(nw, nh)?;

    let rot = Rotation2::new(theta);
    let src_c = Vector2::new((w as f64 - 1.0) / 2.0, (h as f64 - 1.0) / 2.0);
    let dst_c = Vector2::new((nw as f64 - 1.0) / 2.0, (nh as f64 - 1.0) / 2.0);

    for (y, row) in src.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let p = rot * (Vector2::new(x as f64, y as f64) - src_c) + dst_c;
            let (dx, dy) = (p.x.round() as isize, p.y.round() as isize);
            if dst.try_get(dx, dy).is_none() {
                continue;
            }
            dst.set(dx as usize, dy as usize, px);
            for (ox, oy) in NEIGHBOURS {
                let (nx, ny) = (dx + ox, dy + oy);
                if dst.try_get(nx, ny).is_some() {
                    dst.get_mut(nx as usize, ny as usize).update_if_empty(px);
                }
            }
        }
    }
    Ok(dst)
}

impl Bitmap {
    /// Rotate by `n` counter-clockwise quarter turns; `n` is taken modulo 4,
    /// so negative values turn clockwise.
    pub fn rotate_quarter(&mut self, n: i32) {
        let turns = n.rem_euclid(4);
        if turns == 0 {
            return;
        }
        let mut grid = quarter_turn(self.grid());
        for _ in 1..turns {
            grid = quarter_turn(&grid);
        }
        self.replace_grid(grid);
    }

    /// Rotate counter-clockwise by `degrees`.
    ///
    /// Multiples of 90° are exact quarter turns. Any other angle grows the
    /// canvas to the rotated bounding box and leaves black corners; see
    /// [`remove_border`](Self::remove_border) to trim them after rotating back.
    pub fn rotate(&mut self, degrees: f64, options: RotateOptions) -> Result<()> {
        if !degrees.is_finite() {
            return Err(BitmapError::range("degrees", format!("must be finite, got {degrees}")));
        }
        let factor = options.resize_factor;
        if !factor.is_finite() || factor < 1.0 {
            return Err(BitmapError::range(
                "resize_factor",
                format!("must be a finite value >= 1, got {factor}"),
            ));
        }

        let quarters = degrees / 90.0;
        if quarters.fract() == 0.0 {
            self.rotate_quarter((quarters.rem_euclid(4.0)) as i32);
            return Ok(());
        }

        debug!(
            "Bitmap::rotate {degrees}deg on {}x{} resize_factor={factor}",
            self.width(),
            self.height()
        );
        let upscaled;
        let src = if factor != 1.0 {
            upscaled = resize_grid(self.grid(), factor)?;
            &upscaled
        } else {
            self.grid()
        };
        let mut rotated = rotate_grid(src, degrees.to_radians())?;
        if factor != 1.0 {
            rotated = resize_grid(&rotated, 1.0 / factor)?;
        }
        self.replace_grid(rotated);
        Ok(())
    }
}
