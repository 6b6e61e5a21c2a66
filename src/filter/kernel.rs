//! Integer convolution kernels.
//!
//! [`StaticKernel`] wraps the built-in presets; [`Kernel`] owns a
//! user-supplied matrix and validates it on construction. Both are consumed
//! through the [`ConvolutionKernel`] trait.
use serde::Deserialize;

use crate::error::{BitmapError, Result};

/// Rectangular integer weight matrix (row-major) plus a divisor.
pub trait ConvolutionKernel {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    /// `rows * cols` weights in row-major order.
    fn weights(&self) -> &[i32];
    /// Non-zero divisor applied to each weighted sum.
    fn divisor(&self) -> i32;

    #[inline]
    fn weight(&self, r: usize, c: usize) -> i32 {
        self.weights()[r * self.cols() + c]
    }
}

/// Kernel backed by a static table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticKernel {
    rows: usize,
    cols: usize,
    weights: &'static [i32],
    divisor: i32,
}

impl StaticKernel {
    pub const fn new(rows: usize, cols: usize, weights: &'static [i32], divisor: i32) -> Self {
        assert!(weights.len() == rows * cols && divisor != 0);
        Self {
            rows,
            cols,
            weights,
            divisor,
        }
    }
}

impl ConvolutionKernel for StaticKernel {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }
    #[inline]
    fn weights(&self) -> &[i32] {
        self.weights
    }
    #[inline]
    fn divisor(&self) -> i32 {
        self.divisor
    }
}

/// Laplacian edge detector.
pub const EDGE_DETECTION: StaticKernel =
    StaticKernel::new(3, 3, &[0, -1, 0, -1, 4, -1, 0, -1, 0], 1);

pub const SHARPEN: StaticKernel = StaticKernel::new(3, 3, &[0, -1, 0, -1, 5, -1, 0, -1, 0], 1);

/// `[1 2 1]ᵀ[1 2 1] / 16`.
pub const GAUSSIAN_BLUR_3: StaticKernel =
    StaticKernel::new(3, 3, &[1, 2, 1, 2, 4, 2, 1, 2, 1], 16);

/// `[1 4 6 4 1]ᵀ[1 4 6 4 1] / 256`.
pub const GAUSSIAN_BLUR_5: StaticKernel = StaticKernel::new(
    5,
    5,
    &[
        1, 4, 6, 4, 1, //
        4, 16, 24, 16, 4, //
        6, 24, 36, 24, 6, //
        4, 16, 24, 16, 4, //
        1, 4, 6, 4, 1,
    ],
    256,
);

/// Gaussian 5×5 with a `-476` centre; the negative divisor flips the sign
/// back so the result is `2·x - blur(x)`.
pub const UNSHARP_MASK_5: StaticKernel = StaticKernel::new(
    5,
    5,
    &[
        1, 4, 6, 4, 1, //
        4, 16, 24, 16, 4, //
        6, 24, -476, 24, 6, //
        4, 16, 24, 16, 4, //
        1, 4, 6, 4, 1,
    ],
    -256,
);

pub const BOX_BLUR: StaticKernel = StaticKernel::new(3, 3, &[1, 1, 1, 1, 1, 1, 1, 1, 1], 9);

/// Owned, validated kernel for custom filters.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "KernelSpec")]
pub struct Kernel {
    rows: usize,
    cols: usize,
    weights: Vec<i32>,
    divisor: i32,
}

impl Kernel {
    /// Build from a list of rows. Rows must be non-empty and of equal
    /// length; `divisor` must not be zero.
    pub fn new(matrix: Vec<Vec<i32>>, divisor: i32) -> Result<Self> {
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(BitmapError::range("kernel", "must have at least one weight"));
        }
        if let Some(bad) = matrix.iter().position(|r| r.len() != cols) {
            return Err(BitmapError::range(
                "kernel",
                format!("row {bad} has {} weights, expected {cols}", matrix[bad].len()),
            ));
        }
        if divisor == 0 {
            return Err(BitmapError::range("divisor", "must not be zero"));
        }
        Ok(Self {
            rows,
            cols,
            weights: matrix.into_iter().flatten().collect(),
            divisor,
        })
    }

    /// Single `1` at the centre of a `size × size` matrix.
    pub fn identity(size: usize) -> Result<Self> {
        let mut matrix = vec![vec![0; size]; size];
        if size > 0 {
            matrix[size / 2][size / 2] = 1;
        }
        Self::new(matrix, 1)
    }
}

impl ConvolutionKernel for Kernel {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }
    #[inline]
    fn weights(&self) -> &[i32] {
        &self.weights
    }
    #[inline]
    fn divisor(&self) -> i32 {
        self.divisor
    }
}

/// JSON shape of a custom kernel: `{ "matrix": [[...], ...], "divisor": 1 }`.
#[derive(Deserialize)]
struct KernelSpec {
    matrix: Vec<Vec<i32>>,
    #[serde(default = "default_divisor")]
    divisor: i32,
}

fn default_divisor() -> i32 {
    1
}

impl TryFrom<KernelSpec> for Kernel {
    type Error = BitmapError;

    fn try_from(spec: KernelSpec) -> Result<Self> {
        Kernel::new(spec.matrix, spec.divisor)
    }
}
