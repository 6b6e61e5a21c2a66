//! Pixel-wise comparison of two bitmaps of equal size.
//!
//! [`Bitmap::diff`] turns the receiver into a difference map: pixels that
//! match become black, pixels that differ become the per-channel absolute
//! difference. Clone first if the original is still needed.
use log::debug;
use serde::Serialize;

use crate::error::{BitmapError, Result};
use crate::image::{Bitmap, ImageView, Pixel};

/// Non-destructive comparison statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    pub identical: bool,
    pub differing_pixels: u64,
    pub total_pixels: u64,
    pub max_channel_delta: u8,
}

fn check_same_size(a: &Bitmap, b: &Bitmap) -> Result<()> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(BitmapError::dimension(format!(
            "cannot compare {}x{} with {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )));
    }
    Ok(())
}

impl Bitmap {
    /// Replace `self` by its difference map against `other` and report
    /// whether the two were identical.
    pub fn diff(&mut self, other: &Bitmap) -> Result<bool> {
        check_same_size(self, other)?;
        let mut identical = true;
        for (px, &theirs) in self.grid_mut().pixels_mut().zip(other.grid().pixels()) {
            if *px == theirs {
                *px = Pixel::BLACK;
            } else {
                identical = false;
                px.distance_abs(theirs);
            }
        }
        debug!("Bitmap::diff identical={identical}");
        Ok(identical)
    }

    /// Count differences without touching either bitmap.
    pub fn diff_summary(&self, other: &Bitmap) -> Result<DiffSummary> {
        check_same_size(self, other)?;
        let mut summary = DiffSummary {
            total_pixels: self.grid().as_slice().len() as u64,
            ..DiffSummary::default()
        };
        for (&a, &b) in self.grid().pixels().zip(other.grid().pixels()) {
            let delta = a.max_channel_delta(b);
            if delta > 0 {
                summary.differing_pixels += 1;
                summary.max_channel_delta = summary.max_channel_delta.max(delta);
            }
        }
        summary.identical = summary.differing_pixels == 0;
        Ok(summary)
    }
}
