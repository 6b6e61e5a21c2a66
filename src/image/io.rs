//! File helpers around the in-memory codec.
//!
//! - `read_bitmap` / `write_bitmap`: BMP files through [`crate::bmp`].
//! - `load_rgb_image`: any format the `image` crate decodes, as a [`Bitmap`].
//! - `save_png`: PNG preview of a bitmap.
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - [`FileSource`]: the filesystem [`BitmapSource`] used by the pipeline.
use std::fs;
use std::path::Path;

use image::{ImageFormat, RgbImage};
use log::debug;
use serde::Serialize;

use super::{Bitmap, ImageView, Pixel};
use crate::bmp::DecodeLimits;
use crate::config::BitmapSource;

/// Read and decode a BMP file.
pub fn read_bitmap(path: &Path, limits: &DecodeLimits) -> Result<Bitmap, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    Bitmap::from_bytes_with_limits(&bytes, limits)
        .map_err(|e| format!("Failed to decode {}: {e}", path.display()))
}

/// Encode `bitmap` and write it to `path`, creating parent directories.
pub fn write_bitmap(bitmap: &Bitmap, path: &Path) -> Result<(), String> {
    let bytes = bitmap
        .to_bytes()
        .map_err(|e| format!("Failed to encode {}: {e}", path.display()))?;
    ensure_parent_dir(path)?;
    fs::write(path, bytes).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

/// Load any raster format supported by `image` and convert it to 8-bit RGB.
///
/// Rows are flipped into BMP storage order (grid row 0 = bottom).
pub fn load_rgb_image(path: &Path) -> Result<Bitmap, String> {
    let rgb = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    debug!("load_rgb_image {} {}x{}", path.display(), rgb.width(), rgb.height());
    let height = rgb.height();
    Bitmap::from_dimensions(rgb.width(), height, 24, |x, y| {
        Pixel::from(rgb.get_pixel(x, height - 1 - y).0)
    })
    .map_err(|e| format!("Failed to convert {}: {e}", path.display()))
}

/// Save a PNG copy of `bitmap`, top of the picture first.
pub fn save_png(bitmap: &Bitmap, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let grid = bitmap.grid();
    let data: Vec<u8> = (0..grid.height())
        .rev()
        .flat_map(move |y| grid.row(y).iter().flat_map(|p| p.to_rgb()))
        .collect();
    let image = RgbImage::from_raw(bitmap.width(), bitmap.height(), data)
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

/// Loads `.bmp` files with the crate's own decoder and everything else
/// through the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileSource {
    pub limits: DecodeLimits,
}

impl FileSource {
    pub fn new(limits: DecodeLimits) -> Self {
        Self { limits }
    }
}

impl BitmapSource for FileSource {
    fn load(&self, path: &Path) -> Result<Bitmap, String> {
        let is_bmp = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("bmp"));
        if is_bmp {
            read_bitmap(path, &self.limits)
        } else {
            load_rgb_image(path)
        }
    }
}
