//! Uncompressed 24-bit BMP codec.
//!
//! - `decode`: validate the header, apply [`DecodeLimits`], then copy the
//!   4-byte padded B,G,R rows into a [`PixelGrid`]. Stored row `r` (found at
//!   `offset + row_size * r`) becomes grid row `r`, so row 0 is the bottom
//!   of the picture as BMP lays it out.
//! - `encode`: the exact inverse; writes a fresh 54-byte header (BI_RGB,
//!   pixel data at offset 54) followed by zero-padded rows in grid order.
//!
//! Channel bytes are copied verbatim, so `decode(encode(grid)) == grid`.
pub mod header;
pub mod limits;

use log::debug;

pub use self::header::{row_size, BmpHeader, BI_BITFIELDS, BI_RGB, HEADER_SIZE};
pub use self::limits::DecodeLimits;

use crate::error::{BitmapError, Result};
use crate::image::{Bitmap, ImageView, ImageViewMut, Pixel, PixelGrid};

/// Parse a BMP buffer into a [`Bitmap`].
pub fn decode(bytes: &[u8], limits: &DecodeLimits) -> Result<Bitmap> {
    let hdr = BmpHeader::parse(bytes)?;
    limits.check(hdr.width, hdr.height)?;

    let w = hdr.width as u64;
    let h = hdr.height as u64;
    let offset = hdr.pixel_offset as u64;
    let row_size = hdr.row_size();
    let len = bytes.len() as u64;

    if offset + w * h * 3 > len {
        return Err(BitmapError::format(
            "length",
            format!("{len} bytes cannot hold {w}x{h} pixels at offset {offset}"),
        ));
    }
    // The last row may omit its padding, but its pixels must be present.
    let last_row_end = offset + row_size * (h - 1) + w * 3;
    if last_row_end > len {
        return Err(BitmapError::format(
            "length",
            format!("pixel rows end at byte {last_row_end}, buffer has {len}"),
        ));
    }

    debug!(
        "bmp::decode {}x{} offset={} row_size={} compression={}",
        w, h, offset, row_size, hdr.compression
    );

    let (w, h) = (w as usize, h as usize);
    let (offset, row_size) = (offset as usize, row_size as usize);
    let mut grid = PixelGrid::new(w, h)?;
    for stored in 0..h {
        let start = offset + row_size * stored;
        let src = &bytes[start..start + w * 3];
        let dst = grid.row_mut(stored);
        for (px, bgr) in dst.iter_mut().zip(src.chunks_exact(3)) {
            *px = Pixel::from_bgr([bgr[0], bgr[1], bgr[2]]);
        }
    }
    Ok(Bitmap::from_grid(grid))
}

/// Serialize any RGB view as an uncompressed 24-bit BMP.
pub fn encode<V: ImageView<Pixel = Pixel>>(image: &V) -> Result<Vec<u8>> {
    if image.is_empty() {
        return Err(BitmapError::dimension("cannot encode an empty image"));
    }
    let (w, h) = (image.width(), image.height());
    let width = u32::try_from(w).map_err(|_| BitmapError::dimension("width exceeds u32"))?;
    let height = u32::try_from(h).map_err(|_| BitmapError::dimension("height exceeds u32"))?;
    let hdr = BmpHeader::for_dimensions(width, height)?;
    let row_size = hdr.row_size() as usize;

    debug!("bmp::encode {w}x{h} row_size={row_size} size={}", hdr.file_size);

    let mut out = vec![0u8; hdr.file_size as usize];
    hdr.write(&mut out);
    for (y, row) in image.rows().enumerate() {
        let start = HEADER_SIZE + row_size * y;
        let dst = &mut out[start..start + w * 3];
        for (bgr, px) in dst.chunks_exact_mut(3).zip(row) {
            bgr.copy_from_slice(&px.to_bgr());
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid(w: usize, h: usize) -> PixelGrid {
        PixelGrid::from_fn(w, h, |x, y| Pixel::new(x as u8, y as u8, (x * y) as u8)).unwrap()
    }

    #[test]
    fn rows_are_written_in_grid_order_with_padding() {
        let grid = sample_grid(1, 2);
        let bytes = encode(&grid).unwrap();
        assert_eq!(bytes.len(), 54 + 2 * 4);
        assert_eq!(&bytes[54..58], &[0, 0, 0, 0]);
        assert_eq!(&bytes[58..62], &[0, 1, 0, 0]);
    }

    #[test]
    fn decode_inverts_encode() {
        for (w, h) in [(1, 1), (3, 2), (4, 5), (7, 3)] {
            let grid = sample_grid(w, h);
            let img = decode(&encode(&grid).unwrap(), &DecodeLimits::default()).unwrap();
            assert_eq!(img.grid(), &grid, "{w}x{h}");
        }
    }

    #[test]
    fn missing_final_padding_is_tolerated() {
        let grid = sample_grid(3, 2);
        let mut bytes = encode(&grid).unwrap();
        bytes.truncate(bytes.len() - 3);
        let img = decode(&bytes, &DecodeLimits::default()).unwrap();
        assert_eq!(img.grid(), &grid);
    }

    #[test]
    fn truncated_pixels_are_rejected() {
        let bytes = encode(&sample_grid(4, 4)).unwrap();
        let err = decode(&bytes[..bytes.len() - 4], &DecodeLimits::default()).unwrap_err();
        assert_eq!(err.field(), Some("length"));
    }

    #[test]
    fn limits_apply_before_allocation() {
        let bytes = encode(&sample_grid(8, 8)).unwrap();
        let limits = DecodeLimits::new(4, 100, 1_000).unwrap();
        assert_eq!(decode(&bytes, &limits).unwrap_err().field(), Some("width"));
    }

    #[test]
    fn empty_image_cannot_be_encoded() {
        let grid = PixelGrid::new(0, 3).unwrap();
        assert!(matches!(encode(&grid), Err(BitmapError::Dimension { .. })));
    }
}
