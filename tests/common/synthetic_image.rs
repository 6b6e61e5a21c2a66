#![allow(dead_code)]

use bitmap_lab::{Bitmap, Pixel};

/// Smooth diagonal gradient with a distinct value in every channel.
pub fn gradient(width: u32, height: u32) -> Bitmap {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    Bitmap::from_dimensions(width, height, 24, |x, y| {
        Pixel::new(
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x + y) % 256) as u8,
        )
    })
    .expect("valid dimensions")
}

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> Bitmap {
    assert!(cell > 0, "cell size must be positive");
    Bitmap::from_dimensions(width, height, 24, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Pixel::gray(32)
        } else {
            Pixel::gray(220)
        }
    })
    .expect("valid dimensions")
}

/// BMP bytes written field by field, independently of the crate's encoder.
///
/// `stored_rows[r][x]` is an RGB triple; row 0 is written first, which is
/// the bottom of the picture.
pub fn handmade_bmp(stored_rows: &[Vec<[u8; 3]>]) -> Vec<u8> {
    let height = stored_rows.len();
    let width = stored_rows[0].len();
    let row_size = (width * 3).div_ceil(4) * 4;
    let image_size = row_size * height;

    let mut out = Vec::with_capacity(54 + image_size);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((54 + image_size) as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(image_size as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 16]);
    for row in stored_rows {
        for &[r, g, b] in row {
            out.extend_from_slice(&[b, g, r]);
        }
        out.resize(out.len() + row_size - width * 3, 0);
    }
    out
}
