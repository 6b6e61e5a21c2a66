//! BMP file header (14 bytes) + BITMAPINFOHEADER (40 bytes).
//!
//! Layout (all little-endian):
//!
//! | offset | size | field            |
//! |--------|------|------------------|
//! | 0      | 2    | magic `BM`       |
//! | 2      | 4    | file size        |
//! | 6      | 4    | reserved         |
//! | 10     | 4    | pixel offset     |
//! | 14     | 4    | DIB header size  |
//! | 18     | 4    | width (i32)      |
//! | 22     | 4    | height (i32)     |
//! | 26     | 2    | planes           |
//! | 28     | 2    | bits per pixel   |
//! | 30     | 4    | compression      |
//! | 34     | 4    | image size       |
//! | 38     | 8    | x/y pixels/metre |
//! | 46     | 8    | colours used/important |
use crate::error::{BitmapError, Result};

pub const MAGIC: [u8; 2] = *b"BM";
pub const FILE_HEADER_SIZE: usize = 14;
pub const DIB_HEADER_SIZE: u32 = 40;
pub const HEADER_SIZE: usize = FILE_HEADER_SIZE + DIB_HEADER_SIZE as usize;

pub const BI_RGB: u32 = 0;
pub const BI_BITFIELDS: u32 = 3;

/// 72 DPI expressed in pixels per metre.
const PIXELS_PER_METRE: i32 = 2835;

/// Validated header fields needed to locate and size the pixel array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub file_size: u32,
    pub pixel_offset: u32,
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub compression: u32,
}

/// Bytes per stored row: `ceil(width * 24 / 32) * 4`.
#[inline]
pub fn row_size(width: u64) -> u64 {
    (width * 24).div_ceil(32) * 4
}

impl BmpHeader {
    /// Read and validate the 54 header bytes.
    ///
    /// Checks, in order: buffer length, magic, DIB header size, signed
    /// dimensions, planes, bit depth, compression. Each failure names the
    /// offending field.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(BitmapError::format(
                "length",
                format!("{} bytes is shorter than the {HEADER_SIZE}-byte header", bytes.len()),
            ));
        }
        if bytes[0..2] != MAGIC {
            return Err(BitmapError::format(
                "magic",
                format!("expected 'BM', found {:#04x} {:#04x}", bytes[0], bytes[1]),
            ));
        }
        let dib_size = read_u32(bytes, 14);
        if dib_size != DIB_HEADER_SIZE {
            return Err(BitmapError::format(
                "dib_header_size",
                format!("expected {DIB_HEADER_SIZE}, found {dib_size}"),
            ));
        }
        let width = read_i32(bytes, 18);
        if width <= 0 {
            return Err(BitmapError::format("width", format!("must be positive, found {width}")));
        }
        let height = read_i32(bytes, 22);
        if height <= 0 {
            return Err(BitmapError::format(
                "height",
                format!("must be positive (bottom-up rows), found {height}"),
            ));
        }
        let planes = read_u16(bytes, 26);
        if planes != 1 {
            return Err(BitmapError::format("planes", format!("expected 1, found {planes}")));
        }
        let bits_per_pixel = read_u16(bytes, 28);
        if bits_per_pixel != 24 {
            return Err(BitmapError::format(
                "bits_per_pixel",
                format!("only 24 is supported, found {bits_per_pixel}"),
            ));
        }
        let compression = read_u32(bytes, 30);
        if compression != BI_RGB && compression != BI_BITFIELDS {
            return Err(BitmapError::format(
                "compression",
                format!("expected BI_RGB (0) or BI_BITFIELDS (3), found {compression}"),
            ));
        }
        Ok(Self {
            file_size: read_u32(bytes, 2),
            pixel_offset: read_u32(bytes, 10),
            width: width as u32,
            height: height as u32,
            bits_per_pixel,
            compression,
        })
    }

    /// Header for an uncompressed 24-bit image of the given size.
    pub fn for_dimensions(width: u32, height: u32) -> Result<Self> {
        let image_size = row_size(width as u64)
            .checked_mul(height as u64)
            .filter(|&n| n + HEADER_SIZE as u64 <= u32::MAX as u64)
            .ok_or_else(|| {
                BitmapError::dimension(format!("{width}x{height} does not fit in a BMP file"))
            })?;
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(BitmapError::dimension(format!(
                "{width}x{height} exceeds the signed header fields"
            )));
        }
        Ok(Self {
            file_size: (HEADER_SIZE as u64 + image_size) as u32,
            pixel_offset: HEADER_SIZE as u32,
            width,
            height,
            bits_per_pixel: 24,
            compression: BI_RGB,
        })
    }

    #[inline]
    pub fn row_size(&self) -> u64 {
        row_size(self.width as u64)
    }

    /// Serialize into the first [`HEADER_SIZE`] bytes of `out`.
    pub fn write(&self, out: &mut [u8]) {
        out[0..2].copy_from_slice(&MAGIC);
        write_u32(out, 2, self.file_size);
        write_u32(out, 6, 0);
        write_u32(out, 10, self.pixel_offset);
        write_u32(out, 14, DIB_HEADER_SIZE);
        write_u32(out, 18, self.width);
        write_u32(out, 22, self.height);
        write_u16(out, 26, 1);
        write_u16(out, 28, self.bits_per_pixel);
        write_u32(out, 30, self.compression);
        write_u32(out, 34, (self.row_size() * self.height as u64) as u32);
        write_u32(out, 38, PIXELS_PER_METRE as u32);
        write_u32(out, 42, PIXELS_PER_METRE as u32);
        write_u32(out, 46, 0);
        write_u32(out, 50, 0);
    }
}

#[inline]
fn read_u16(bytes: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([bytes[pos], bytes[pos + 1]])
}

#[inline]
fn read_u32(bytes: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
}

#[inline]
fn read_i32(bytes: &[u8], pos: usize) -> i32 {
    read_u32(bytes, pos) as i32
}

#[inline]
fn write_u16(out: &mut [u8], pos: usize, v: u16) {
    out[pos..pos + 2].copy_from_slice(&v.to_le_bytes());
}

#[inline]
fn write_u32(out: &mut [u8], pos: usize, v: u32) {
    out[pos..pos + 4].copy_from_slice(&v.to_le_bytes());
}
