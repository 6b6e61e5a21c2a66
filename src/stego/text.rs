//! Text embedding in the lowest bit of every channel.
//!
//! Layout, one bit per channel in row-major pixel order (R, G, B):
//!
//! ```text
//! [ byte length: u32 LE ][ UTF-8 bytes ... ]
//! ```
//!
//! Bytes are written least-significant bit first. A `w × h` carrier holds
//! `3·w·h / 8 - 4` bytes of text.
use log::debug;

use crate::error::{BitmapError, Result};
use crate::image::{Bitmap, Pixel};

const LENGTH_BYTES: usize = 4;

/// Number of text bytes a carrier of this size can hold.
pub fn text_capacity(width: u32, height: u32) -> usize {
    let bits = 3 * width as usize * height as usize;
    (bits / 8).saturating_sub(LENGTH_BYTES)
}

#[inline]
fn channel_mut(px: &mut Pixel, c: usize) -> &mut u8 {
    match c {
        0 => &mut px.red,
        1 => &mut px.green,
        _ => &mut px.blue,
    }
}

#[inline]
fn channel(px: Pixel, c: usize) -> u8 {
    px.to_rgb()[c]
}

impl Bitmap {
    /// Hide `text` in the lowest bit of every channel, starting at the
    /// first stored pixel. Fails if the carrier is too small.
    pub fn hide_text(&mut self, text: &str) -> Result<()> {
        let capacity = text_capacity(self.width(), self.height());
        if text.len() > capacity || text.len() > u32::MAX as usize {
            return Err(BitmapError::dimension(format!(
                "{} bytes of text exceed the {capacity}-byte capacity of {}",
                text.len(),
                self.describe()
            )));
        }
        debug!("Bitmap::hide_text {} bytes into {}", text.len(), self.describe());

        let mut payload = Vec::with_capacity(LENGTH_BYTES + text.len());
        payload.extend_from_slice(&(text.len() as u32).to_le_bytes());
        payload.extend_from_slice(text.as_bytes());
        let total_bits = payload.len() * 8;

        for (i, px) in self.grid_mut().pixels_mut().enumerate() {
            for c in 0..3 {
                let k = i * 3 + c;
                if k >= total_bits {
                    return Ok(());
                }
                let bit = (payload[k / 8] >> (k % 8)) & 1;
                let value = channel_mut(px, c);
                *value = (*value & !1) | bit;
            }
        }
        Ok(())
    }

    /// Read text hidden by [`hide_text`](Self::hide_text).
    pub fn extract_text(&self) -> Result<String> {
        let mut bits = self
            .grid()
            .pixels()
            .flat_map(|&px| (0..3).map(move |c| channel(px, c) & 1));
        let mut next_byte = || -> Option<u8> {
            let mut byte = 0u8;
            for i in 0..8 {
                byte |= bits.next()? << i;
            }
            Some(byte)
        };

        let mut header = [0u8; LENGTH_BYTES];
        for b in &mut header {
            *b = next_byte().ok_or_else(|| {
                BitmapError::payload(format!("{} is too small to hold text", self.describe()))
            })?;
        }
        let len = u32::from_le_bytes(header) as usize;
        let capacity = text_capacity(self.width(), self.height());
        if len > capacity {
            return Err(BitmapError::payload(format!(
                "stored length {len} exceeds the {capacity}-byte capacity"
            )));
        }
        let bytes: Vec<u8> = (0..len).filter_map(|_| next_byte()).collect();
        debug!("Bitmap::extract_text {len} bytes from {}", self.describe());
        String::from_utf8(bytes)
            .map_err(|e| BitmapError::payload(format!("hidden text is not UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrier(w: u32, h: u32) -> Bitmap {
        Bitmap::from_dimensions(w, h, 24, |x, y| Pixel::new(x as u8, y as u8, (x ^ y) as u8))
            .unwrap()
    }

    #[test]
    fn text_round_trip() {
        let mut img = carrier(20, 10);
        let text = "grüße, naïve café";
        img.hide_text(text).unwrap();
        assert_eq!(img.extract_text().unwrap(), text);
    }

    #[test]
    fn only_lowest_bit_changes() {
        let original = carrier(16, 4);
        let mut img = original.clone();
        img.hide_text("hello").unwrap();
        for (a, b) in original.grid().pixels().zip(img.grid().pixels()) {
            assert!(a.max_channel_delta(*b) <= 1);
        }
    }

    #[test]
    fn capacity_is_enforced() {
        // 4 x 4 pixels = 48 bits = 6 bytes, 2 left after the length header
        assert_eq!(text_capacity(4, 4), 2);
        let mut img = carrier(4, 4);
        img.hide_text("ok").unwrap();
        assert!(matches!(img.hide_text("too long"), Err(BitmapError::Dimension { .. })));
        assert_eq!(img.extract_text().unwrap(), "ok");
    }

    #[test]
    fn garbage_length_is_a_payload_error() {
        let img = Bitmap::blank(4, 4, Pixel::WHITE).unwrap();
        assert!(matches!(img.extract_text(), Err(BitmapError::Payload { .. })));
    }

    #[test]
    fn empty_text_round_trips() {
        let mut img = carrier(4, 4);
        img.hide_text("").unwrap();
        assert_eq!(img.extract_text().unwrap(), "");
    }
}
