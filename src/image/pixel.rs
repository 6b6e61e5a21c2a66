//! 24-bit RGB pixel with the per-pixel operations used by filters,
//! steganography and the difference map.
use serde::{Deserialize, Serialize};

/// One RGB sample, 8 bits per channel, no alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);
    pub const WHITE: Pixel = Pixel::new(255, 255, 255);

    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Gray pixel with all three channels set to `value`.
    #[inline]
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Build from the B,G,R byte order used on disk.
    #[inline]
    pub const fn from_bgr(bgr: [u8; 3]) -> Self {
        Self::new(bgr[2], bgr[1], bgr[0])
    }

    #[inline]
    pub const fn to_bgr(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }

    #[inline]
    pub const fn to_rgb(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    #[inline]
    pub fn invert(&mut self) {
        self.red = 255 - self.red;
        self.green = 255 - self.green;
        self.blue = 255 - self.blue;
    }

    /// Replace every channel by the truncated mean of R, G and B.
    #[inline]
    pub fn grayscale(&mut self) {
        let sum = self.red as u16 + self.green as u16 + self.blue as u16;
        *self = Self::gray((sum / 3) as u8);
    }

    /// Overwrite the low `bits` bits of each channel with the top `bits`
    /// bits of the matching channel of `hidden`.
    ///
    /// `bits` must be in `1..=8`.
    #[inline]
    pub fn insert_lsb(&mut self, hidden: Pixel, bits: u8) {
        debug_assert!((1..=8).contains(&bits));
        let keep = !low_mask(bits);
        let shift = 8 - bits;
        self.red = (self.red & keep) | (hidden.red >> shift);
        self.green = (self.green & keep) | (hidden.green >> shift);
        self.blue = (self.blue & keep) | (hidden.blue >> shift);
    }

    /// Move the low `bits` bits of each channel to the top, zero-filling below.
    #[inline]
    pub fn extract_lsb(&mut self, bits: u8) {
        debug_assert!((1..=8).contains(&bits));
        let shift = 8 - bits;
        self.red = ((self.red as u16) << shift) as u8;
        self.green = ((self.green as u16) << shift) as u8;
        self.blue = ((self.blue as u16) << shift) as u8;
    }

    /// Turn the pixel into the per-channel absolute difference with `other`.
    #[inline]
    pub fn distance_abs(&mut self, other: Pixel) {
        self.red = self.red.abs_diff(other.red);
        self.green = self.green.abs_diff(other.green);
        self.blue = self.blue.abs_diff(other.blue);
    }

    /// Largest channel difference with `other`.
    #[inline]
    pub fn max_channel_delta(self, other: Pixel) -> u8 {
        self.red
            .abs_diff(other.red)
            .max(self.green.abs_diff(other.green))
            .max(self.blue.abs_diff(other.blue))
    }

    /// All channels zero. The rotation back-fill treats this as "unwritten".
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Self::BLACK
    }

    #[inline]
    pub fn update_if_empty(&mut self, other: Pixel) {
        if self.is_empty() {
            *self = other;
        }
    }
}

#[inline]
fn low_mask(bits: u8) -> u8 {
    (0xFFu16 >> (8 - bits)) as u8
}

impl From<[u8; 3]> for Pixel {
    /// Interprets the array as R, G, B.
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}
