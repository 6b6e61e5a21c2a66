//! Admission limits applied before any pixel memory is allocated.
//!
//! A BMP header is 54 bytes; nothing stops it from claiming a
//! 2^31 × 2^31 image. [`DecodeLimits`] bounds what the decoder accepts.
use log::warn;
use serde::Deserialize;

use crate::error::{BitmapError, Result};

pub const DEFAULT_MAX_DIMENSION: u32 = 16_384;
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Maximum accepted width in pixels (>= 1).
    pub max_width: u32,
    /// Maximum accepted height in pixels (>= 1).
    pub max_height: u32,
    /// Maximum accepted `width * height` (>= 1).
    pub max_pixels: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_DIMENSION,
            max_height: DEFAULT_MAX_DIMENSION,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl DecodeLimits {
    pub fn new(max_width: u32, max_height: u32, max_pixels: u64) -> Result<Self> {
        Self::default()
            .with_max_width(max_width)?
            .with_max_height(max_height)?
            .with_max_pixels(max_pixels)
    }

    pub fn with_max_width(mut self, max_width: u32) -> Result<Self> {
        self.max_width = at_least_one("max_width", max_width as u64)? as u32;
        Ok(self)
    }

    pub fn with_max_height(mut self, max_height: u32) -> Result<Self> {
        self.max_height = at_least_one("max_height", max_height as u64)? as u32;
        Ok(self)
    }

    pub fn with_max_pixels(mut self, max_pixels: u64) -> Result<Self> {
        self.max_pixels = at_least_one("max_pixels", max_pixels)?;
        Ok(self)
    }

    /// Re-check the invariants, e.g. after deserializing from JSON.
    pub fn validate(self) -> Result<Self> {
        Self::new(self.max_width, self.max_height, self.max_pixels)
    }

    /// Reject dimensions beyond the configured limits.
    pub fn check(&self, width: u32, height: u32) -> Result<()> {
        let pixels = width as u64 * height as u64;
        let violation = if pixels > self.max_pixels {
            Some((
                "size",
                format!("{pixels} pixels exceeds the limit of {}", self.max_pixels),
            ))
        } else if width > self.max_width {
            Some(("width", format!("{width} exceeds the limit of {}", self.max_width)))
        } else if height > self.max_height {
            Some(("height", format!("{height} exceeds the limit of {}", self.max_height)))
        } else {
            None
        };
        match violation {
            Some((field, reason)) => {
                warn!("DecodeLimits: rejecting {width}x{height}: {reason}");
                Err(BitmapError::format(field, reason))
            }
            None => Ok(()),
        }
    }
}

fn at_least_one(name: &'static str, value: u64) -> Result<u64> {
    if value < 1 {
        return Err(BitmapError::range(name, "must be greater than 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limits_are_range_errors() {
        let err = DecodeLimits::default().with_max_width(0).unwrap_err();
        assert_eq!(err, BitmapError::range("max_width", "must be greater than 0"));
        assert!(DecodeLimits::new(10, 10, 0).is_err());
    }

    #[test]
    fn check_names_the_violated_field() {
        let limits = DecodeLimits::new(100, 50, 1_000).unwrap();
        assert!(limits.check(40, 20).is_ok());
        assert_eq!(limits.check(40, 40).unwrap_err().field(), Some("size"));
        assert_eq!(limits.check(101, 1).unwrap_err().field(), Some("width"));
        assert_eq!(limits.check(1, 51).unwrap_err().field(), Some("height"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let limits: DecodeLimits = serde_json::from_str(r#"{ "max_width": 640 }"#).unwrap();
        assert_eq!(limits.max_width, 640);
        assert_eq!(limits.max_height, DEFAULT_MAX_DIMENSION);
        let bad: DecodeLimits = serde_json::from_str(r#"{ "max_pixels": 0 }"#).unwrap();
        assert!(bad.validate().is_err());
    }
}
