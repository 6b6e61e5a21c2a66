//! Error taxonomy shared by the codec and every bitmap operation.
//!
//! - `Format`: the byte buffer is not a supported BMP (always fatal to the parse).
//! - `Dimension`: a region does not fit or two bitmaps disagree in size.
//! - `Range`: a setting is outside its legal range.
//! - `Payload`: hidden data read back from a carrier is unusable.
//!
//! Operations validate before mutating, so a returned error leaves the
//! bitmap exactly as it was.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BitmapError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitmapError {
    /// Malformed or unsupported BMP data.
    #[error("invalid BMP {field}: {reason}")]
    Format { field: &'static str, reason: String },

    /// Region or size mismatch.
    #[error("dimension mismatch: {reason}")]
    Dimension { reason: String },

    /// Illegal setting value.
    #[error("{name} out of range: {reason}")]
    Range { name: &'static str, reason: String },

    /// Hidden payload could not be decoded.
    #[error("hidden payload unreadable: {reason}")]
    Payload { reason: String },
}

impl BitmapError {
    #[must_use]
    pub fn format(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Format {
            field,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn dimension(reason: impl Into<String>) -> Self {
        Self::Dimension {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn range(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Range {
            name,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn payload(reason: impl Into<String>) -> Self {
        Self::Payload {
            reason: reason.into(),
        }
    }

    /// Field named by a `Format` error, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Format { field, .. } => Some(field),
            _ => None,
        }
    }
}
