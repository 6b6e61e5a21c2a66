use std::path::PathBuf;

use log::debug;
use serde::Deserialize;

use super::BitmapSource;
use crate::diagnostics::OperationOutcome;
use crate::error::BitmapError;
use crate::filter::{EdgeDetectionOptions, Kernel};
use crate::image::{Bitmap, Pixel};
use crate::stego::DEFAULT_BITS;
use crate::transform::{RemoveBorderOptions, RotateOptions};

/// One step of a pipeline recipe, tagged by `"op"` in JSON.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Rotate {
        degrees: f64,
        #[serde(default = "default_resize_factor")]
        resize_factor: f64,
    },
    RotateQuarter {
        #[serde(default = "default_turns")]
        turns: i32,
    },
    Resize {
        factor: f64,
    },
    Crop {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    AddBorder {
        size: u32,
        #[serde(default)]
        color: Pixel,
    },
    RemoveBorder {
        #[serde(default)]
        color: Pixel,
        #[serde(default)]
        max_length: Option<u32>,
    },
    Grayscale,
    Invert,
    EdgeDetection {
        #[serde(default = "default_true")]
        gray: bool,
        #[serde(default)]
        discard_border: bool,
    },
    Sharpen,
    GaussianBlur3,
    GaussianBlur5,
    UnsharpMask5,
    BoxBlur,
    Convolution {
        kernel: Kernel,
    },
    HideImage {
        payload: PathBuf,
        #[serde(default)]
        x: u32,
        #[serde(default)]
        y: u32,
        #[serde(default = "default_bits")]
        bits: u8,
    },
    ExtractImage {
        #[serde(default)]
        x: u32,
        #[serde(default)]
        y: u32,
        width: u32,
        height: u32,
        #[serde(default = "default_bits")]
        bits: u8,
    },
    HideText {
        text: String,
    },
    Diff {
        reference: PathBuf,
    },
}

fn default_resize_factor() -> f64 {
    1.0
}

fn default_turns() -> i32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_bits() -> u8 {
    DEFAULT_BITS
}

impl Operation {
    /// The `"op"` tag as written in JSON.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rotate { .. } => "rotate",
            Self::RotateQuarter { .. } => "rotate_quarter",
            Self::Resize { .. } => "resize",
            Self::Crop { .. } => "crop",
            Self::AddBorder { .. } => "add_border",
            Self::RemoveBorder { .. } => "remove_border",
            Self::Grayscale => "grayscale",
            Self::Invert => "invert",
            Self::EdgeDetection { .. } => "edge_detection",
            Self::Sharpen => "sharpen",
            Self::GaussianBlur3 => "gaussian_blur3",
            Self::GaussianBlur5 => "gaussian_blur5",
            Self::UnsharpMask5 => "unsharp_mask5",
            Self::BoxBlur => "box_blur",
            Self::Convolution { .. } => "convolution",
            Self::HideImage { .. } => "hide_image",
            Self::ExtractImage { .. } => "extract_image",
            Self::HideText { .. } => "hide_text",
            Self::Diff { .. } => "diff",
        }
    }

    /// Apply this step to `bitmap`. On error the bitmap is left as it was.
    pub fn apply(
        &self,
        bitmap: &mut Bitmap,
        source: &dyn BitmapSource,
    ) -> Result<OperationOutcome, String> {
        debug!("Operation::apply {} on {}", self.name(), bitmap.describe());
        let fail = |e: BitmapError| format!("{} failed: {e}", self.name());
        match self {
            Self::Rotate {
                degrees,
                resize_factor,
            } => {
                let options = RotateOptions::default().with_resize_factor(*resize_factor);
                bitmap.rotate(*degrees, options).map_err(fail)?;
            }
            Self::RotateQuarter { turns } => bitmap.rotate_quarter(*turns),
            Self::Resize { factor } => bitmap.resize(*factor).map_err(fail)?,
            Self::Crop {
                x,
                y,
                width,
                height,
            } => bitmap.crop(*x, *y, *width, *height).map_err(fail)?,
            Self::AddBorder { size, color } => bitmap.add_border(*size, *color).map_err(fail)?,
            Self::RemoveBorder { color, max_length } => {
                let mut options = RemoveBorderOptions::default().with_color(*color);
                if let Some(max) = max_length {
                    options = options.with_max_length(*max);
                }
                let rings = bitmap.remove_border(options).map_err(fail)?;
                return Ok(OperationOutcome::border_removed(rings));
            }
            Self::Grayscale => bitmap.grayscale(),
            Self::Invert => bitmap.invert(),
            Self::EdgeDetection {
                gray,
                discard_border,
            } => {
                let options = EdgeDetectionOptions::default()
                    .with_gray(*gray)
                    .with_discard_border(*discard_border);
                bitmap.edge_detection(options).map_err(fail)?;
            }
            Self::Sharpen => bitmap.sharpen().map_err(fail)?,
            Self::GaussianBlur3 => bitmap.gaussian_blur_3().map_err(fail)?,
            Self::GaussianBlur5 => bitmap.gaussian_blur_5().map_err(fail)?,
            Self::UnsharpMask5 => bitmap.unsharp_mask_5().map_err(fail)?,
            Self::BoxBlur => bitmap.box_blur().map_err(fail)?,
            Self::Convolution { kernel } => bitmap.convolve(kernel).map_err(fail)?,
            Self::HideImage {
                payload,
                x,
                y,
                bits,
            } => {
                let payload = source.load(payload)?;
                bitmap.hide_image(&payload, *x, *y, *bits).map_err(fail)?;
            }
            Self::ExtractImage {
                x,
                y,
                width,
                height,
                bits,
            } => bitmap
                .extract_image(*x, *y, *width, *height, *bits)
                .map_err(fail)?,
            Self::HideText { text } => bitmap.hide_text(text).map_err(fail)?,
            Self::Diff { reference } => {
                let reference = source.load(reference)?;
                let summary = bitmap.diff_summary(&reference).map_err(fail)?;
                bitmap.diff(&reference).map_err(fail)?;
                return Ok(OperationOutcome::diff(summary));
            }
        }
        Ok(OperationOutcome::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    struct MemorySource(HashMap<PathBuf, Bitmap>);

    impl BitmapSource for MemorySource {
        fn load(&self, path: &Path) -> Result<Bitmap, String> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| format!("no bitmap named {}", path.display()))
        }
    }

    fn parse(json: &str) -> Operation {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn defaults_are_filled_in() {
        assert_eq!(
            parse(r#"{"op":"rotate","degrees":27}"#),
            Operation::Rotate {
                degrees: 27.0,
                resize_factor: 1.0
            }
        );
        assert_eq!(parse(r#"{"op":"rotate_quarter"}"#), Operation::RotateQuarter { turns: 1 });
        assert_eq!(
            parse(r#"{"op":"edge_detection"}"#),
            Operation::EdgeDetection {
                gray: true,
                discard_border: false
            }
        );
        assert_eq!(
            parse(r#"{"op":"remove_border","max_length":3}"#),
            Operation::RemoveBorder {
                color: Pixel::BLACK,
                max_length: Some(3)
            }
        );
    }

    #[test]
    fn unit_variants_and_names_agree() {
        for name in [
            "grayscale",
            "invert",
            "sharpen",
            "gaussian_blur3",
            "gaussian_blur5",
            "unsharp_mask5",
            "box_blur",
        ] {
            let op = parse(&format!(r#"{{"op":"{name}"}}"#));
            assert_eq!(op.name(), name);
        }
    }

    #[test]
    fn unknown_op_is_rejected() {
        assert!(serde_json::from_str::<Operation>(r#"{"op":"sepia"}"#).is_err());
    }

    #[test]
    fn custom_kernel_is_validated_while_parsing() {
        let ok = r#"{"op":"convolution","kernel":{"matrix":[[0,0,0],[0,1,0],[0,0,0]]}}"#;
        assert!(matches!(parse(ok), Operation::Convolution { .. }));
        let zero = r#"{"op":"convolution","kernel":{"matrix":[[1]],"divisor":0}}"#;
        assert!(serde_json::from_str::<Operation>(zero).is_err());
    }

    #[test]
    fn diff_reports_summary_and_leaves_difference_map() {
        let reference = Bitmap::blank(4, 4, Pixel::gray(100)).unwrap();
        let mut img = reference.clone();
        img.set_pixel(2, 1, Pixel::gray(110)).unwrap();
        let source = MemorySource(HashMap::from([(PathBuf::from("ref.bmp"), reference)]));

        let op = parse(r#"{"op":"diff","reference":"ref.bmp"}"#);
        let outcome = op.apply(&mut img, &source).unwrap();
        let summary = outcome.diff.unwrap();
        assert_eq!(summary.differing_pixels, 1);
        assert_eq!(img.pixel(2, 1), Some(Pixel::gray(10)));
        assert_eq!(img.pixel(0, 0), Some(Pixel::BLACK));
    }

    #[test]
    fn missing_payload_is_reported() {
        let mut img = Bitmap::blank(4, 4, Pixel::WHITE).unwrap();
        let source = MemorySource(HashMap::new());
        let op = parse(r#"{"op":"hide_image","payload":"nope.bmp"}"#);
        let err = op.apply(&mut img, &source).unwrap_err();
        assert!(err.contains("nope.bmp"), "{err}");
    }

    #[test]
    fn failures_name_the_operation() {
        let mut img = Bitmap::blank(4, 4, Pixel::WHITE).unwrap();
        let source = MemorySource(HashMap::new());
        let err = parse(r#"{"op":"crop","x":2,"y":2,"width":4,"height":4}"#)
            .apply(&mut img, &source)
            .unwrap_err();
        assert!(err.starts_with("crop failed"), "{err}");
        assert_eq!((img.width(), img.height()), (4, 4));
    }
}
