use serde::Serialize;

use super::TimingBreakdown;
use crate::diff::DiffSummary;
use crate::image::Bitmap;

/// Size of an image at some point of the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
}

impl From<&Bitmap> for ImageDescriptor {
    fn from(bitmap: &Bitmap) -> Self {
        Self {
            width: bitmap.width(),
            height: bitmap.height(),
            bits_per_pixel: bitmap.bits_per_pixel(),
        }
    }
}

/// Values some operations return besides mutating the bitmap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_removed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffSummary>,
}

impl OperationOutcome {
    pub fn border_removed(rings: u32) -> Self {
        Self {
            border_removed: Some(rings),
            ..Self::default()
        }
    }

    pub fn diff(summary: DiffSummary) -> Self {
        Self {
            diff: Some(summary),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationReport {
    pub index: usize,
    pub op: &'static str,
    pub result: ImageDescriptor,
    pub elapsed_ms: f64,
    #[serde(flatten)]
    pub outcome: OperationOutcome,
}

/// Everything the pipeline binary writes to its JSON report.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub input: ImageDescriptor,
    pub output: ImageDescriptor,
    pub operations: Vec<OperationReport>,
    pub timings: TimingBreakdown,
}

impl PipelineReport {
    pub fn new(input: ImageDescriptor) -> Self {
        Self {
            input,
            output: input,
            operations: Vec::new(),
            timings: TimingBreakdown::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Pixel;

    #[test]
    fn outcome_fields_are_flattened_and_optional() {
        let img = Bitmap::blank(3, 2, Pixel::WHITE).unwrap();
        let report = OperationReport {
            index: 0,
            op: "remove_border",
            result: ImageDescriptor::from(&img),
            elapsed_ms: 0.5,
            outcome: OperationOutcome::border_removed(2),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["borderRemoved"], 2);
        assert_eq!(json["result"]["bitsPerPixel"], 24);
        assert!(json.get("diff").is_none());
    }
}
