use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::debug;
use serde::Deserialize;

use super::Operation;
use crate::bmp::DecodeLimits;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{ImageDescriptor, OperationReport, PipelineReport};
use crate::image::Bitmap;

/// Where operations that reference another image get it from.
pub trait BitmapSource {
    fn load(&self, path: &Path) -> Result<Bitmap, String>;
}

#[derive(Debug, Deserialize)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub limits: DecodeLimits,
    #[serde(default)]
    pub operations: Vec<Operation>,
    /// Optional PNG copy of the final image.
    #[serde(default)]
    pub preview_png: Option<PathBuf>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

impl PipelineConfig {
    /// Resolve relative paths in the recipe against `base` (usually the
    /// directory holding the config file).
    pub fn resolve_paths(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        join(&mut self.input);
        join(&mut self.output);
        if let Some(p) = self.preview_png.as_mut() {
            join(p);
        }
        if let Some(p) = self.report_json.as_mut() {
            join(p);
        }
        for op in &mut self.operations {
            match op {
                Operation::HideImage { payload, .. } => join(payload),
                Operation::Diff { reference } => join(reference),
                _ => {}
            }
        }
    }
}

pub fn load_config(path: &Path) -> Result<PipelineConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: PipelineConfig = serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    config
        .limits
        .validate()
        .map_err(|e| format!("Invalid limits in {}: {e}", path.display()))?;
    Ok(config)
}

/// Apply `operations` in order, recording one report entry per step.
///
/// Stops at the first failing operation; earlier steps stay applied.
pub fn run_operations(
    operations: &[Operation],
    bitmap: &mut Bitmap,
    source: &dyn BitmapSource,
) -> Result<PipelineReport, String> {
    let total = Instant::now();
    let mut report = PipelineReport::new(ImageDescriptor::from(&*bitmap));
    for (index, op) in operations.iter().enumerate() {
        let start = Instant::now();
        let outcome = op
            .apply(bitmap, source)
            .map_err(|e| format!("operation #{index}: {e}"))?;
        let elapsed = elapsed_ms(start);
        debug!(
            "run_operations #{index} {} -> {} in {elapsed:.3} ms",
            op.name(),
            bitmap.describe()
        );
        report.timings.push(op.name(), elapsed);
        report.operations.push(OperationReport {
            index,
            op: op.name(),
            result: ImageDescriptor::from(&*bitmap),
            elapsed_ms: elapsed,
            outcome,
        });
    }
    report.output = ImageDescriptor::from(&*bitmap);
    report.timings.total_ms = elapsed_ms(total);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Pixel;

    struct NoFiles;

    impl BitmapSource for NoFiles {
        fn load(&self, path: &Path) -> Result<Bitmap, String> {
            Err(format!("unexpected load of {}", path.display()))
        }
    }

    const RECIPE: &str = r#"{
        "input": "in.bmp",
        "output": "out/result.bmp",
        "limits": { "max_width": 4096 },
        "operations": [
            { "op": "add_border", "size": 3, "color": { "red": 255, "green": 255, "blue": 255 } },
            { "op": "remove_border", "color": { "red": 255, "green": 255, "blue": 255 } },
            { "op": "rotate_quarter", "turns": 1 },
            { "op": "resize", "factor": 2 },
            { "op": "grayscale" }
        ],
        "report_json": "/tmp/report.json"
    }"#;

    #[test]
    fn recipe_parses_with_defaults() {
        let config: PipelineConfig = serde_json::from_str(RECIPE).unwrap();
        assert_eq!(config.limits.max_width, 4096);
        assert_eq!(config.limits.max_height, DecodeLimits::default().max_height);
        assert_eq!(config.operations.len(), 5);
        assert!(config.preview_png.is_none());
    }

    #[test]
    fn relative_paths_follow_the_config_directory() {
        let mut config: PipelineConfig = serde_json::from_str(RECIPE).unwrap();
        config.resolve_paths(Path::new("/data/jobs"));
        assert_eq!(config.input, PathBuf::from("/data/jobs/in.bmp"));
        assert_eq!(config.output, PathBuf::from("/data/jobs/out/result.bmp"));
        assert_eq!(config.report_json, Some(PathBuf::from("/tmp/report.json")));
    }

    #[test]
    fn operations_run_in_order_and_are_reported() {
        let config: PipelineConfig = serde_json::from_str(RECIPE).unwrap();
        let mut img =
            Bitmap::from_dimensions(4, 2, 24, |x, _| Pixel::new(x as u8 * 10, 0, 0)).unwrap();
        let report = run_operations(&config.operations, &mut img, &NoFiles).unwrap();

        assert_eq!((img.width(), img.height()), (4, 8));
        assert_eq!(report.input.width, 4);
        assert_eq!(report.output.height, 8);
        assert_eq!(report.operations.len(), 5);
        assert_eq!(report.operations[1].outcome.border_removed, Some(3));
        assert_eq!(report.operations[2].result.width, 2);
        assert_eq!(report.timings.stages.len(), 5);
    }

    #[test]
    fn failing_step_is_identified_by_index() {
        let ops = vec![Operation::Invert, Operation::Resize { factor: -1.0 }];
        let mut img = Bitmap::blank(2, 2, Pixel::BLACK).unwrap();
        let err = run_operations(&ops, &mut img, &NoFiles).unwrap_err();
        assert!(err.starts_with("operation #1: resize failed"), "{err}");
        assert_eq!(img.pixel(0, 0), Some(Pixel::WHITE));
    }
}
