//! Serializable reports produced by the pipeline runner and the binaries.
//!
//! `PipelineReport` is the main entry point: it describes the input and
//! output images, one `OperationReport` per applied step and a
//! `TimingBreakdown` for the whole run.

pub mod report;
pub mod timing;

pub use report::{ImageDescriptor, OperationOutcome, OperationReport, PipelineReport};
pub use timing::{StageTiming, TimingBreakdown};
