//! JSON recipes for the `bmp_pipeline` binary.
//!
//! A recipe names an input and output file plus an ordered list of
//! [`Operation`]s. Operations that need a second image (hide a payload,
//! diff against a reference) load it through a [`BitmapSource`].

pub mod operation;
pub mod pipeline;

pub use operation::Operation;
pub use pipeline::{load_config, run_operations, BitmapSource, PipelineConfig};
