use bitmap_lab::config::{load_config, run_operations};
use bitmap_lab::diagnostics::timing::elapsed_ms;
use bitmap_lab::diagnostics::TimingBreakdown;
use bitmap_lab::image::io::{read_bitmap, save_png, write_bitmap, write_json_file, FileSource};
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config_path = Path::new(&config_path);
    let mut config = load_config(config_path)?;
    if let Some(base) = config_path.parent() {
        config.resolve_paths(base);
    }

    let start = Instant::now();
    let mut io_timings = TimingBreakdown::default();
    let mut bitmap = io_timings.time("decode", || read_bitmap(&config.input, &config.limits))?;

    let source = FileSource::new(config.limits);
    let mut report = run_operations(&config.operations, &mut bitmap, &source)?;
    report.timings.stages.splice(0..0, io_timings.stages);

    report
        .timings
        .time("encode", || write_bitmap(&bitmap, &config.output))?;
    report.timings.total_ms = elapsed_ms(start);

    println!(
        "Applied {} operations: {}x{} -> {}x{}, saved to {}",
        report.operations.len(),
        report.input.width,
        report.input.height,
        report.output.width,
        report.output.height,
        config.output.display()
    );

    if let Some(preview) = &config.preview_png {
        save_png(&bitmap, preview)?;
        println!("Saved preview to {}", preview.display());
    }
    if let Some(path) = &config.report_json {
        write_json_file(path, &report)?;
        println!("Saved report to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: bmp_pipeline <config.json>".to_string()
}
