use bitmap_lab::config::BitmapSource;
use bitmap_lab::image::io::{write_bitmap, FileSource};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

/// Returns whether the two inputs were identical.
fn run() -> Result<bool, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let [a, b, out] = args.as_slice() else {
        return Err(usage());
    };

    let source = FileSource::default();
    let mut left = source.load(Path::new(a))?;
    let right = source.load(Path::new(b))?;

    let summary = left
        .diff_summary(&right)
        .map_err(|e| format!("Cannot compare {a} and {b}: {e}"))?;
    left.diff(&right)
        .map_err(|e| format!("Cannot compare {a} and {b}: {e}"))?;
    write_bitmap(&left, Path::new(out))?;

    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| format!("Failed to serialize summary: {e}"))?;
    println!("{json}");
    Ok(summary.identical)
}

fn usage() -> String {
    "Usage: bmp_diff <a.bmp> <b.bmp> <diff.bmp>".to_string()
}
