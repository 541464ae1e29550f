// Load an image, rotate it, binarize it and print what the decode engine would see
//
// Usage: bitmap_dump <image> [rotations] [hybrid|global] [step]
use barcode_reader::tools::{BinarizerKind, binary_stats, load_rotated, luminance_stats, render_ascii};
use barcode_reader::{Result, init_tracing};
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;

fn run(args: &[String]) -> Result<()> {
    let path = &args[1];
    let rotations: u32 = args.get(2).and_then(|v| v.parse().ok()).unwrap_or(0);
    let kind = match args.get(3) {
        Some(name) => BinarizerKind::parse(name)?,
        None => BinarizerKind::default(),
    };

    let start = Instant::now();
    let source = load_rotated(path, rotations)?;
    let bitmap = kind.binarize(source.as_ref())?;
    info!(?kind, rotations, elapsed_ms = start.elapsed().as_millis() as u64, "binarized");

    let gray = luminance_stats(source.as_ref());
    let binary = binary_stats(bitmap.black_matrix());
    println!("Image: {} ({}x{})", path, source.width(), source.height());
    println!("Rotation: {}°", (rotations % 4) * 90);
    println!("Gray: min={} max={} avg={}", gray.min, gray.max, gray.avg);
    println!(
        "Binary ({:?}): {}/{} black ({:.1}%)",
        kind,
        binary.black_pixels,
        binary.total_pixels,
        binary.black_ratio * 100.0
    );

    // Aim for roughly 80 columns unless a step is given
    let step = args
        .get(4)
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| bitmap.width().div_ceil(80).max(1));
    print!("{}", render_ascii(bitmap.black_matrix(), step));
    Ok(())
}

fn program_name(args: &[String]) -> &str {
    args.first().map_or("bitmap_dump", String::as_str)
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage: {} <image> [rotations] [hybrid|global] [step]",
            program_name(&args)
        );
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
