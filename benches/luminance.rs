use barcode_reader::luminance::convert::{rgb_to_grayscale, rgba_to_grayscale};
use barcode_reader::{
    BarcodeReader, BinaryBitmap, DecodeHints, DecodeOptions, DecodeResult, GrayLuminanceSource,
    LuminanceSource, Reader, Result,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_rgb_to_grayscale(c: &mut Criterion) {
    // 640x480 stays sequential, 1920x1080 crosses the parallel threshold
    for (w, h) in [(100, 100), (640, 480), (1920, 1080)] {
        let image = vec![128u8; w * h * 3];
        c.bench_function(&format!("rgb_to_grayscale_{w}x{h}"), |b| {
            b.iter(|| rgb_to_grayscale(black_box(&image), black_box(w), black_box(h)))
        });
    }
}

fn bench_rgba_to_grayscale_medium(c: &mut Criterion) {
    let image = vec![128u8; 640 * 480 * 4];
    c.bench_function("rgba_to_grayscale_640x480", |b| {
        b.iter(|| rgba_to_grayscale(black_box(&image), black_box(640), black_box(480)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let source = GrayLuminanceSource::new(vec![128u8; 1920 * 1080], 1920, 1080).unwrap();
    c.bench_function("rotate_counter_clockwise_1920x1080", |b| {
        b.iter(|| black_box(&source).rotate_counter_clockwise().unwrap())
    });
}

struct NeverFound;

impl Reader for NeverFound {
    fn decode(&mut self, _: &BinaryBitmap, _: &DecodeHints) -> Result<Option<DecodeResult>> {
        Ok(None)
    }

    fn decode_with_state(&mut self, _: &BinaryBitmap) -> Result<Option<DecodeResult>> {
        Ok(None)
    }
}

fn gray_640x480(pixels: &Vec<u8>) -> Result<Box<dyn LuminanceSource>> {
    Ok(Box::new(GrayLuminanceSource::new(pixels.clone(), 640, 480)?))
}

/// Orchestration cost of a full rotation budget with an engine that finds nothing
fn bench_rotation_budget(c: &mut Criterion) {
    let image = vec![128u8; 640 * 480];
    let mut reader: BarcodeReader<Vec<u8>> = BarcodeReader::new(NeverFound)
        .with_luminance_factory(gray_640x480)
        .with_options(DecodeOptions::new().with_auto_rotate(true));
    c.bench_function("decode_four_rotations_640x480", |b| {
        b.iter(|| reader.decode(black_box(&image)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_rgb_to_grayscale,
    bench_rgba_to_grayscale_medium,
    bench_rotate,
    bench_rotation_budget
);
criterion_main!(benches);
