//! Inspection helpers for luminance sources and thresholded bitmaps.

use std::path::Path;

use crate::binarizer::{BinaryBitmap, GlobalHistogramBinarizer, HybridBinarizer};
use crate::error::{BarcodeError, Result};
use crate::luminance::{GrayLuminanceSource, LuminanceSource};
use crate::models::BitMatrix;

fn max_dim_from_env() -> Option<usize> {
    match std::env::var("BARCODE_MAX_DIM") {
        Ok(value) => match value.trim().parse::<usize>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Thresholding strategy selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinarizerKind {
    /// [`HybridBinarizer`]
    #[default]
    Hybrid,
    /// [`GlobalHistogramBinarizer`]
    Global,
}

impl BinarizerKind {
    /// Parse `hybrid` or `global` (case-insensitive)
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hybrid" => Ok(Self::Hybrid),
            "global" => Ok(Self::Global),
            other => Err(BarcodeError::argument(format!("unknown binarizer `{other}`"))),
        }
    }

    /// Threshold `source` with this strategy
    pub fn binarize(self, source: &dyn LuminanceSource) -> Result<BinaryBitmap> {
        match self {
            Self::Hybrid => BinaryBitmap::new(source, &HybridBinarizer::new()),
            Self::Global => BinaryBitmap::new(source, &GlobalHistogramBinarizer),
        }
    }
}

/// Load an image file, rotated `rotations` times counterclockwise.
///
/// Images with a side larger than `BARCODE_MAX_DIM` (when set and non-zero)
/// are scaled down first.
pub fn load_rotated<P: AsRef<Path>>(path: P, rotations: u32) -> Result<Box<dyn LuminanceSource>> {
    let mut image = image::open(path)?;
    if let Some(max_dim) = max_dim_from_env() {
        let side = image.width().max(image.height()) as usize;
        if side > max_dim {
            image = image.resize(
                max_dim as u32,
                max_dim as u32,
                image::imageops::FilterType::Triangle,
            );
        }
    }
    let mut source: Box<dyn LuminanceSource> =
        Box::new(GrayLuminanceSource::from_dynamic_image(&image)?);
    for _ in 0..rotations % 4 {
        source = source.rotate_counter_clockwise()?;
    }
    Ok(source)
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
}

/// Summary statistics for a binary matrix.
#[derive(Debug, Clone, Copy)]
pub struct BinaryStats {
    /// Count of black pixels.
    pub black_pixels: usize,
    /// Total pixels in the matrix.
    pub total_pixels: usize,
    /// Ratio of black pixels to total pixels.
    pub black_ratio: f64,
}

/// Compute min/max/avg over a luminance source.
pub fn luminance_stats(source: &dyn LuminanceSource) -> GrayStats {
    let pixels = source.matrix();
    if pixels.is_empty() {
        return GrayStats { min: 0, max: 0, avg: 0 };
    }
    let (min, max, sum) = pixels
        .iter()
        .fold((u8::MAX, u8::MIN, 0u64), |(min, max, sum), &v| {
            (min.min(v), max.max(v), sum + v as u64)
        });
    GrayStats {
        min,
        max,
        avg: (sum / pixels.len() as u64) as u8,
    }
}

/// Compute black pixel stats for a binary matrix.
pub fn binary_stats(binary: &BitMatrix) -> BinaryStats {
    let black = binary.count_set();
    let total = binary.width() * binary.height();
    let ratio = if total == 0 {
        0.0
    } else {
        black as f64 / total as f64
    };
    BinaryStats {
        black_pixels: black,
        total_pixels: total,
        black_ratio: ratio,
    }
}

/// Render a matrix as text, `#` for black and `.` for white.
///
/// Every `step`-th pixel is sampled in both directions so large images stay
/// readable; a `step` of zero is treated as one.
pub fn render_ascii(binary: &BitMatrix, step: usize) -> String {
    let step = step.max(1);
    let mut out = String::new();
    for y in (0..binary.height()).step_by(step) {
        for x in (0..binary.width()).step_by(step) {
            out.push(if binary.get(x, y) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}
