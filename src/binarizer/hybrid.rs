use rayon::prelude::*;

use super::Binarizer;
use super::global::otsu_binarize;
use crate::error::Result;
use crate::luminance::LuminanceSource;
use crate::models::BitMatrix;

/// Images narrower or shorter than this get a global threshold instead
pub const MINIMUM_DIMENSION: usize = 40;

/// Local-mean adaptive threshold, the default strategy
///
/// Each pixel is compared against the mean of the square window centred on
/// it, looked up in an integral image. A pixel is black when it is darker
/// than that mean by more than `bias`. Small images fall back to Otsu.
#[derive(Debug, Clone, Copy)]
pub struct HybridBinarizer {
    radius: usize,
    bias: u8,
}

impl HybridBinarizer {
    /// Window radius 15 (31x31 window), bias 7
    pub const fn new() -> Self {
        Self {
            radius: 15,
            bias: 7,
        }
    }

    /// Override the window radius; clamped to at least 1
    pub const fn with_radius(mut self, radius: usize) -> Self {
        self.radius = if radius == 0 { 1 } else { radius };
        self
    }

    /// Override the darkness margin below the local mean
    pub const fn with_bias(mut self, bias: u8) -> Self {
        self.bias = bias;
        self
    }
}

impl Default for HybridBinarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Binarizer for HybridBinarizer {
    fn black_matrix(&self, source: &dyn LuminanceSource) -> Result<BitMatrix> {
        let (width, height) = (source.width(), source.height());
        let gray = source.matrix();
        if width < MINIMUM_DIMENSION || height < MINIMUM_DIMENSION {
            return Ok(otsu_binarize(&gray, width, height));
        }
        Ok(adaptive_binarize(&gray, width, height, self.radius, self.bias))
    }
}

/// Summed-area table with a zero first row and column: (width + 1) x (height + 1)
pub fn integral_image(gray: &[u8], width: usize, height: usize) -> Vec<u64> {
    let stride = width + 1;
    let mut integral = vec![0u64; stride * (height + 1)];
    for y in 0..height {
        let mut row_sum = 0u64;
        for x in 0..width {
            row_sum += gray[y * width + x] as u64;
            integral[(y + 1) * stride + x + 1] = integral[y * stride + x + 1] + row_sum;
        }
    }
    integral
}

/// Adaptive binarization against the local mean of a (2r+1)^2 window
pub fn adaptive_binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    radius: usize,
    bias: u8,
) -> BitMatrix {
    let integral = integral_image(gray, width, height);
    let stride = width + 1;
    let bias = bias as u64;

    let rows: Vec<Vec<bool>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let top = y.saturating_sub(radius);
            let bottom = (y + radius + 1).min(height);
            (0..width)
                .map(|x| {
                    let left = x.saturating_sub(radius);
                    let right = (x + radius + 1).min(width);
                    let area = ((bottom - top) * (right - left)) as u64;
                    let sum = integral[bottom * stride + right] + integral[top * stride + left]
                        - integral[top * stride + right]
                        - integral[bottom * stride + left];
                    (gray[y * width + x] as u64 + bias) * area < sum
                })
                .collect()
        })
        .collect();

    BitMatrix::from_rows(width, &rows)
}
