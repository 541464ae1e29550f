use super::Binarizer;
use crate::error::Result;
use crate::luminance::LuminanceSource;
use crate::models::BitMatrix;

/// Single global threshold chosen with Otsu's method
///
/// Cheap and fine for evenly lit images; gradients across the frame defeat it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalHistogramBinarizer;

impl GlobalHistogramBinarizer {
    /// Create the binarizer
    pub const fn new() -> Self {
        Self
    }
}

impl Binarizer for GlobalHistogramBinarizer {
    fn black_matrix(&self, source: &dyn LuminanceSource) -> Result<BitMatrix> {
        let gray = source.matrix();
        Ok(otsu_binarize(&gray, source.width(), source.height()))
    }
}

/// Convert grayscale image to binary using Otsu's thresholding method
/// Returns a BitMatrix where true = black, false = white
pub fn otsu_binarize(gray: &[u8], width: usize, height: usize) -> BitMatrix {
    let threshold = calculate_otsu_threshold(gray);
    threshold_binarize(gray, width, height, threshold)
}

/// Calculate Otsu's optimal threshold
pub fn calculate_otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total_pixels = gray.len() as f64;
    let total_sum: u64 = histogram
        .iter()
        .enumerate()
        .map(|(intensity, &count)| intensity as u64 * count)
        .sum();

    let mut max_variance = 0.0;
    let mut optimal_threshold = 128u8;
    let mut class1_pixels = 0u64;
    let mut class1_sum = 0u64;

    // Class 1 is every intensity strictly below `threshold`
    for threshold in 1..=255usize {
        class1_pixels += histogram[threshold - 1];
        class1_sum += (threshold as u64 - 1) * histogram[threshold - 1];
        let class2_pixels = gray.len() as u64 - class1_pixels;

        if class1_pixels == 0 || class2_pixels == 0 {
            continue;
        }

        let class1_mean = class1_sum as f64 / class1_pixels as f64;
        let class2_mean = (total_sum - class1_sum) as f64 / class2_pixels as f64;

        let weight1 = class1_pixels as f64 / total_pixels;
        let weight2 = class2_pixels as f64 / total_pixels;

        let variance = weight1 * weight2 * (class1_mean - class2_mean).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal_threshold = threshold as u8;
        }
    }

    optimal_threshold
}

/// Simple global threshold binarization
pub fn threshold_binarize(gray: &[u8], width: usize, height: usize, threshold: u8) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let is_black = gray[y * width + x] < threshold;
            binary.set(x, y, is_black);
        }
    }

    binary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::luminance::GrayLuminanceSource;

    #[test]
    fn test_threshold_binarize() {
        let gray = vec![100, 150, 200, 50]; // 2x2 image
        let binary = threshold_binarize(&gray, 2, 2, 128);

        // Pixels < 128 should be black (true)
        assert!(binary.get(0, 0)); // 100 < 128
        assert!(!binary.get(1, 0)); // 150 >= 128
        assert!(!binary.get(0, 1)); // 200 >= 128
        assert!(binary.get(1, 1)); // 50 < 128
    }

    #[test]
    fn test_otsu_binarize() {
        // Create a simple two-class image
        let mut gray = vec![50u8; 50]; // Dark class
        gray.extend(vec![200u8; 50]); // Light class

        let binary = otsu_binarize(&gray, 10, 10);

        // Top half should be black (true), bottom half white (false)
        assert!(binary.get(0, 0));
        assert!(!binary.get(0, 7));
    }

    #[test]
    fn test_binarizer_trait() {
        let mut gray = vec![20u8; 8];
        gray.extend(vec![230u8; 8]);
        let source = GrayLuminanceSource::new(gray, 4, 4).unwrap();
        let matrix = GlobalHistogramBinarizer.black_matrix(&source).unwrap();
        assert_eq!(matrix.count_set(), 8);
        assert!(matrix.get(3, 1));
        assert!(!matrix.get(0, 2));
    }
}
