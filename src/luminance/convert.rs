//! RGB/RGBA to luminance conversion
//!
//! Y = 0.299*R + 0.587*G + 0.114*B, computed with integer weights:
//! Y = (76*R + 150*G + 29*B) >> 8
//!
//! Images at or above [`PARALLEL_MIN_PIXELS`] are converted row by row on the
//! rayon pool; smaller ones stay on the calling thread.

use rayon::prelude::*;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Pixel count from which conversion is split across threads
pub const PARALLEL_MIN_PIXELS: usize = 512 * 512;

#[inline]
fn luma(px: &[u8]) -> u8 {
    let lum = (COEF_R * px[0] as u32 + COEF_G * px[1] as u32 + COEF_B * px[2] as u32) >> 8;
    lum.min(255) as u8
}

fn convert(pixels: &[u8], width: usize, height: usize, channels: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut gray = vec![0u8; pixel_count];
    if pixel_count == 0 {
        return gray;
    }

    let convert_row = |(row_out, row_in): (&mut [u8], &[u8])| {
        for (out, px) in row_out.iter_mut().zip(row_in.chunks_exact(channels)) {
            *out = luma(px);
        }
    };

    let pixels = &pixels[..pixel_count * channels];
    if pixel_count >= PARALLEL_MIN_PIXELS {
        gray.par_chunks_mut(width)
            .zip(pixels.par_chunks(width * channels))
            .for_each(convert_row);
    } else {
        gray.chunks_mut(width)
            .zip(pixels.chunks(width * channels))
            .for_each(convert_row);
    }
    gray
}

/// Convert packed RGB bytes (3 per pixel) to grayscale
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    convert(rgb, width, height, 3)
}

/// Convert packed RGBA bytes (4 per pixel) to grayscale, ignoring alpha
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    convert(rgba, width, height, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_grayscale() {
        // Pure white
        let gray = rgb_to_grayscale(&[255, 255, 255], 1, 1);
        assert!(gray[0] >= 254);

        // Pure black
        let gray = rgb_to_grayscale(&[0, 0, 0], 1, 1);
        assert_eq!(gray[0], 0);

        // Pure red
        let gray = rgb_to_grayscale(&[255, 0, 0], 1, 1);
        assert!(gray[0] > 0 && gray[0] < 255);

        // Pure green
        let gray = rgb_to_grayscale(&[0, 255, 0], 1, 1);
        assert!(gray[0] > 100);

        // 2x2 image
        let img = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let gray = rgb_to_grayscale(&img, 2, 2);
        assert_eq!(gray.len(), 4);
    }

    #[test]
    fn test_rgba_ignores_alpha() {
        let opaque = rgba_to_grayscale(&[255, 128, 64, 255], 1, 1);
        let clear = rgba_to_grayscale(&[255, 128, 64, 0], 1, 1);
        assert_eq!(opaque, clear);
        assert_eq!(opaque, rgb_to_grayscale(&[255, 128, 64], 1, 1));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let width = 600;
        let height = 500;
        let rgb: Vec<u8> = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        let gray = rgb_to_grayscale(&rgb, width, height);
        assert_eq!(gray.len(), width * height);
        for (i, px) in rgb.chunks_exact(3).enumerate().step_by(997) {
            assert_eq!(gray[i], luma(px));
        }
    }
}
