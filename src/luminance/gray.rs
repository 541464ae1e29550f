use std::borrow::Cow;
use std::sync::Arc;

use super::LuminanceSource;
use super::convert::{rgb_to_grayscale, rgba_to_grayscale};
use crate::error::{BarcodeError, Result};

/// Owned 8-bit grayscale image with a crop window
///
/// The pixel buffer is shared between a source and the sources cropped from
/// it; rotation materializes a new buffer.
#[derive(Debug, Clone)]
pub struct GrayLuminanceSource {
    pixels: Arc<[u8]>,
    data_width: usize,
    left: usize,
    top: usize,
    width: usize,
    height: usize,
}

impl GrayLuminanceSource {
    /// Wrap a row-major grayscale buffer
    pub fn new(pixels: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        BarcodeError::check_buffer(pixels.len(), width, height, 1)?;
        Ok(Self {
            pixels: pixels.into(),
            data_width: width,
            left: 0,
            top: 0,
            width,
            height,
        })
    }

    /// Convert packed RGB bytes
    pub fn from_rgb(rgb: &[u8], width: usize, height: usize) -> Result<Self> {
        BarcodeError::check_buffer(rgb.len(), width, height, 3)?;
        Self::new(rgb_to_grayscale(rgb, width, height), width, height)
    }

    /// Convert packed RGBA bytes (alpha ignored)
    pub fn from_rgba(rgba: &[u8], width: usize, height: usize) -> Result<Self> {
        BarcodeError::check_buffer(rgba.len(), width, height, 4)?;
        Self::new(rgba_to_grayscale(rgba, width, height), width, height)
    }

    fn is_full_frame(&self) -> bool {
        self.left == 0 && self.top == 0 && self.width == self.data_width
    }
}

impl LuminanceSource for GrayLuminanceSource {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn matrix(&self) -> Cow<'_, [u8]> {
        if self.is_full_frame() {
            return Cow::Borrowed(&self.pixels[..self.width * self.height]);
        }
        let mut out = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            out.extend_from_slice(&self.row(y));
        }
        Cow::Owned(out)
    }

    fn row(&self, y: usize) -> Cow<'_, [u8]> {
        let start = (self.top + y) * self.data_width + self.left;
        Cow::Borrowed(&self.pixels[start..start + self.width])
    }

    fn is_rotate_supported(&self) -> bool {
        true
    }

    fn rotate_counter_clockwise(&self) -> Result<Box<dyn LuminanceSource>> {
        let (w, h) = (self.width, self.height);
        let mut rotated = vec![0u8; w * h];
        for y in 0..h {
            let row = self.row(y);
            for (x, &value) in row.iter().enumerate() {
                // (x, y) lands at column y of row (w - 1 - x); new width is h
                rotated[(w - 1 - x) * h + y] = value;
            }
        }
        Ok(Box::new(GrayLuminanceSource::new(rotated, h, w)?))
    }

    fn is_crop_supported(&self) -> bool {
        true
    }

    fn crop(
        &self,
        left: usize,
        top: usize,
        width: usize,
        height: usize,
    ) -> Result<Box<dyn LuminanceSource>> {
        if left + width > self.width || top + height > self.height {
            return Err(BarcodeError::argument(format!(
                "crop {width}x{height}+{left}+{top} exceeds {}x{}",
                self.width, self.height
            )));
        }
        Ok(Box::new(Self {
            pixels: Arc::clone(&self.pixels),
            data_width: self.data_width,
            left: self.left + left,
            top: self.top + top,
            width,
            height,
        }))
    }
}
